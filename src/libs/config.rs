//! Configuration management for focusflow.
//!
//! Settings live in `config.json` inside the application data directory and
//! are grouped into optional modules:
//!
//! - **Storage**: which persistence adapter keeps the task list and session
//!   history, and where its files go
//! - **Timer**: the tick period of the session stopwatch
//!
//! A missing file means "all defaults". The interactive wizard behind
//! `focusflow init` edits the same structure.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use focusflow::libs::config::{Config, StorageBackend, StorageConfig};
//!
//! let mut config = Config::read()?;
//! config.storage = Some(StorageConfig {
//!     backend: StorageBackend::File,
//!     directory: None,
//! });
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::db::db::DB_FILE_NAME;
use crate::db::kv::SqliteStore;
use crate::libs::messages::Message;
use crate::{msg_error, msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable module shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Which persistence adapter backs the collections.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `storage` table in the SQLite application database.
    #[default]
    Sqlite,
    /// One JSON file per collection.
    File,
    /// Nothing is written; state lasts for one process.
    Memory,
}

impl StorageBackend {
    pub const ALL: [StorageBackend; 3] = [StorageBackend::Sqlite, StorageBackend::File, StorageBackend::Memory];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::File => "file",
            StorageBackend::Memory => "memory",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Overrides the platform data directory for the database or JSON files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Milliseconds between two timer ticks; each tick counts one second.
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig { tick_interval_ms: 1000 }
    }
}

impl TimerConfig {
    /// Tick period, never shorter than one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    /// Reads the configuration, returning defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Like [`Config::read`], but falls back to defaults with a warning.
    pub fn read_or_default() -> Config {
        match Self::read() {
            Ok(config) => config,
            Err(e) => {
                msg_warning!(Message::ConfigParseError(e.to_string()));
                Config::default()
            }
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    pub fn timer(&self) -> TimerConfig {
        self.timer.clone().unwrap_or_default()
    }

    /// Opens the configured persistence adapter.
    ///
    /// If it cannot be opened the error is reported and an in-memory store is
    /// returned instead, so the tracker keeps working for this process.
    pub fn open_adapter(&self) -> Box<dyn KeyValueStore> {
        let storage = self.storage.clone().unwrap_or_default();

        match Self::try_open_adapter(&storage) {
            Ok(adapter) => adapter,
            Err(e) => {
                msg_error!(Message::StorageOpenFailed(e.to_string()));
                msg_warning!(Message::StorageDegraded);
                Box::new(MemoryStore::new())
            }
        }
    }

    fn try_open_adapter(storage: &StorageConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
        let data_storage = match &storage.directory {
            Some(dir) => DataStorage::at(dir),
            None => DataStorage::new(),
        };

        let adapter: Box<dyn KeyValueStore> = match storage.backend {
            StorageBackend::Sqlite => {
                let path = data_storage
                    .get_path(DB_FILE_NAME)
                    .map_err(|e| StorageError::Unavailable(e.to_string()))?;
                Box::new(SqliteStore::open(&path)?)
            }
            StorageBackend::File => Box::new(FileStore::open(data_storage.base_path())?),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };
        tracing::debug!(backend = storage.backend.as_str(), "storage adapter opened");

        Ok(adapter)
    }

    /// Runs the interactive configuration wizard, starting from the saved
    /// values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "storage".to_string(),
                name: "Storage".to_string(),
            },
            ConfigModule {
                key: "timer".to_string(),
                name: "Timer".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "storage" => {
                    let default = config.storage.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleStorage);

                    let backend_index = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptStorageBackend.to_string())
                        .items(&StorageBackend::ALL.iter().map(|b| b.as_str()).collect::<Vec<_>>())
                        .default(StorageBackend::ALL.iter().position(|b| *b == default.backend).unwrap_or(0))
                        .interact()?;

                    // Empty input keeps the platform data directory.
                    let directory: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptStorageDirectory.to_string())
                        .default(
                            default
                                .directory
                                .as_ref()
                                .map(|d| d.display().to_string())
                                .unwrap_or_default(),
                        )
                        .allow_empty(true)
                        .interact_text()?;

                    config.storage = Some(StorageConfig {
                        backend: StorageBackend::ALL[backend_index],
                        directory: Some(directory.trim())
                            .filter(|d| !d.is_empty())
                            .map(PathBuf::from),
                    });
                }
                "timer" => {
                    let default = config.timer();
                    msg_print!(Message::ConfigModuleTimer);
                    config.timer = Some(TimerConfig {
                        tick_interval_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTickInterval.to_string())
                            .default(default.tick_interval_ms)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
