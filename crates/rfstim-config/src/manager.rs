//! Category-keyed configuration manager.
//!
//! Each configuration file category carries its own column set and is
//! recognized by file extension (`.stim`, `.meas`, `.flist`). The manager
//! owns one table per category; a category answers queries only after its
//! file has been loaded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::csv::CsvTable;
use crate::error::{ConfigError, Result};

/// The configuration file categories the SDK consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigCategory {
    /// Stimulus definitions (`.stim`).
    Stim,
    /// Measurement definitions (`.meas`).
    Meas,
    /// Frequency lists (`.flist`).
    FreqList,
}

impl ConfigCategory {
    /// Resolve a category from a config file path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext {
            "stim" => Ok(Self::Stim),
            "meas" => Ok(Self::Meas),
            "flist" => Ok(Self::FreqList),
            other => Err(ConfigError::UnknownExtension(other.to_string())),
        }
    }

    /// The column set a file of this category must carry.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Stim => &[
                "StimName",
                "StimType",
                "TriggerType",
                "PinName",
                "FreqListName",
                "FreqListIndex",
                "Power",
                "WaveFile",
                "RepeatCount",
            ],
            Self::Meas => &[
                "MeasName",
                "TriggerType",
                "PinName",
                "FreqListName",
                "FreqListIndex",
                "Power",
            ],
            Self::FreqList => &["FreqListName", "FreqListValue"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stim => "stim",
            Self::Meas => "meas",
            Self::FreqList => "flist",
        }
    }
}

struct ConfigFile {
    path: PathBuf,
    table: CsvTable,
    loaded: bool,
}

/// Owns the configuration tables for one SDK instance.
///
/// Constructed once at process start and passed by reference to whatever
/// needs configuration lookups — there is no global instance.
#[derive(Default)]
pub struct ConfigManager {
    files: HashMap<ConfigCategory, ConfigFile>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration file. Its category (and column set) comes
    /// from the file extension; one file per category.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> Result<ConfigCategory> {
        let path = path.into();
        let category = ConfigCategory::from_path(&path)?;
        if self.files.contains_key(&category) {
            return Err(ConfigError::AlreadyRegistered(category.name()));
        }
        let table = CsvTable::with_columns(category.columns())?;
        debug!(category = category.name(), path = %path.display(), "config file registered");
        self.files.insert(
            category,
            ConfigFile {
                path,
                table,
                loaded: false,
            },
        );
        Ok(category)
    }

    /// Load (or reload) the file registered for a category.
    pub fn load(&mut self, category: ConfigCategory) -> Result<()> {
        let file = self
            .files
            .get_mut(&category)
            .ok_or(ConfigError::NotRegistered(category.name()))?;
        file.table.load(&file.path)?;
        file.loaded = true;
        info!(
            category = category.name(),
            rows = file.table.len(),
            "config file loaded"
        );
        Ok(())
    }

    /// Load every registered file.
    pub fn load_all(&mut self) -> Result<()> {
        let categories: Vec<ConfigCategory> = self.files.keys().copied().collect();
        for category in categories {
            self.load(category)?;
        }
        Ok(())
    }

    /// The ordered field row for a named command within a category.
    ///
    /// Fails if the category has no registered file, the file is not
    /// loaded yet, or no row matches the command name.
    pub fn query(&self, category: ConfigCategory, command: &str) -> Result<Vec<String>> {
        let file = self
            .files
            .get(&category)
            .ok_or(ConfigError::NotRegistered(category.name()))?;
        if !file.loaded {
            return Err(ConfigError::NotLoaded(category.name()));
        }
        file.table
            .query(command)
            .map(|row| row.to_vec())
            .ok_or_else(|| ConfigError::CommandNotFound {
                command: command.to_string(),
            })
    }

    /// The file path registered for a category, if any.
    pub fn file_for(&self, category: ConfigCategory) -> Option<&Path> {
        self.files.get(&category).map(|f| f.path.as_path())
    }

    /// Registered categories, sorted.
    pub fn categories(&self) -> Vec<ConfigCategory> {
        let mut categories: Vec<ConfigCategory> = self.files.keys().copied().collect();
        categories.sort_unstable();
        categories
    }

    /// Materialized rows for a category, for display tooling.
    pub fn rows(&self, category: ConfigCategory) -> Result<&[Vec<String>]> {
        let file = self
            .files
            .get(&category)
            .ok_or(ConfigError::NotRegistered(category.name()))?;
        if !file.loaded {
            return Err(ConfigError::NotLoaded(category.name()));
        }
        Ok(file.table.rows())
    }
}
