//! Location of the store's data file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The default directory: empty, i.e. the process working directory.
pub const DEFAULT_DIR: &str = "";
/// The default data file name.
pub const DEFAULT_FILENAME: &str = "boltdb.db";

/// Where the store lives on disk.
///
/// Missing keys take their defaults when deserialized, so a host
/// application can embed a `[store]` table in its own config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dir: PathBuf,
    pub filename: String,
}

impl Config {
    /// Returns a config with the default directory and file name.
    pub fn new() -> Self {
        Config {
            dir: PathBuf::from(DEFAULT_DIR),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Returns a copy with every empty field replaced by its default.
    pub fn with_defaults(&self) -> Self {
        let mut c = self.clone();
        if c.dir.as_os_str().is_empty() {
            c.dir = PathBuf::from(DEFAULT_DIR);
        }
        if c.filename.is_empty() {
            c.filename = DEFAULT_FILENAME.to_string();
        }
        c
    }

    /// Checks the config. Currently accepts everything.
    pub fn validate(&self) -> Result<(), crate::Error> {
        Ok(())
    }

    /// The full path of the data file.
    pub fn path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.filename)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
