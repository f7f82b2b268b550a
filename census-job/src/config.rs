//! Job configuration, loaded from a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Error};
use serde::Deserialize;

/// Top-level contents of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub path: String,
}

impl Config {
    /// Load configuration from the given path.
    ///
    /// A missing or unreadable file surfaces here as an error; the caller
    /// treats it as storage being unavailable for the whole run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("unable to read config `{}`: {}", path.display(), e))?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow!("unable to parse config `{}`: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn loads_a_storage_section() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\npath = \"census.db\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.storage.path, "census.db");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load("does-not-exist.toml").is_err());
    }

    #[test]
    fn missing_storage_section_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[job]\nname = \"census\"").unwrap();

        assert!(Config::load(file.path()).is_err());
    }
}
