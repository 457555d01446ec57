//! Progression configuration.
//!
//! Loaded from `~/.progression/config.toml`. Every key is optional and a
//! missing file means defaults. Tokens never live here; see `credentials`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Progression configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Owner used when a repository is given without one.
    /// Overridden by `--owner`.
    #[serde(default)]
    pub default_owner: Option<String>,

    /// The `gh` binary to run. Defaults to `gh` on `PATH`.
    #[serde(default)]
    pub gh_program: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.progression/config.toml`.
    /// Returns defaults if the file is missing, an error if it is invalid.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config.default_owner = config
            .default_owner
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());

        Ok(config)
    }

    /// The config file path: `~/.progression/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".progression").join("config.toml"))
    }
}
