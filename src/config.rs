//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. `DUPE_HANDLER_*` environment variables (e.g. `DUPE_HANDLER_COLOR=false`)
//! 4. CLI flags, applied by the caller
//!
//! ```toml
//! color = true
//! follow_symlinks = false
//! hash_buffer_size = 65536
//! verify_before_delete = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scanner::DEFAULT_BUFFER_SIZE;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DUPE_HANDLER_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color the report and prompts.
    pub color: bool,
    /// Follow symbolic links while scanning.
    pub follow_symlinks: bool,
    /// Read buffer size for fingerprinting, in bytes.
    pub hash_buffer_size: usize,
    /// Re-check a file's size before deleting it.
    pub verify_before_delete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            follow_symlinks: false,
            hash_buffer_size: DEFAULT_BUFFER_SIZE,
            verify_before_delete: true,
        }
    }
}

impl Config {
    /// Build the layered figment for a given config file.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// platform path is used when present.
    ///
    /// # Errors
    ///
    /// Fails on a missing explicit file or on malformed values.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::config_path().filter(|p| p.is_file()),
        };

        if let Some(path) = &file {
            log::debug!("Loading config from {}", path.display());
        }

        Self::figment(file.as_deref())
            .extract()
            .context("invalid configuration")
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupe-handler", "dupe-handler")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(config.color);
        assert!(!config.follow_symlinks);
        assert_eq!(config.hash_buffer_size, 64 * 1024);
        assert!(config.verify_before_delete);
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "color = false\nhash_buffer_size = 4096")?;

            let config = Config::load(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;

            assert!(!config.color);
            assert_eq!(config.hash_buffer_size, 4096);
            assert!(config.verify_before_delete);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "follow_symlinks = false")?;
            jail.set_env("DUPE_HANDLER_FOLLOW_SYMLINKS", "true");

            let config = Config::load(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;

            assert!(config.follow_symlinks);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            assert!(Config::load(Some(Path::new("absent.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "hash_buffer_size = \"big\"")?;

            assert!(Config::load(Some(Path::new("config.toml"))).is_err());
            Ok(())
        });
    }
}
