/// CLI configuration
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// SQLite connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub scanner: ScannerSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScannerSettings {
    /// Hashing/tagging worker count; defaults to the CPU count
    #[serde(default)]
    pub workers: Option<usize>,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            scanner: ScannerSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicitly given file must exist; the default `Shellac.toml` is
    /// optional. Environment variables prefixed with `SHELLAC_` override
    /// file values.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("Shellac.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SHELLAC")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("invalid configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration")
    }
}

fn default_database_url() -> String {
    "sqlite://shellac.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, "sqlite://shellac.db");
        assert_eq!(config.scanner.workers, None);
        assert!(!config.scanner.follow_links);
    }

    #[test]
    fn missing_explicit_config_file_is_fatal() {
        let result = AppConfig::load(Some(Path::new("/no/such/shellac.toml")));
        assert!(result.is_err());
    }
}
