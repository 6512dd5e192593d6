use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ConfigError, fs::config_dir};

const FILE_NAME: &str = "client.toml";

/// Environment variable that overrides the configured backend URL.
pub const BASE_URL_VAR: &str = "MEALPLANNER_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Where the backend lives, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl ClientConfig {
    /// Load `client.toml` from the configuration directory, then apply the
    /// [`BASE_URL_VAR`] environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_dir()?.join(FILE_NAME);
        let cfg = Self::load_from(&path)?;

        Ok(cfg.with_base_url(std::env::var(BASE_URL_VAR).ok()))
    }

    /// Load from `path`, writing out the defaults if the file doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            let cfg = toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed {}: {err}", path.display());
                Self::default()
            });
            Ok(cfg)
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        fs::write(path, contents).map_err(|e| ConfigError::io(path, e))?;
        debug!("Wrote {}", path.display());

        Ok(())
    }

    /// Replace the base URL when `url` is given and non-blank.
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// The backend base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let cfg = ClientConfig::load_from(&path).unwrap();

        assert_eq!(cfg, ClientConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_reads_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(&path, "base_url = \"https://meals.example.com/api/\"\n").unwrap();

        let cfg = ClientConfig::load_from(&path).unwrap();

        assert_eq!(cfg.base_url(), "https://meals.example.com/api");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(&path, "base_url = [").unwrap();

        assert_eq!(
            ClientConfig::load_from(&path).unwrap(),
            ClientConfig::default()
        );
    }

    #[test]
    fn test_override() {
        let cfg = ClientConfig::default();

        assert_eq!(
            cfg.clone().with_base_url(Some(" http://10.0.0.2:8080 ".into())).base_url(),
            "http://10.0.0.2:8080"
        );
        assert_eq!(cfg.clone().with_base_url(Some("  ".into())).base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.with_base_url(None).base_url(), DEFAULT_BASE_URL);
    }
}
