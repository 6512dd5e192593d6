use std::{fs, path::Path};

use mealplanner_lib::{ConfigError, fs::config_dir};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// The GUI's own settings, serialized to TOML next to the client configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: Theme,
}

impl GuiConfig {
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(FILE_NAME)),
            Err(err) => {
                warn!("Using default GUI settings: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let result = config_dir().and_then(|dir| self.save_to(&dir.join(FILE_NAME)));

        if let Err(err) = result {
            warn!("Failed to save GUI settings: {err}");
        }
    }

    fn load_from(path: &Path) -> Self {
        if path.exists() {
            let contents = fs::read_to_string(path).unwrap_or_default();
            toml::from_str(&contents).unwrap_or_default()
        } else {
            let cfg = Self::default();
            if let Err(err) = cfg.save_to(path) {
                warn!("Failed to write default GUI settings: {err}");
            }
            cfg
        }
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}
