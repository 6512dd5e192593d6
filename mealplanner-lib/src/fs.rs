use std::{fs::create_dir_all, path::PathBuf};

use xdg::BaseDirectories;

use crate::ConfigError;

/// Returns the path to the Meal Planner configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let path = xdg_prefix()
        .get_config_home()
        .ok_or(ConfigError::NoHome)?;

    create_dir_all(&path).map_err(|e| ConfigError::io(&path, e))?;

    Ok(path)
}

fn xdg_prefix() -> BaseDirectories {
    xdg::BaseDirectories::with_prefix("mealplanner")
}
