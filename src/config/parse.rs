//! Taskfile loading

use crate::config::types::{Taskfile, TaskfileDocument};
use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Load and parse a Taskfile from a path
pub fn load_taskfile(path: &Path) -> ConfigResult<Taskfile> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|error| ConfigError::Read {
        path: path.to_path_buf(),
        error,
    })?;

    parse_taskfile(&contents, path)
}

/// Parse Taskfile contents; `path` is recorded on the result and in errors
pub fn parse_taskfile(yaml: &str, path: &Path) -> ConfigResult<Taskfile> {
    let document: TaskfileDocument =
        serde_yaml::from_str(yaml).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;

    Ok(Taskfile::new(path.to_path_buf(), document.tasks))
}
