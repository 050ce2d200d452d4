use std::fs;
use std::path::{Path, PathBuf};

use crate::io::json_store::JsonFileStore;
use crate::model::config::PlannerConfig;

/// Error type for planner I/O operations
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("not a planning directory: no aisle/ directory found (run `aisle init`)")]
    NotAPlanner,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the planning directory by walking up from the given directory,
/// looking for an `aisle/` subdirectory.
pub fn discover_planner(start: &Path) -> Result<PathBuf, PlannerError> {
    let mut current = start.to_path_buf();
    loop {
        let aisle_dir = current.join("aisle");
        if aisle_dir.is_dir() && aisle_dir.join("config.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(PlannerError::NotAPlanner);
        }
    }
}

/// The `aisle/` data directory under a planning root.
pub fn aisle_dir(root: &Path) -> PathBuf {
    root.join("aisle")
}

/// Path of the key-value store file inside the data directory.
pub fn store_path(aisle_dir: &Path) -> PathBuf {
    aisle_dir.join("planner.json")
}

/// Read and parse config.toml from the data directory.
pub fn read_config(aisle_dir: &Path) -> Result<PlannerConfig, PlannerError> {
    let config_path = aisle_dir.join("config.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| PlannerError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: PlannerConfig = toml::from_str(&config_text)?;
    Ok(config)
}

/// Open the durable store inside the data directory.
pub fn open_store(aisle_dir: &Path) -> Result<JsonFileStore, PlannerError> {
    Ok(JsonFileStore::open(&store_path(aisle_dir))?)
}
