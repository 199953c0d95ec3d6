use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems detected before any file is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Invalid module pattern '{pattern}': {source}")]
    InvalidModuleRule { pattern: String, source: regex::Error },

    #[error("Module pattern '{0}' has no capture group")]
    MissingCaptureGroup(String),

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern { pattern: String, source: regex::Error },

    #[error("Config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
