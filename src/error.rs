use std::path::PathBuf;

use thiserror::Error;

/// Errors that make every command other than `config` impossible to run
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n  Hint: Run: otw config <path-to-vault>", .path.display())]
    Missing { path: PathBuf },

    #[error("base_dir not set in config file: {}\n  Hint: Run: otw config <path-to-vault>", .path.display())]
    Incomplete { path: PathBuf },

    #[error("Could not determine home directory for the config file")]
    NoHome,

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
}
