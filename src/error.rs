use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from loading or writing calculator configuration.
///
/// The engine itself never fails; only the file-facing edges do.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
