use thiserror::Error;

/// Widget configuration could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid widget configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid widget configuration: {0}")]
    Invalid(String),
}

/// Failures of the copy-results action. `Display` is the alert text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("Results table not found")]
    TableMissing,

    #[error("No data to copy")]
    NoData,

    #[error("Failed to copy: {0}")]
    Clipboard(String),
}
