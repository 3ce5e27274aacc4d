use crate::import_export::OperationState;

/// Custom error type for syncmark
///
/// Engine failures never reach callers through this type; the guard turns them
/// into a boolean completion. What remains are caller-side problems.
#[derive(Debug, thiserror::Error)]
pub enum SyncmarkError {
    /// An import or export was requested while another one is in flight
    /// (only returned under `OverlapPolicy::Reject`)
    #[error("Cannot start {requested} while {current} is in progress")]
    OperationInProgress {
        requested: OperationState,
        current: OperationState,
    },

    /// I/O errors (config files, device list dumps)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using SyncmarkError
pub type Result<T> = std::result::Result<T, SyncmarkError>;

impl From<serde_yaml::Error> for SyncmarkError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncmarkError::Yaml(err.to_string())
    }
}
