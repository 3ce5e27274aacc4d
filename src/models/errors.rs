/// Failure kinds an import/export engine can report.
///
/// The display strings are what ends up in the log when a transfer fails.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    #[error("Error Creating File")]
    ErrorCreatingFile,

    #[error("Error Writing Header")]
    ErrorWritingHeader,

    #[error("Error Writing Node")]
    ErrorWritingNode,

    #[error("Unknown Error")]
    Unknown,
}
