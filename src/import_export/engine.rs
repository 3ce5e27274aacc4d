//! Contracts for the external import/export engines
//!
//! The engines own file formats and the bookmark store. The guard only needs
//! to hand them work and listen for their status reports.

use crate::models::bookmark::ImportedBookmark;
use crate::models::errors::TransferError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Status reported by an import engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImporterState {
    Started,
    Completed,
    /// The engine wrote the bookmarks into the store on its own
    AutoCompleted,
    Cancelled,
    /// A status code this crate does not know about
    Unrecognized(i32),
}

impl ImporterState {
    /// Decode a raw status code as emitted by native engines
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ImporterState::Started,
            1 => ImporterState::Completed,
            2 => ImporterState::AutoCompleted,
            3 => ImporterState::Cancelled,
            other => ImporterState::Unrecognized(other),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImporterState::Started)
    }

    /// Ok for `Started`, `Completed` and `AutoCompleted`
    pub fn into_result(self) -> Result<(), TransferError> {
        match self {
            ImporterState::Started | ImporterState::Completed | ImporterState::AutoCompleted => {
                Ok(())
            }
            ImporterState::Cancelled | ImporterState::Unrecognized(_) => {
                Err(TransferError::Unknown)
            }
        }
    }
}

/// Status reported by an export engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterState {
    Started,
    Completed,
    ErrorCreatingFile,
    ErrorWritingHeader,
    ErrorWritingNodes,
    Unrecognized(i32),
}

impl ExporterState {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ExporterState::Started,
            1 => ExporterState::Completed,
            2 => ExporterState::ErrorCreatingFile,
            3 => ExporterState::ErrorWritingHeader,
            4 => ExporterState::ErrorWritingNodes,
            other => ExporterState::Unrecognized(other),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExporterState::Started)
    }

    pub fn into_result(self) -> Result<(), TransferError> {
        match self {
            ExporterState::Started | ExporterState::Completed => Ok(()),
            ExporterState::ErrorCreatingFile => Err(TransferError::ErrorCreatingFile),
            ExporterState::ErrorWritingHeader => Err(TransferError::ErrorWritingHeader),
            ExporterState::ErrorWritingNodes => Err(TransferError::ErrorWritingNode),
            ExporterState::Unrecognized(_) => Err(TransferError::Unknown),
        }
    }
}

/// How a file import hands its result back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// The engine inserts the bookmarks into the store itself
    Automatic,
    /// The engine returns the parsed bookmarks to the caller
    Manual,
}

/// What an import reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Records(Vec<ImportedBookmark>),
    File { path: PathBuf, mode: ImportMode },
}

impl ImportSource {
    pub fn file(path: impl Into<PathBuf>, mode: ImportMode) -> Self {
        ImportSource::File {
            path: path.into(),
            mode,
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSource::Records(records) => write!(f, "{} record(s)", records.len()),
            ImportSource::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Receives import status updates; may be called more than once.
/// The list is only meaningful for a `Manual` file import.
pub type ImportReporter = Box<dyn FnMut(ImporterState, Option<Vec<ImportedBookmark>>) + Send>;

/// Receives export status updates; may be called more than once
pub type ExportReporter = Box<dyn FnMut(ExporterState) + Send>;

/// An engine that brings bookmarks into the store
pub trait ImportEngine: Send + Sync {
    /// Start an import. Implementations report `Started` optionally and then
    /// exactly one terminal state, from any thread.
    fn import(&self, source: ImportSource, report: ImportReporter);
}

/// An engine that writes the bookmark store to a file
pub trait ExportEngine: Send + Sync {
    fn export(&self, destination: &Path, report: ExportReporter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, ImporterState::Started)]
    #[case(1, ImporterState::Completed)]
    #[case(2, ImporterState::AutoCompleted)]
    #[case(3, ImporterState::Cancelled)]
    #[case(42, ImporterState::Unrecognized(42))]
    fn test_importer_state_from_code(#[case] code: i32, #[case] expected: ImporterState) {
        assert_eq!(ImporterState::from_code(code), expected);
    }

    #[rstest]
    #[case(ImporterState::Started, Ok(()))]
    #[case(ImporterState::Completed, Ok(()))]
    #[case(ImporterState::AutoCompleted, Ok(()))]
    #[case(ImporterState::Cancelled, Err(TransferError::Unknown))]
    #[case(ImporterState::Unrecognized(-1), Err(TransferError::Unknown))]
    fn test_importer_state_into_result(
        #[case] state: ImporterState,
        #[case] expected: Result<(), TransferError>,
    ) {
        assert_eq!(state.into_result(), expected);
    }

    #[rstest]
    #[case(ExporterState::Completed, Ok(()))]
    #[case(ExporterState::ErrorCreatingFile, Err(TransferError::ErrorCreatingFile))]
    #[case(ExporterState::ErrorWritingHeader, Err(TransferError::ErrorWritingHeader))]
    #[case(ExporterState::ErrorWritingNodes, Err(TransferError::ErrorWritingNode))]
    #[case(ExporterState::Unrecognized(9), Err(TransferError::Unknown))]
    fn test_exporter_state_into_result(
        #[case] state: ExporterState,
        #[case] expected: Result<(), TransferError>,
    ) {
        assert_eq!(state.into_result(), expected);
    }

    #[test]
    fn test_started_is_not_terminal() {
        assert!(!ImporterState::Started.is_terminal());
        assert!(!ExporterState::Started.is_terminal());
        assert!(ImporterState::Cancelled.is_terminal());
        assert!(ExporterState::from_code(4).is_terminal());
    }

    #[test]
    fn test_import_source_display() {
        let records = ImportSource::Records(vec![ImportedBookmark::new("A", "https://a.example")]);
        assert_eq!(records.to_string(), "1 record(s)");

        let file = ImportSource::file("/tmp/bookmarks.html", ImportMode::Manual);
        assert_eq!(file.to_string(), "/tmp/bookmarks.html");
    }
}
