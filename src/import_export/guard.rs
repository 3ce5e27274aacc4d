//! Single-slot guard around the import/export engines
//!
//! At most one import or export runs through a guard at a time. The state is
//! flipped to busy on the caller's thread before any work is queued, and only
//! flipped back once the engine reports a final status. Overlapping calls are
//! never queued: depending on [`OverlapPolicy`] they panic or are rejected.

use super::dispatch::CompletionContext;
use super::engine::{ExportEngine, ImportEngine, ImportMode, ImportSource};
use super::worker::SerialWorker;
use crate::config::{Config, OverlapPolicy};
use crate::error::{Result, SyncmarkError};
use crate::models::bookmark::ImportedBookmark;
use crate::models::errors::TransferError;
use log::{debug, error, info, warn};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// What the guard is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    Importing,
    Exporting,
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationState::Idle => write!(f, "idle"),
            OperationState::Importing => write!(f, "import"),
            OperationState::Exporting => write!(f, "export"),
        }
    }
}

type Completion = Box<dyn FnOnce(bool, Vec<ImportedBookmark>) + Send + 'static>;

fn lock_state(state: &Mutex<OperationState>) -> MutexGuard<'_, OperationState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Completion owed to the caller of one operation.
///
/// Lives inside the engine's reporter, so it is consumed by the first final
/// status. If the engine drops the reporter without one, the operation is
/// closed as failed.
struct PendingCompletion {
    operation: &'static str,
    state: Arc<Mutex<OperationState>>,
    context: Arc<dyn CompletionContext>,
    completion: Option<Completion>,
}

impl PendingCompletion {
    fn finish(&mut self, outcome: std::result::Result<Vec<ImportedBookmark>, TransferError>) {
        let Some(completion) = self.completion.take() else {
            warn!(
                "Bookmarks {} - Ignoring status reported after completion",
                self.operation
            );
            return;
        };

        *lock_state(&self.state) = OperationState::Idle;

        let (success, bookmarks) = match outcome {
            Ok(bookmarks) => {
                info!(
                    "Bookmarks {} - Completed {} Successfully",
                    self.operation, self.operation
                );
                (true, bookmarks)
            }
            Err(e) => {
                error!("Bookmarks {} - {}", self.operation, e);
                (false, Vec::new())
            }
        };

        self.context
            .dispatch(Box::new(move || completion(success, bookmarks)));
    }
}

impl Drop for PendingCompletion {
    fn drop(&mut self) {
        if self.completion.is_some() {
            warn!(
                "Bookmarks {} - Engine released its reporter without a final status",
                self.operation
            );
            self.finish(Err(TransferError::Unknown));
        }
    }
}

/// Runs bookmark imports and exports one at a time on a background worker
pub struct OperationGuard {
    state: Arc<Mutex<OperationState>>,
    importer: Arc<dyn ImportEngine>,
    exporter: Arc<dyn ExportEngine>,
    queue: SerialWorker,
    context: Arc<dyn CompletionContext>,
    overlap_policy: OverlapPolicy,
}

impl OperationGuard {
    /// Create a guard with the default configuration
    pub fn new(
        importer: Arc<dyn ImportEngine>,
        exporter: Arc<dyn ExportEngine>,
        context: Arc<dyn CompletionContext>,
    ) -> Result<Self> {
        Self::with_config(importer, exporter, context, &Config::default())
    }

    pub fn with_config(
        importer: Arc<dyn ImportEngine>,
        exporter: Arc<dyn ExportEngine>,
        context: Arc<dyn CompletionContext>,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            state: Arc::new(Mutex::new(OperationState::Idle)),
            importer,
            exporter,
            queue: SerialWorker::spawn(&config.worker_thread_name)?,
            context,
            overlap_policy: config.overlap_policy,
        })
    }

    pub fn state(&self) -> OperationState {
        *lock_state(&self.state)
    }

    pub fn is_idle(&self) -> bool {
        self.state() == OperationState::Idle
    }

    /// Check-and-set under the state lock
    fn begin(&self, next: OperationState) -> Result<()> {
        let mut state = lock_state(&self.state);
        if *state == OperationState::Idle {
            *state = next;
            return Ok(());
        }

        let current = *state;
        drop(state);

        match self.overlap_policy {
            OverlapPolicy::Panic => match next {
                OperationState::Exporting => panic!(
                    "Bookmarks Export - Error Exporting while an Import/Export operation is in progress"
                ),
                _ => panic!(
                    "Bookmarks Import - Error Importing while an Import/Export operation is in progress"
                ),
            },
            OverlapPolicy::Reject => {
                warn!("Refusing to start {} while {} is in progress", next, current);
                Err(SyncmarkError::OperationInProgress {
                    requested: next,
                    current,
                })
            }
        }
    }

    fn pending(&self, operation: &'static str, completion: Completion) -> PendingCompletion {
        PendingCompletion {
            operation,
            state: Arc::clone(&self.state),
            context: Arc::clone(&self.context),
            completion: Some(completion),
        }
    }

    /// Start an import.
    ///
    /// `completion` runs on the completion context with the success flag and,
    /// for a `Manual` file import, the bookmarks the engine parsed. The list
    /// is empty for every other source and on failure.
    pub fn run_import<F>(&self, source: ImportSource, completion: F) -> Result<()>
    where
        F: FnOnce(bool, Vec<ImportedBookmark>) + Send + 'static,
    {
        self.begin(OperationState::Importing)?;
        debug!("Bookmarks Import - Queued import from {}", source);

        let returns_list = matches!(
            source,
            ImportSource::File {
                mode: ImportMode::Manual,
                ..
            }
        );
        let mut pending = self.pending("Import", Box::new(completion));
        let importer = Arc::clone(&self.importer);

        self.queue.submit(move || {
            importer.import(
                source,
                Box::new(move |status, bookmarks| {
                    if !status.is_terminal() {
                        debug!("Bookmarks Import - Import started");
                        return;
                    }
                    let outcome = status.into_result().map(|()| {
                        if returns_list {
                            bookmarks.unwrap_or_default()
                        } else {
                            Vec::new()
                        }
                    });
                    pending.finish(outcome);
                }),
            );
        });
        Ok(())
    }

    /// Start an export of the bookmark store to `destination`
    pub fn run_export<F>(&self, destination: impl Into<PathBuf>, completion: F) -> Result<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let destination = destination.into();
        self.begin(OperationState::Exporting)?;
        debug!("Bookmarks Export - Queued export to {}", destination.display());

        let mut pending = self.pending("Export", Box::new(move |success, _| completion(success)));
        let exporter = Arc::clone(&self.exporter);

        self.queue.submit(move || {
            exporter.export(
                &destination,
                Box::new(move |status| {
                    if !status.is_terminal() {
                        debug!("Bookmarks Export - Export started");
                        return;
                    }
                    pending.finish(status.into_result().map(|()| Vec::new()));
                }),
            );
        });
        Ok(())
    }

    /// Import an in-memory list of bookmarks into the store
    pub fn import_records<F>(&self, records: Vec<ImportedBookmark>, completion: F) -> Result<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.run_import(ImportSource::Records(records), move |success, _| {
            completion(success)
        })
    }

    /// Import a bookmarks file straight into the store
    pub fn import_file<F>(&self, path: impl Into<PathBuf>, completion: F) -> Result<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.run_import(
            ImportSource::file(path, ImportMode::Automatic),
            move |success, _| completion(success),
        )
    }

    /// Parse a bookmarks file and hand the bookmarks back instead of storing them
    pub fn import_file_to_list<F>(&self, path: impl Into<PathBuf>, completion: F) -> Result<()>
    where
        F: FnOnce(bool, Vec<ImportedBookmark>) + Send + 'static,
    {
        self.run_import(ImportSource::file(path, ImportMode::Manual), completion)
    }

    /// Export the bookmark store to a file
    pub fn export_file<F>(&self, path: impl Into<PathBuf>, completion: F) -> Result<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.run_export(path, completion)
    }
}
