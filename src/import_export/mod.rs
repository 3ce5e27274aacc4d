pub mod dispatch;
pub mod engine;
pub mod guard;
pub mod worker;

// Re-export the guard surface for convenience
pub use dispatch::{CompletionContext, InlineContext, MainQueue, MainQueueHandle};
pub use engine::{
    ExportEngine, ExportReporter, ExporterState, ImportEngine, ImportMode, ImportReporter,
    ImportSource, ImporterState,
};
pub use guard::{OperationGuard, OperationState};
