pub mod config;
pub mod error;
pub mod import_export;
pub mod models;
pub mod sync;
pub mod utils;

// Re-export error types for convenience
pub use error::{Result, SyncmarkError};
