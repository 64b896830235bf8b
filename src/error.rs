// Crate-level error type. Every variant states *where* things went wrong.

use crate::ingest::IngestError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    /// A dropped batch could not be read; the session stops
    #[error("Loading dropped files failed: {0}")]
    Ingest(#[from] IngestError),
}
