//! Writer trait and error types
//!
//! This module defines the interface every document writer implements.

use crate::crawler::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize documents: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Persists a crawl's documents to one file
///
/// Implementations must leave any existing file at `path` untouched when
/// they fail.
pub trait DocumentWriter {
    /// Short format name used in log messages
    fn name(&self) -> &'static str;

    /// Writes all documents, in order, replacing `path`
    fn write(&self, documents: &[Document], path: &Path) -> OutputResult<()>;
}
