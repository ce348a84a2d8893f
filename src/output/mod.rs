//! Output module for persisting scraped documents
//!
//! This module handles:
//! - Writing documents as pretty JSON and as flat text
//! - Optionally loading them into a SQLite table
//! - Summarizing the crawl for the console
//!
//! Every writer stages its file next to the target and renames it into
//! place, so a failed write never leaves a truncated file behind.

mod atomic;
mod json;
mod sqlite_output;
pub mod stats;
mod text;
mod traits;

pub use json::JsonWriter;
pub use sqlite_output::SqliteWriter;
pub use stats::{print_statistics, CrawlStatistics};
pub use text::{format_text, TextWriter};
pub use traits::{DocumentWriter, OutputError, OutputResult};

use crate::config::OutputConfig;
use crate::crawler::Document;
use std::path::PathBuf;

/// Writes documents to every destination in `config`
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths written, in write order
/// * `Err(OutputError)` - The first writer failure; later writers are not run
pub fn write_outputs(documents: &[Document], config: &OutputConfig) -> OutputResult<Vec<PathBuf>> {
    let mut targets: Vec<(Box<dyn DocumentWriter>, PathBuf)> = vec![
        (Box::new(JsonWriter), config.json_path.clone()),
        (Box::new(TextWriter), config.text_path.clone()),
    ];
    if let Some(sqlite_path) = &config.sqlite_path {
        targets.push((Box::new(SqliteWriter), sqlite_path.clone()));
    }

    let mut written = Vec::with_capacity(targets.len());
    for (writer, path) in targets {
        writer.write(documents, &path)?;
        tracing::info!("✓ Saved {} to {}", writer.name(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config(dir: &TempDir, sqlite: bool) -> OutputConfig {
        OutputConfig {
            json_path: dir.path().join("docs.json"),
            text_path: dir.path().join("docs.txt"),
            sqlite_path: sqlite.then(|| dir.path().join("docs.db")),
        }
    }

    fn documents() -> Vec<Document> {
        vec![Document {
            url: "https://example.com/".to_string(),
            title: "Home".to_string(),
            content: "Welcome".to_string(),
            length: 7,
        }]
    }

    #[test]
    fn test_write_json_and_text() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir, false);

        let written = write_outputs(&documents(), &config).unwrap();

        assert_eq!(written, vec![config.json_path.clone(), config.text_path.clone()]);
        assert!(config.json_path.exists());
        assert!(config.text_path.exists());
    }

    #[test]
    fn test_write_with_sqlite() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir, true);

        let written = write_outputs(&documents(), &config).unwrap();

        assert_eq!(written.len(), 3);
        assert!(dir.path().join("docs.db").exists());
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(&dir, false);
        config.text_path = dir.path().join("no-such-dir").join("docs.txt");

        assert!(write_outputs(&documents(), &config).is_err());
    }
}
