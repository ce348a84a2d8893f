//! JSON document output
//!
//! Writes the documents as a pretty-printed JSON array (two-space indent).
//! Non-ASCII text is written verbatim as UTF-8.

use crate::crawler::Document;
use crate::output::atomic::replace_file;
use crate::output::traits::{DocumentWriter, OutputResult};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes documents as a JSON array of `{url, title, content, length}` objects
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, documents: &[Document], path: &Path) -> OutputResult<()> {
        replace_file(path, |file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, documents)?;
            writer.flush()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_documents() -> Vec<Document> {
        vec![
            Document {
                url: "https://example.com/".to_string(),
                title: "École d'ingénieurs".to_string(),
                content: "Première ligne\nDeuxième ligne".to_string(),
                length: 29,
            },
            Document {
                url: "https://example.com/about".to_string(),
                title: String::new(),
                content: "About us".to_string(),
                length: 8,
            },
        ]
    }

    #[test]
    fn test_json_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        JsonWriter.write(&sample_documents()[1..], &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let expected = "[\n  {\n    \"url\": \"https://example.com/about\",\n    \"title\": \"\",\n    \"content\": \"About us\",\n    \"length\": 8\n  }\n]";
        assert_eq!(written, expected);
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        JsonWriter.write(&sample_documents(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("École d'ingénieurs"));
        assert!(!written.contains("\\u00"));

        let parsed: Vec<Document> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample_documents());
    }

    #[test]
    fn test_empty_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.json");
        JsonWriter.write(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
