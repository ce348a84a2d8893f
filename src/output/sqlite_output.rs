//! SQLite document output
//!
//! Writes the documents into a fresh `documents` table so they can be
//! loaded by downstream indexing tools without parsing JSON.

use crate::crawler::Document;
use crate::output::atomic::{commit, staging_file};
use crate::output::traits::{DocumentWriter, OutputResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQL schema for the output database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    position INTEGER PRIMARY KEY,
    url TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    length INTEGER NOT NULL
);
"#;

/// Writes documents to a SQLite database file
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteWriter;

impl DocumentWriter for SqliteWriter {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write(&self, documents: &[Document], path: &Path) -> OutputResult<()> {
        let staged = staging_file(path)?;

        {
            let mut conn = Connection::open(staged.path())?;
            conn.execute_batch(SCHEMA_SQL)?;

            let tx = conn.transaction()?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO documents (position, url, title, content, length)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;
                for (position, doc) in documents.iter().enumerate() {
                    insert.execute(params![
                        position as i64,
                        doc.url,
                        doc.title,
                        doc.content,
                        doc.length as i64
                    ])?;
                }
            }
            tx.commit()?;
        }

        commit(staged, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(url: &str, content: &str) -> Document {
        Document {
            url: url.to_string(),
            title: format!("Title of {}", url),
            content: content.to_string(),
            length: content.chars().count(),
        }
    }

    #[test]
    fn test_documents_written_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.db");
        let docs = vec![
            doc("https://example.com/", "root content"),
            doc("https://example.com/a", "page a"),
        ];

        SqliteWriter.write(&docs, &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let mut stmt = conn
            .prepare("SELECT url, length FROM documents ORDER BY position")
            .unwrap();
        let rows: Vec<(String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            rows,
            vec![
                ("https://example.com/".to_string(), 12),
                ("https://example.com/a".to_string(), 6),
            ]
        );
    }

    #[test]
    fn test_rewrite_replaces_previous_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.db");

        SqliteWriter
            .write(&[doc("https://example.com/old", "old")], &path)
            .unwrap();
        SqliteWriter
            .write(&[doc("https://example.com/new", "new")], &path)
            .unwrap();

        let conn = Connection::open(&path).unwrap();
        let urls: Vec<String> = conn
            .prepare("SELECT url FROM documents")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(urls, vec!["https://example.com/new".to_string()]);
    }

    #[test]
    fn test_duplicate_url_fails_without_touching_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.db");
        SqliteWriter
            .write(&[doc("https://example.com/", "first")], &path)
            .unwrap();

        let dupes = vec![
            doc("https://example.com/x", "one"),
            doc("https://example.com/x", "two"),
        ];
        assert!(SqliteWriter.write(&dupes, &path).is_err());

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
