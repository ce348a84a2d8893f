//! Flat text document output
//!
//! Each document is written as a banner-delimited block:
//!
//! ```text
//! ================...
//! URL: <url>
//! TITLE: <title>
//! ================...
//!
//! <content>
//!
//! ================...
//!
//! ```

use crate::crawler::Document;
use crate::output::atomic::replace_file;
use crate::output::traits::{DocumentWriter, OutputResult};
use std::io::Write;
use std::path::Path;

const BANNER_WIDTH: usize = 80;

/// Writes documents as banner-delimited plain text
#[derive(Debug, Default, Clone, Copy)]
pub struct TextWriter;

impl DocumentWriter for TextWriter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn write(&self, documents: &[Document], path: &Path) -> OutputResult<()> {
        let text = format_text(documents);
        replace_file(path, |file| {
            file.write_all(text.as_bytes())?;
            Ok(())
        })
    }
}

/// Formats documents as one text blob
pub fn format_text(documents: &[Document]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    for doc in documents {
        out.push_str(&format!("{}\n", banner));
        out.push_str(&format!("URL: {}\n", doc.url));
        out.push_str(&format!("TITLE: {}\n", doc.title));
        out.push_str(&format!("{}\n\n", banner));
        out.push_str(&doc.content);
        out.push_str(&format!("\n\n{}\n\n", banner));
    }

    out
}
