//! Write-then-rename helpers
//!
//! Output is staged in a temporary file next to the target and renamed over
//! it only after it was fully written and synced.

use crate::output::traits::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Creates an empty temporary file in the target's directory
pub(crate) fn staging_file(target: &Path) -> OutputResult<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(NamedTempFile::new_in(dir)?)
}

/// Syncs the staged file and moves it over `target`
pub(crate) fn commit(mut staged: NamedTempFile, target: &Path) -> OutputResult<()> {
    staged.as_file_mut().flush()?;
    staged.as_file_mut().sync_all()?;
    staged
        .persist(target)
        .map_err(|e| OutputError::Persist {
            path: target.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

/// Replaces `target` with whatever `fill` writes
///
/// If `fill` fails the temporary file is dropped (and deleted) and `target`
/// keeps its previous content.
pub(crate) fn replace_file<F>(target: &Path, fill: F) -> OutputResult<()>
where
    F: FnOnce(&mut File) -> OutputResult<()>,
{
    let mut staged = staging_file(target)?;
    fill(staged.as_file_mut())?;
    commit(staged, target)
}
