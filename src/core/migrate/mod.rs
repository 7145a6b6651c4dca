//! Flutter color API migration: `.withOpacity(x)` → `.withValues(alpha: x)`.
//!
//! Walks the configured source tree, rewrites each matching file in memory, and
//! writes it back only when the text actually changed. Files are handled one at a
//! time; the first I/O failure stops the walk and files already written stay
//! written.

mod rewrite;
mod walk;

pub use rewrite::{Occurrence, Rewrite, Rewriter, PATTERN, REPLACEMENT};
pub use walk::walk_files;

use crate::config::MigrateConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Types
// ============================================================================

/// A file whose content changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEdit {
    /// Path as walked from the root (e.g. `lib/src/theme.dart`).
    pub file: String,
    /// Number of call sites replaced in this file.
    pub replacements: usize,
    /// Whether the new content was written to disk.
    pub written: bool,
}

/// A single occurrence found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte column (1-indexed).
    pub column: usize,
    pub matched: String,
    pub replacement: String,
    /// The full line the match starts on.
    pub context: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
}

/// Outcome of a full migration pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateResult {
    pub root: String,
    pub files_scanned: usize,
    pub edits: Vec<FileEdit>,
    pub total_replacements: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

impl MigrateResult {
    pub fn files_changed(&self) -> usize {
        self.edits.len()
    }
}

// ============================================================================
// Single file
// ============================================================================

/// Rewrite one file. Returns `None` when the content is unchanged, in which case
/// the file is left untouched. With `write = false` nothing is written either way.
pub fn migrate_file(path: &Path, rewriter: &Rewriter, write: bool) -> Result<Option<FileEdit>> {
    let content = read_source(path)?;
    let rewrite = rewriter.rewrite(&content);

    if rewrite.content == content.as_str() {
        return Ok(None);
    }

    if write {
        std::fs::write(path, rewrite.content.as_bytes()).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
        })?;
    }

    Ok(Some(FileEdit {
        file: display_path(path),
        replacements: rewrite.replacements,
        written: write,
    }))
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", path.display()))))
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

// ============================================================================
// Whole tree
// ============================================================================

/// Migrate every matching file under `config.root`.
///
/// `on_edit` runs right after each changed file is handled, so callers can
/// report progress before the walk finishes (or fails).
pub fn migrate_tree<F>(
    config: &MigrateConfig,
    rewriter: &Rewriter,
    options: MigrateOptions,
    mut on_edit: F,
) -> Result<MigrateResult>
where
    F: FnMut(&FileEdit),
{
    let files = walk_files(&config.root, config)?;
    let write = !options.dry_run;

    log_status!(
        "migrate",
        "Scanning {} ({} files)",
        config.root.display(),
        files.len()
    );

    let mut edits = Vec::new();
    for path in &files {
        if let Some(edit) = migrate_file(path, rewriter, write)? {
            on_edit(&edit);
            edits.push(edit);
        }
    }

    let total_replacements = edits.iter().map(|e| e.replacements).sum();

    log_status!(
        "migrate",
        "{} replacement(s) in {} file(s){}",
        total_replacements,
        edits.len(),
        if write { "" } else { " (dry run)" }
    );

    Ok(MigrateResult {
        root: display_path(&config.root),
        files_scanned: files.len(),
        edits,
        total_replacements,
        applied: write,
    })
}

/// Every occurrence under `config.root`, in file then offset order. Writes nothing.
pub fn find_references(config: &MigrateConfig, rewriter: &Rewriter) -> Result<Vec<Reference>> {
    let files = walk_files(&config.root, config)?;
    let mut references = Vec::new();

    for path in &files {
        let content = read_source(path)?;
        let file = display_path(path);

        for occurrence in rewriter.find(&content) {
            let (line, column, context) = locate(&content, occurrence.start);
            references.push(Reference {
                file: file.clone(),
                line,
                column,
                matched: occurrence.matched,
                replacement: occurrence.replacement,
                context,
            });
        }
    }

    Ok(references)
}

/// 1-indexed line and byte column of `offset`, plus that line's text.
fn locate(content: &str, offset: usize) -> (usize, usize, String) {
    let before = &content[..offset];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = before.matches('\n').count() + 1;
    let line_end = content[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(content.len());

    let context = content[line_start..line_end].trim_end_matches('\r').to_string();
    (line, offset - line_start + 1, context)
}
