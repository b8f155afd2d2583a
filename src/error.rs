//! Error types for the chopro2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Chopro2PdfError`] — **Fatal**: the batch cannot proceed at all
//!   (target path missing, no enclosing git repository, dirty working tree).
//!   Returned as `Err(Chopro2PdfError)` from the top-level entry points.
//!
//! * [`SheetError`] — **Non-fatal**: a single chord sheet failed (unreadable
//!   file, typesetter refused the input) but all other sheets are fine.
//!   Stored inside [`crate::output::SheetResult`] so callers can inspect
//!   partial success rather than losing the whole batch to one bad file.
//!
//! The separation lets callers decide their own tolerance: abort on the first
//! sheet failure, log and continue, or collect all errors for a post-run
//! report. The CLI logs and continues.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the chopro2pdf library.
///
/// Sheet-level failures use [`SheetError`] and are stored in
/// [`crate::output::SheetResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Chopro2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The target path does not exist.
    #[error("no such file or folder '{path}'")]
    TargetNotFound { path: PathBuf },

    // ── Repository errors ─────────────────────────────────────────────────
    /// The target is not inside a git repository.
    ///
    /// Source files are rewritten in place before typesetting and the
    /// rewrite is undone with a checkout afterwards. Without a repository
    /// there is nothing to restore from.
    #[error(
        "'{path}' is not inside a git repository\n\
         chopro2pdf rewrites source files in place and relies on git to restore them."
    )]
    NotARepository { path: PathBuf },

    /// Chord-sheet files already have uncommitted changes.
    ///
    /// Running would overwrite those changes during the restore step, so the
    /// batch refuses to start until the tree is clean.
    #[error(
        "Cannot operate on a repo with uncommitted chord-sheet changes:\n{}\n\
         Commit or stash these files first.",
        .files.join("\n")
    )]
    DirtySheets { files: Vec<String> },

    /// An underlying git operation failed.
    #[error(transparent)]
    Git(#[from] git2::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single chord sheet.
///
/// Stored alongside [`crate::output::SheetResult`] when a sheet fails.
/// The overall batch continues regardless.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum SheetError {
    /// The sheet could not be read from disk.
    #[error("failed on file '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The rewritten sheet could not be written back.
    ///
    /// The file may be left partially rewritten; the git restore step
    /// recovers the original content.
    #[error("failed on file '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },

    /// The typesetter process could not be launched at all.
    #[error("'{path}': failed to launch '{command}': {detail}\nIs chordpro installed and on PATH?")]
    TypesetterLaunchFailed {
        path: PathBuf,
        command: String,
        detail: String,
    },

    /// The typesetter ran but reported failure.
    #[error("'{path}': typesetter exited with {}", .code.map_or_else(|| String::from("a signal"), |c| format!("code {c}")))]
    TypesetterFailed { path: PathBuf, code: Option<i32> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_not_found_display() {
        let e = Chopro2PdfError::TargetNotFound {
            path: PathBuf::from("missing-dir"),
        };
        assert_eq!(e.to_string(), "no such file or folder 'missing-dir'");
    }

    #[test]
    fn dirty_sheets_display_lists_files() {
        let e = Chopro2PdfError::DirtySheets {
            files: vec!["song.chopro".into(), "intro.cho".into()],
        };
        let msg = e.to_string();
        assert!(msg.starts_with("Cannot operate on a repo"), "got: {msg}");
        assert!(msg.contains("song.chopro"));
        assert!(msg.contains("intro.cho"));
    }

    #[test]
    fn typesetter_failed_display_with_code() {
        let e = SheetError::TypesetterFailed {
            path: PathBuf::from("song.cho"),
            code: Some(2),
        };
        assert!(e.to_string().contains("code 2"));
    }

    #[test]
    fn typesetter_failed_display_on_signal() {
        let e = SheetError::TypesetterFailed {
            path: PathBuf::from("song.cho"),
            code: None,
        };
        assert!(e.to_string().contains("a signal"));
    }
}
