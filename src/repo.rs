//! Repository guard and restore around the in-place rewrite.
//!
//! ## Why git is a hard requirement
//!
//! The recolour stage rewrites chord sheets on disk so the external
//! typesetter sees ChordPro-native markup. The sources of truth are the
//! committed files with their original OnSong markers, so every run ends by
//! checking the sheets out from HEAD again. Two consequences:
//!
//! * running outside a git repository is refused up front, and
//! * running with *uncommitted* chord-sheet changes is refused too, because
//!   the closing checkout would silently destroy them.
//!
//! Only the two chord-sheet pathspecs are ever touched; the guard and the
//! restore both ignore everything else in the tree.

use crate::error::Chopro2PdfError;
use crate::pipeline::discover::is_chord_sheet;
use git2::build::CheckoutBuilder;
use git2::{Repository, Status, StatusOptions};
use std::path::Path;
use tracing::{debug, info};

/// Pathspecs covering the files the rewrite may touch.
const SHEET_PATHSPECS: [&str; 2] = ["*.chopro", "*.cho"];

/// The git repository enclosing the songbook.
pub struct Workspace {
    repo: Repository,
}

impl Workspace {
    /// Open the repository enclosing `path`, searching parent directories
    /// the way `git` itself does.
    pub fn discover(path: &Path) -> Result<Self, Chopro2PdfError> {
        let repo = Repository::discover(path).map_err(|_| Chopro2PdfError::NotARepository {
            path: path.to_path_buf(),
        })?;
        debug!(
            "Using repository at '{}'",
            repo.workdir().unwrap_or_else(|| repo.path()).display()
        );
        Ok(Self { repo })
    }

    /// The repository's working directory, if it has one.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// List chord-sheet files with uncommitted changes, sorted.
    ///
    /// Covers worktree modifications, staged changes, and untracked files;
    /// any of them would be clobbered or confused by the closing restore.
    pub fn dirty_sheets(&self) -> Result<Vec<String>, Chopro2PdfError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;

        let uncommitted = Status::WT_NEW
            | Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_RENAMED
            | Status::WT_TYPECHANGE
            | Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;

        let mut dirty: Vec<String> = statuses
            .iter()
            .filter(|entry| entry.status().intersects(uncommitted))
            .filter_map(|entry| entry.path().map(str::to_string))
            .filter(|path| is_chord_sheet(Path::new(path)))
            .collect();
        dirty.sort();
        Ok(dirty)
    }

    /// Refuse to proceed when any chord sheet has uncommitted changes.
    pub fn ensure_clean_sheets(&self) -> Result<(), Chopro2PdfError> {
        let dirty = self.dirty_sheets()?;
        if dirty.is_empty() {
            Ok(())
        } else {
            Err(Chopro2PdfError::DirtySheets { files: dirty })
        }
    }

    /// Check the chord-sheet pathspecs out from HEAD, discarding the
    /// recolour rewrite.
    ///
    /// The equivalent of `git restore '*.chopro' '*.cho'`. Untracked files
    /// and everything outside the two pathspecs are left alone.
    pub fn restore_sheets(&self) -> Result<(), Chopro2PdfError> {
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        for pattern in SHEET_PATHSPECS {
            checkout.path(pattern);
        }
        self.repo.checkout_head(Some(&mut checkout))?;
        info!("Restored chord sheets from HEAD");
        Ok(())
    }
}
