//! Discovery: resolve a target path to the list of chord sheets to process.
//!
//! ## Why sorted traversal?
//!
//! The walk visits directory entries in file-name order so two runs over the
//! same tree always produce the same batch order, the same progress output,
//! and the same JSON summary. Unreadable entries are logged and skipped
//! rather than failing the batch; a songbook checkout with one bad symlink
//! should still convert everything else.

use crate::error::Chopro2PdfError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions recognised as chord sheets (lowercase, without dot).
pub const SHEET_EXTENSIONS: [&str; 2] = ["chopro", "cho"];

/// Check whether a path has one of the recognised chord-sheet extensions.
///
/// The comparison is case-insensitive, so `SONG.CHOPRO` is picked up too.
pub fn is_chord_sheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SHEET_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Resolve a target path to the chord sheets beneath it.
///
/// * Nonexistent target → [`Chopro2PdfError::TargetNotFound`].
/// * Directory target → every recognised file under it, recursively, sorted.
/// * Single recognised file → a one-element list.
/// * Single unrecognised file → an empty list; the caller converts nothing.
pub fn discover_sheets(target: &Path) -> Result<Vec<PathBuf>, Chopro2PdfError> {
    if !target.exists() {
        return Err(Chopro2PdfError::TargetNotFound {
            path: target.to_path_buf(),
        });
    }

    if target.is_dir() {
        debug!("Scanning directory '{}' for chord sheets", target.display());
        let sheets: Vec<PathBuf> = WalkDir::new(target)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_chord_sheet(p))
            .collect();
        debug!("Found {} chord sheets", sheets.len());
        Ok(sheets)
    } else if is_chord_sheet(target) {
        Ok(vec![target.to_path_buf()])
    } else {
        debug!("'{}' is not a chord sheet, nothing to do", target.display());
        Ok(Vec::new())
    }
}
