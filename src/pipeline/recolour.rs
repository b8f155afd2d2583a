//! Recolouring: rewrite OnSong-style `&blue` markers into ChordPro directives.
//!
//! ## Why is this rewrite necessary?
//!
//! The sheets were originally maintained in OnSong, which colour-codes lyric
//! lines with an inline `&blue:` marker. ChordPro knows nothing about that
//! syntax; its native equivalent is a pair of `{textcolour: blue}` /
//! `{textcolour}` directives bracketing the coloured lines. This module
//! performs that translation as a single pass over each file.
//!
//! A "coloured region" is a maximal run of *consecutive* lines that each
//! carry the marker. The scan keeps one boolean flag per file:
//!
//! - marker seen while outside a region → emit `{textcolour: blue}`, enter
//! - no marker while inside a region → emit `{textcolour}`, leave
//! - inside a region, the marker substring is stripped from the line before
//!   it is emitted; outside, lines pass through byte-for-byte
//! - a file ending inside a region gets a closing `{textcolour}`
//!
//! The transform itself is a pure function (`&str → String`) with the file
//! I/O kept at a thin boundary, so the scanner is testable without touching
//! a filesystem. Files are rewritten **in place**; there is no rollback and
//! a mid-write failure leaves a partially rewritten file. Recovery is the
//! job of the git restore step that ends every run.

use crate::error::{Chopro2PdfError, SheetError};
use crate::pipeline::discover;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Detects the marker: `&blue` with an optional trailing colon.
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"&blue:?").unwrap());

/// Strips the marker from a line inside a region: one optional character
/// before the marker, the optional colon, an optional slash, and any
/// trailing spaces all go with it.
static MARKER_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r".?&blue:?/? *").unwrap());

/// Directive opening a coloured region in ChordPro markup.
const REGION_START: &str = "{textcolour: blue}\n";
/// Directive closing a coloured region.
const REGION_END: &str = "{textcolour}\n";

/// Rewrite every `&blue` marker region in `input` into ChordPro directives.
///
/// Marker-free input is returned byte-for-byte unchanged, including any
/// missing final newline. Lines that are touched by the rewrite are always
/// newline-terminated in the output.
///
/// # Example
/// ```rust
/// use chopro2pdf::apply_colour_markers;
///
/// assert_eq!(
///     apply_colour_markers("&blue: text"),
///     "{textcolour: blue}\ntext\n{textcolour}\n",
/// );
/// ```
pub fn apply_colour_markers(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 64);
    let mut in_region = false;

    for line in input.split_inclusive('\n') {
        let marked = MARKER.is_match(line);
        if !in_region && marked {
            in_region = true;
            out.push_str(REGION_START);
        } else if in_region && !marked {
            in_region = false;
            out.push_str(REGION_END);
        }

        if in_region {
            out.push_str(&MARKER_STRIP.replace_all(line, ""));
            if !line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }

    if in_region {
        out.push_str(REGION_END);
    }

    out
}

/// Rewrite one chord sheet in place.
///
/// Returns `Ok(true)` when the file was changed on disk, `Ok(false)` when it
/// contained no markers and was left untouched.
pub fn recolour_file(path: &Path) -> Result<bool, SheetError> {
    let text = fs::read_to_string(path).map_err(|e| SheetError::ReadFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let patched = apply_colour_markers(&text);
    if patched == text {
        return Ok(false);
    }

    fs::write(path, &patched).map_err(|e| SheetError::WriteFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    debug!("Recoloured '{}'", path.display());
    Ok(true)
}

/// What [`recolour_target`] did to a tree.
#[derive(Debug, Clone, Default)]
pub struct RecolourSummary {
    /// Files rewritten on disk.
    pub rewritten: Vec<std::path::PathBuf>,
    /// Files scanned but left untouched.
    pub unchanged: usize,
    /// Files that could not be read or written back.
    pub failed: usize,
}

/// Recolour every chord sheet under `target`.
///
/// Discovery follows the same rules as conversion, so exactly the files that
/// will be typeset get rewritten. Per-file I/O errors are logged and counted
/// but never abort the pass; the next file may still be fine.
pub fn recolour_target(target: impl AsRef<Path>) -> Result<RecolourSummary, Chopro2PdfError> {
    let target = target.as_ref();
    let sheets = discover::discover_sheets(target)?;

    let mut summary = RecolourSummary::default();
    for sheet in &sheets {
        match recolour_file(sheet) {
            Ok(true) => summary.rewritten.push(sheet.clone()),
            Ok(false) => summary.unchanged += 1,
            Err(e) => {
                warn!("{e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "Recoloured {}/{} chord sheets under '{}'",
        summary.rewritten.len(),
        sheets.len(),
        target.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn marker_free_input_is_identity() {
        let input = "{title: Mercy}\n[C]Down by the [F]river\n\nchorus line\n";
        assert_eq!(apply_colour_markers(input), input);
    }

    #[test]
    fn marker_free_input_without_final_newline_is_identity() {
        let input = "[C]last line, no newline";
        assert_eq!(apply_colour_markers(input), input);
    }

    #[test]
    fn single_marker_line_brackets_with_directives() {
        assert_eq!(
            apply_colour_markers("&blue: text"),
            "{textcolour: blue}\ntext\n{textcolour}\n",
        );
    }

    #[test]
    fn marker_without_colon_also_starts_a_region() {
        let out = apply_colour_markers("&blue chorus\n");
        assert_eq!(out, "{textcolour: blue}\nchorus\n{textcolour}\n");
    }

    #[test]
    fn region_spans_consecutive_marker_lines() {
        let input = "verse\n&blue: one\n&blue: two\nbridge\n";
        let expected = "verse\n{textcolour: blue}\none\ntwo\n{textcolour}\nbridge\n";
        assert_eq!(apply_colour_markers(input), expected);
    }

    #[test]
    fn region_closes_at_end_of_file() {
        let input = "verse\n&blue: outro\n";
        let expected = "verse\n{textcolour: blue}\noutro\n{textcolour}\n";
        assert_eq!(apply_colour_markers(input), expected);
    }

    #[test]
    fn blank_line_ends_a_region() {
        let input = "&blue: one\n\n&blue: two\n";
        let expected =
            "{textcolour: blue}\none\n{textcolour}\n\n{textcolour: blue}\ntwo\n{textcolour}\n";
        assert_eq!(apply_colour_markers(input), expected);
    }

    #[test]
    fn strip_removes_preceding_character_and_trailing_slash() {
        // The marker often rides on a chord or a slash in the OnSong source;
        // one character before it and a trailing slash are swallowed too.
        let out = apply_colour_markers(" &blue:/ chorus line\n");
        assert_eq!(out, "{textcolour: blue}\nchorus line\n{textcolour}\n");
    }

    #[test]
    fn strip_removes_every_occurrence_on_the_line() {
        let out = apply_colour_markers("&blue: la la &blue: la\n");
        assert_eq!(out, "{textcolour: blue}\nla lala\n{textcolour}\n");
    }

    #[test]
    fn crlf_line_inside_region_keeps_its_ending() {
        let out = apply_colour_markers("&blue: text\r\nplain\r\n");
        assert_eq!(out, "{textcolour: blue}\ntext\r\n{textcolour}\nplain\r\n");
    }

    #[test]
    fn recolour_file_reports_change() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song.chopro");
        fs::write(&path, "intro\n&blue: hook\n").unwrap();

        assert!(recolour_file(&path).unwrap());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("{textcolour: blue}"));
        assert!(!text.contains("&blue"));
    }

    #[test]
    fn recolour_file_leaves_plain_sheets_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song.cho");
        fs::write(&path, "just lyrics\n").unwrap();

        assert!(!recolour_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "just lyrics\n");
    }

    #[test]
    fn recolour_target_walks_the_tree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sets")).unwrap();
        fs::write(temp.path().join("a.chopro"), "&blue: x\n").unwrap();
        fs::write(temp.path().join("sets/b.cho"), "plain\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "&blue: not a sheet\n").unwrap();

        let summary = recolour_target(temp.path()).unwrap();
        assert_eq!(summary.rewritten.len(), 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.failed, 0);
        // Non-sheet files are never touched, marker or not.
        assert_eq!(
            fs::read_to_string(temp.path().join("notes.txt")).unwrap(),
            "&blue: not a sheet\n"
        );
    }

    #[test]
    fn recolour_target_missing_path_errors() {
        let err = recolour_target("/no/such/songbook").unwrap_err();
        assert!(matches!(err, Chopro2PdfError::TargetNotFound { .. }));
    }
}
