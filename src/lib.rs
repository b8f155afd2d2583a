//! # chopro2pdf
//!
//! Batch-convert ChordPro song sheets (`.chopro`/`.cho`) to PDF via the
//! external `chordpro` typesetter, rewriting OnSong-style `&blue` colour
//! markers into ChordPro's native `{textcolour}` directives first and
//! restoring the sources from git afterwards.
//!
//! ## Why this crate?
//!
//! The songbook sources carry a proprietary OnSong colour marker that
//! ChordPro does not understand, so the files must be rewritten *in place*
//! before typesetting and put back afterwards. Doing that by hand for a
//! hundred sheets before every print run is exactly the kind of chore that
//! gets skipped; this crate wires the rewrite, the per-file typesetter
//! invocation, and the git restore into one guarded batch.
//!
//! ## Pipeline Overview
//!
//! ```text
//! songbook/
//!  │
//!  ├─ 0. Guard     refuse to run on uncommitted chord-sheet changes
//!  ├─ 1. Discover  walk the target for .chopro/.cho files
//!  ├─ 2. Recolour  &blue markers → {textcolour} directives, in place
//!  ├─ 3. Typeset   one blocking chordpro process per sheet
//!  └─ 4. Restore   git checkout of *.chopro / *.cho from HEAD
//! ```
//!
//! Everything is sequential and blocking; the unit of failure is one sheet,
//! and a failed sheet never stops the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chopro2pdf::{convert_all, recolour_target, ConversionConfig, Workspace};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let songbook = Path::new("songs");
//!
//!     let workspace = Workspace::discover(songbook)?;
//!     workspace.ensure_clean_sheets()?;
//!
//!     recolour_target(songbook)?;
//!     let config = ConversionConfig::builder().page_size("a4").build()?;
//!     let output = convert_all(songbook, &config);
//!     workspace.restore_sheets()?;
//!
//!     let output = output?;
//!     println!(
//!         "{}/{} sheets converted",
//!         output.stats.converted, output.stats.discovered
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `chopro2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! chopro2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod repo;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::convert_all;
pub use error::{Chopro2PdfError, SheetError};
pub use output::{BatchOutput, BatchStats, SheetResult};
pub use pipeline::discover::{discover_sheets, is_chord_sheet, SHEET_EXTENSIONS};
pub use pipeline::recolour::{apply_colour_markers, recolour_target, RecolourSummary};
pub use pipeline::typeset::{chordpro_args, pdf_output_path};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use repo::Workspace;
