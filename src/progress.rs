//! Progress-callback trait for per-sheet conversion events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the batch processes each sheet.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log file, or a GUI without
//! the library knowing anything about how the host application communicates.
//! The batch runs strictly sequentially, so implementations never see two
//! events at once; the trait is still `Send + Sync` so the same callback type
//! can be shared freely behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use chopro2pdf::{BatchProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_sheet_complete(&self, _num: usize, total: usize, _sheet: &Path, _pdf: &Path) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("{done}/{total} sheets done");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the batch as it processes each chord sheet.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Sheet numbers are 1-indexed.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once after discovery, before any sheet is typeset.
    fn on_batch_start(&self, total_sheets: usize) {
        let _ = total_sheets;
    }

    /// Called just before the typesetter is invoked for a sheet.
    fn on_sheet_start(&self, sheet_num: usize, total_sheets: usize, sheet: &Path) {
        let _ = (sheet_num, total_sheets, sheet);
    }

    /// Called when a sheet was typeset successfully.
    fn on_sheet_complete(&self, sheet_num: usize, total_sheets: usize, sheet: &Path, pdf: &Path) {
        let _ = (sheet_num, total_sheets, sheet, pdf);
    }

    /// Called when a sheet failed.
    fn on_sheet_error(&self, sheet_num: usize, total_sheets: usize, sheet: &Path, error: &str) {
        let _ = (sheet_num, total_sheets, sheet, error);
    }

    /// Called once after every sheet has been attempted.
    fn on_batch_complete(&self, total_sheets: usize, success_count: usize) {
        let _ = (total_sheets, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
