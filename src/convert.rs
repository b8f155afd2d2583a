//! Eager (full-batch) conversion entry point.
//!
//! Discovers every chord sheet under the target, then typesets them one by
//! one, strictly sequentially. A sheet that fails is recorded and the batch
//! moves on; only a missing target is fatal. Callers get every per-sheet
//! outcome in the returned [`BatchOutput`] rather than just the first error.

use crate::config::ConversionConfig;
use crate::error::Chopro2PdfError;
use crate::output::{BatchOutput, BatchStats, SheetResult};
use crate::pipeline::{discover, typeset};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every chord sheet under `target` to PDF.
///
/// This is the primary entry point for the library. `target` may be a
/// directory (scanned recursively), a single `.chopro`/`.cho` file, or an
/// unrecognised file (in which case nothing happens and the output is
/// empty).
///
/// # Errors
/// Returns `Err(Chopro2PdfError)` only for fatal conditions, currently a
/// nonexistent target. Typesetter failures are per-sheet: check
/// `output.stats.failed` and [`BatchOutput::failures`].
pub fn convert_all(
    target: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchOutput, Chopro2PdfError> {
    let total_start = Instant::now();
    let target = target.as_ref();
    info!("Starting batch conversion: {}", target.display());

    // ── Step 1: Discover sheets ──────────────────────────────────────────
    let sheets = discover::discover_sheets(target)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(sheets.len());
    }

    // ── Step 2: Typeset each sheet, sequentially ─────────────────────────
    let typeset_start = Instant::now();
    let mut results: Vec<SheetResult> = Vec::with_capacity(sheets.len());
    for (i, sheet) in sheets.iter().enumerate() {
        let sheet_num = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_sheet_start(sheet_num, sheets.len(), sheet);
        }

        match typeset::typeset_sheet(sheet, config) {
            Ok(pdf) => {
                debug!("Converted '{}'", sheet.display());
                if let Some(ref cb) = config.progress_callback {
                    cb.on_sheet_complete(sheet_num, sheets.len(), sheet, &pdf);
                }
                results.push(SheetResult {
                    path: sheet.clone(),
                    pdf_path: Some(pdf),
                    error: None,
                });
            }
            Err(e) => {
                warn!("{e}");
                if let Some(ref cb) = config.progress_callback {
                    cb.on_sheet_error(sheet_num, sheets.len(), sheet, &e.to_string());
                }
                results.push(SheetResult {
                    path: sheet.clone(),
                    pdf_path: None,
                    error: Some(e),
                });
            }
        }
    }
    let typeset_duration_ms = typeset_start.elapsed().as_millis() as u64;

    // ── Step 3: Assemble stats ───────────────────────────────────────────
    let converted = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - converted;
    let stats = BatchStats {
        discovered: results.len(),
        converted,
        failed,
        typeset_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Batch complete: {}/{} sheets converted in {}ms",
        converted, stats.discovered, stats.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(stats.discovered, converted);
    }

    Ok(BatchOutput {
        sheets: results,
        stats,
    })
}
