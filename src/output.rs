//! Result types returned by a batch conversion.
//!
//! Everything here is plain serialisable data so the CLI can print it as
//! JSON and tests can assert on it directly.

use crate::error::SheetError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The outcome of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Per-sheet results, in conversion order.
    pub sheets: Vec<SheetResult>,
    /// Aggregate counters and timings.
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Iterate over the sheets that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SheetResult> {
        self.sheets.iter().filter(|s| s.error.is_some())
    }
}

/// The outcome of converting one chord sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetResult {
    /// The source chord sheet.
    pub path: PathBuf,
    /// The PDF that was produced, when conversion succeeded.
    pub pdf_path: Option<PathBuf>,
    /// Why this sheet failed, if it did.
    pub error: Option<SheetError>,
}

/// Aggregate statistics for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// Chord sheets found under the target.
    pub discovered: usize,
    /// Sheets for which the typesetter produced a PDF.
    pub converted: usize,
    /// Sheets that failed (read error, typesetter failure).
    pub failed: usize,
    /// Wall-clock time spent inside typesetter invocations.
    pub typeset_duration_ms: u64,
    /// Wall-clock time for the whole batch, discovery included.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_iterator_filters() {
        let output = BatchOutput {
            sheets: vec![
                SheetResult {
                    path: PathBuf::from("a.chopro"),
                    pdf_path: Some(PathBuf::from("a.pdf")),
                    error: None,
                },
                SheetResult {
                    path: PathBuf::from("b.cho"),
                    pdf_path: None,
                    error: Some(SheetError::TypesetterFailed {
                        path: PathBuf::from("b.cho"),
                        code: Some(1),
                    }),
                },
            ],
            stats: BatchStats {
                discovered: 2,
                converted: 1,
                failed: 1,
                typeset_duration_ms: 0,
                total_duration_ms: 0,
            },
        };
        let failed: Vec<_> = output.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path, PathBuf::from("b.cho"));
    }

    #[test]
    fn output_round_trips_through_json() {
        let output = BatchOutput {
            sheets: vec![SheetResult {
                path: PathBuf::from("song.chopro"),
                pdf_path: Some(PathBuf::from("song.pdf")),
                error: None,
            }],
            stats: BatchStats {
                discovered: 1,
                converted: 1,
                failed: 0,
                typeset_duration_ms: 12,
                total_duration_ms: 15,
            },
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: BatchOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stats.converted, 1);
        assert_eq!(back.sheets[0].pdf_path, Some(PathBuf::from("song.pdf")));
    }
}
