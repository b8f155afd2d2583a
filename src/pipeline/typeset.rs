//! Typesetting: one blocking chordpro invocation per chord sheet.
//!
//! ## Why shell out instead of linking a renderer?
//!
//! ChordPro's PDF engine is a mature Perl program with a decade of layout
//! fixes baked in; reimplementing even a fraction of it is a losing game.
//! The price is a process spawn per sheet, which is noise next to the
//! typesetting itself. Invocations are strictly sequential and block until
//! the child exits; the child inherits stdout/stderr so chordpro's own
//! diagnostics reach the terminal unfiltered.

use crate::config::ConversionConfig;
use crate::error::SheetError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Fixed layout options passed to every chordpro invocation.
///
/// Margins and head/foot spacing are tuned for the A6 songbook print; they
/// are deliberately not configurable so every sheet in the book comes out
/// identical.
const LAYOUT_DEFINES: [&str; 9] = [
    "--define=settings:inline-chords=true",
    "--define=pdf:even-odd-pages=0",
    "--define=pdf:margintop=70",
    "--define=pdf:marginbottom=0",
    "--define=pdf:marginleft=10",
    "--define=pdf:marginright=50",
    "--define=pdf:headspace=50",
    "--define=pdf:footspace=10",
    "--define=pdf:head-first-only=true",
];

/// Build the chordpro argument list for this configuration, without the
/// per-sheet `--output` and input-path arguments.
pub fn chordpro_args(config: &ConversionConfig) -> Vec<String> {
    let mut args: Vec<String> = Vec::with_capacity(LAYOUT_DEFINES.len() + 8);

    for instrument in &config.instrument_configs {
        args.push(format!("--config={instrument}"));
    }
    args.push(format!(
        "--define=pdf:diagrams:show={}",
        config.show_diagrams
    ));
    args.extend(LAYOUT_DEFINES.iter().map(|s| s.to_string()));
    args.push("--define=pdf:fonts:chord:color=red".to_string());
    args.push(format!("--define=pdf:papersize={}", config.page_size));
    args.push("--text-font=helvetica".to_string());
    args.push("--chord-font=helvetica".to_string());

    args
}

/// Derive the PDF output path for a chord sheet: same location, `.pdf`
/// extension.
pub fn pdf_output_path(sheet: &Path) -> PathBuf {
    sheet.with_extension("pdf")
}

/// Typeset a single chord sheet to PDF.
///
/// Blocks until the chordpro process exits. A failure to launch (binary not
/// found) and a non-zero exit status are both reported as a [`SheetError`]
/// so the batch can continue with the next sheet.
pub fn typeset_sheet(sheet: &Path, config: &ConversionConfig) -> Result<PathBuf, SheetError> {
    let pdf = pdf_output_path(sheet);
    debug!("Typesetting '{}' -> '{}'", sheet.display(), pdf.display());

    let status = Command::new(&config.chordpro_bin)
        .args(chordpro_args(config))
        .arg(format!("--output={}", pdf.display()))
        .arg(sheet)
        .status()
        .map_err(|e| SheetError::TypesetterLaunchFailed {
            path: sheet.to_path_buf(),
            command: config.chordpro_bin.display().to_string(),
            detail: e.to_string(),
        })?;

    if !status.success() {
        return Err(SheetError::TypesetterFailed {
            path: sheet.to_path_buf(),
            code: status.code(),
        });
    }

    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;

    #[test]
    fn default_argument_list_is_exactly_the_songbook_profile() {
        let config = ConversionConfig::default();
        let expected = vec![
            "--config=ukulele",
            "--config=ukulele-ly",
            "--define=pdf:diagrams:show=false",
            "--define=settings:inline-chords=true",
            "--define=pdf:even-odd-pages=0",
            "--define=pdf:margintop=70",
            "--define=pdf:marginbottom=0",
            "--define=pdf:marginleft=10",
            "--define=pdf:marginright=50",
            "--define=pdf:headspace=50",
            "--define=pdf:footspace=10",
            "--define=pdf:head-first-only=true",
            "--define=pdf:fonts:chord:color=red",
            "--define=pdf:papersize=a6",
            "--text-font=helvetica",
            "--chord-font=helvetica",
        ];
        assert_eq!(chordpro_args(&config), expected);
    }

    #[test]
    fn page_size_and_diagrams_flow_into_arguments() {
        let config = ConversionConfig::builder()
            .page_size("a4")
            .show_diagrams(true)
            .build()
            .unwrap();
        let args = chordpro_args(&config);
        assert!(args.contains(&"--define=pdf:papersize=a4".to_string()));
        assert!(args.contains(&"--define=pdf:diagrams:show=true".to_string()));
    }

    #[test]
    fn instrument_configs_come_first_in_order() {
        let config = ConversionConfig::builder()
            .instrument_configs(vec!["guitar".into(), "guitar-ly".into()])
            .build()
            .unwrap();
        let args = chordpro_args(&config);
        assert_eq!(args[0], "--config=guitar");
        assert_eq!(args[1], "--config=guitar-ly");
    }

    #[test]
    fn pdf_path_replaces_the_extension() {
        assert_eq!(
            pdf_output_path(Path::new("songs/mercy.chopro")),
            PathBuf::from("songs/mercy.pdf")
        );
        assert_eq!(
            pdf_output_path(Path::new("intro.cho")),
            PathBuf::from("intro.pdf")
        );
        // A directory named after the extension stays intact.
        assert_eq!(
            pdf_output_path(Path::new("music.cho/song.cho")),
            PathBuf::from("music.cho/song.pdf")
        );
    }

    #[test]
    fn missing_binary_is_a_launch_error() {
        let config = ConversionConfig::builder()
            .chordpro_bin("/definitely/not/chordpro")
            .build()
            .unwrap();
        let err = typeset_sheet(Path::new("song.cho"), &config).unwrap_err();
        assert!(matches!(err, SheetError::TypesetterLaunchFailed { .. }));
    }
}
