//! CLI binary for chopro2pdf.
//!
//! A thin shim over the library crate: maps CLI flags to
//! `ConversionConfig`, runs guard → recolour → convert → restore, and
//! prints results.

use anyhow::{Context, Result};
use chopro2pdf::{
    convert_all, recolour_target, BatchProgressCallback, ConversionConfig, ProgressCallback,
    Workspace,
};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-sheet log
/// lines using [indicatif]. The batch is sequential, so a single start-time
/// slot is enough for elapsed reporting.
struct CliProgressCallback {
    bar: ProgressBar,
    current_start: Mutex<Option<Instant>>,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_batch_start` (called after discovery).
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Looking for chord sheets…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            current_start: Mutex::new(None),
        })
    }

    fn elapsed_secs(&self) -> f64 {
        self.current_start
            .lock()
            .unwrap()
            .take()
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_sheets: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} sheets  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_sheets as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Typesetting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Typesetting {total_sheets} chord sheets…"))
        ));
    }

    fn on_sheet_start(&self, _sheet_num: usize, _total: usize, sheet: &Path) {
        *self.current_start.lock().unwrap() = Some(Instant::now());
        self.bar.set_message(sheet.display().to_string());
    }

    fn on_sheet_complete(&self, sheet_num: usize, total: usize, _sheet: &Path, pdf: &Path) {
        let secs = self.elapsed_secs();
        self.bar.println(format!(
            "  {} Sheet {:>3}/{:<3}  {}  {}",
            green("✓"),
            sheet_num,
            total,
            pdf.display(),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_sheet_error(&self, sheet_num: usize, total: usize, _sheet: &Path, error: &str) {
        let secs = self.elapsed_secs();

        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}\u{2026}", &error[..79])
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Sheet {:>3}/{:<3}  {}  {}",
            red("✗"),
            sheet_num,
            total,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_sheets: usize, success_count: usize) {
        let failed = total_sheets.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} sheets converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} sheets converted  ({} failed)",
                if failed == total_sheets {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_sheets,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every sheet under the current directory (A6, no diagrams)
  chopro2pdf

  # Convert one songbook folder to A4 with chord diagrams
  chopro2pdf songs/ --pagesize a4 --showchords true

  # Convert a single sheet
  chopro2pdf songs/mercy.chopro

  # Guitar songbook with a custom chordpro install
  chopro2pdf --config guitar --chordpro /opt/chordpro/bin/chordpro

  # Machine-readable batch summary
  chopro2pdf songs/ --json > summary.json

WHAT A RUN DOES:
  1. Refuses to start if *.chopro / *.cho files have uncommitted changes
     (the run ends with a git checkout of those pathspecs, which would
     destroy them).
  2. Rewrites OnSong-style "&blue" colour markers into ChordPro
     {textcolour} directives, in place.
  3. Runs the chordpro typesetter once per sheet, writing song.pdf next
     to song.chopro.
  4. Restores the rewritten sources from HEAD.

ENVIRONMENT VARIABLES:
  CHOPRO2PDF_PAGESIZE     Default for --pagesize
  CHOPRO2PDF_BIN          Default for --chordpro
  CHOPRO2PDF_NO_PROGRESS  Disable the progress bar

SETUP:
  chordpro 6.x must be installed and on PATH (or pointed to with
  --chordpro). See https://www.chordpro.org for install instructions.
"#;

/// Batch-convert ChordPro song sheets to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "chopro2pdf",
    version,
    about = "Batch-convert ChordPro song sheets (.chopro/.cho) to PDF",
    long_about = "Batch-convert ChordPro song sheets (.chopro/.cho) to PDF via the chordpro \
typesetter. OnSong-style &blue colour markers are rewritten into ChordPro {textcolour} \
directives before typesetting and the sources are restored from git afterwards.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Chord-sheet file or directory to convert.
    #[arg(default_value = ".")]
    target: PathBuf,

    /// PDF paper size passed to chordpro (a4, a5, a6, letter, ...).
    #[arg(long, env = "CHOPRO2PDF_PAGESIZE", default_value = "a6")]
    pagesize: String,

    /// Show chord diagrams above the lyrics (true/false).
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = false
    )]
    showchords: bool,

    /// Instrument config passed to chordpro as --config (repeatable).
    #[arg(long = "config", value_name = "NAME")]
    instrument_configs: Vec<String>,

    /// Path to the chordpro executable.
    #[arg(long, env = "CHOPRO2PDF_BIN", default_value = "chordpro")]
    chordpro: PathBuf,

    /// Print the batch summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "CHOPRO2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Target check ─────────────────────────────────────────────────────
    // A missing target is a diagnostic, not a failure: nothing has been
    // touched yet and there is nothing to clean up.
    if !cli.target.exists() {
        eprintln!("no such file or folder '{}'", cli.target.display());
        return Ok(());
    }

    // ── Repository guard ─────────────────────────────────────────────────
    let guard_root = if cli.target.is_dir() {
        cli.target.as_path()
    } else {
        cli.target.parent().unwrap_or(Path::new("."))
    };
    let workspace = Workspace::discover(guard_root)?;
    workspace.ensure_clean_sheets()?;

    // ── Recolour ─────────────────────────────────────────────────────────
    let recoloured = recolour_target(&cli.target)?;
    if !cli.quiet && !cli.json && !recoloured.rewritten.is_empty() {
        eprintln!(
            "{} {} sheets recoloured for typesetting",
            cyan("◆"),
            recoloured.rewritten.len()
        );
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .page_size(&cli.pagesize)
        .show_diagrams(cli.showchords)
        .chordpro_bin(&cli.chordpro);
    if !cli.instrument_configs.is_empty() {
        builder = builder.instrument_configs(cli.instrument_configs.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion, then restore the sources no matter what ──────────
    let result = convert_all(&cli.target, &config);

    if !recoloured.rewritten.is_empty() {
        if let Err(e) = workspace.restore_sheets() {
            eprintln!(
                "{} failed to restore chord sheets from git: {e}\n  \
                 run `git restore '*.chopro' '*.cho'` by hand",
                red("✘")
            );
        }
    }

    let output = result.context("Batch conversion failed")?;

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise batch summary")?
        );
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled;
        // otherwise the callback already printed the final tick line.
        eprintln!(
            "Converted {}/{} sheets in {}ms",
            output.stats.converted, output.stats.discovered, output.stats.total_duration_ms
        );
        for failure in output.failures() {
            if let Some(ref e) = failure.error {
                eprintln!("  {e}");
            }
        }
    }

    Ok(())
}
