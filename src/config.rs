//! Configuration types for batch PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to log a run's configuration and to diff two runs to understand
//! why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::Chopro2PdfError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a chord-sheet-to-PDF batch conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use chopro2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .page_size("a4")
///     .show_diagrams(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// PDF paper size passed to chordpro as `pdf:papersize`. Default: `"a6"`.
    ///
    /// A6 fits a music stand with several sheets side by side, which is how
    /// the songbook this tool grew up with is printed. Any papersize name
    /// chordpro itself accepts is valid here (a4, a5, letter, ...); the value
    /// is passed through verbatim.
    pub page_size: String,

    /// Show chord diagrams above the lyrics. Default: `false`.
    ///
    /// Maps to chordpro's `pdf:diagrams:show`. Off by default because the
    /// sheets also inline the chords between the lyrics, and the diagrams
    /// eat a third of an A6 page.
    pub show_diagrams: bool,

    /// Instrument config names passed to chordpro as `--config=<name>`, in
    /// order. Default: `["ukulele", "ukulele-ly"]`.
    ///
    /// chordpro resolves these against its built-in config directory, so any
    /// name it ships (guitar, mandolin, ...) or an absolute path to a JSON
    /// config file works.
    pub instrument_configs: Vec<String>,

    /// Path to the chordpro executable. Default: `"chordpro"` (resolved via
    /// `PATH`).
    pub chordpro_bin: PathBuf,

    /// Progress callback fired per sheet. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            page_size: "a6".to_string(),
            show_diagrams: false,
            instrument_configs: vec!["ukulele".to_string(), "ukulele-ly".to_string()],
            chordpro_bin: PathBuf::from("chordpro"),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("page_size", &self.page_size)
            .field("show_diagrams", &self.show_diagrams)
            .field("instrument_configs", &self.instrument_configs)
            .field("chordpro_bin", &self.chordpro_bin)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn page_size(mut self, size: impl Into<String>) -> Self {
        self.config.page_size = size.into();
        self
    }

    pub fn show_diagrams(mut self, v: bool) -> Self {
        self.config.show_diagrams = v;
        self
    }

    /// Replace the instrument config list.
    pub fn instrument_configs(mut self, configs: Vec<String>) -> Self {
        self.config.instrument_configs = configs;
        self
    }

    /// Append one instrument config to the list.
    pub fn instrument_config(mut self, name: impl Into<String>) -> Self {
        self.config.instrument_configs.push(name.into());
        self
    }

    pub fn chordpro_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.config.chordpro_bin = bin.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Chopro2PdfError> {
        let c = &self.config;
        if c.page_size.trim().is_empty() {
            return Err(Chopro2PdfError::InvalidConfig(
                "page_size must not be empty".into(),
            ));
        }
        if c.chordpro_bin.as_os_str().is_empty() {
            return Err(Chopro2PdfError::InvalidConfig(
                "chordpro_bin must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_printed_songbook() {
        let c = ConversionConfig::default();
        assert_eq!(c.page_size, "a6");
        assert!(!c.show_diagrams);
        assert_eq!(c.instrument_configs, vec!["ukulele", "ukulele-ly"]);
        assert_eq!(c.chordpro_bin, PathBuf::from("chordpro"));
    }

    #[test]
    fn builder_overrides() {
        let c = ConversionConfig::builder()
            .page_size("letter")
            .show_diagrams(true)
            .instrument_configs(vec!["guitar".into()])
            .instrument_config("guitar-ly")
            .chordpro_bin("/opt/chordpro/bin/chordpro")
            .build()
            .unwrap();
        assert_eq!(c.page_size, "letter");
        assert!(c.show_diagrams);
        assert_eq!(c.instrument_configs, vec!["guitar", "guitar-ly"]);
        assert_eq!(c.chordpro_bin, PathBuf::from("/opt/chordpro/bin/chordpro"));
    }

    #[test]
    fn empty_page_size_rejected() {
        let err = ConversionConfig::builder().page_size("  ").build();
        assert!(matches!(err, Err(Chopro2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn empty_binary_rejected() {
        let err = ConversionConfig::builder().chordpro_bin("").build();
        assert!(matches!(err, Err(Chopro2PdfError::InvalidConfig(_))));
    }
}
