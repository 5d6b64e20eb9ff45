//! Shared configuration loader for the mdlg toolchain.
//!
//! `defaults/mdlg.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdlgConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdlg_convert::{ConvertError, ConvertOptions, TocLevels};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdlg.default.toml");

/// Top-level configuration consumed by mdlg applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdlgConfig {
    pub convert: ConvertConfig,
}

/// Conversion knobs, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub toc_levels: u8,
    pub internal_links: bool,
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl MdlgConfig {
    /// Validate the conversion section into converter options.
    pub fn convert_options(&self) -> Result<ConvertOptions, ConvertError> {
        Ok(ConvertOptions::new(TocLevels::new(self.convert.toc_levels)?)
            .with_internal_links(self.convert.internal_links))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdlgConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdlgConfig, ConfigError> {
    Loader::new().build()
}
