//! Generator settings.
//!
//! `defaults/xml-testgen.default.toml` is embedded into the binary so the
//! documented defaults and runtime behavior stay in sync. Callers layer
//! project-specific files on top via [`Loader`] before deserializing into
//! [`GeneratorConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::GenError;

const DEFAULT_TOML: &str = include_str!("../defaults/xml-testgen.default.toml");

/// Name of the optional project-level override file.
pub const PROJECT_CONFIG_FILE: &str = "xml-testgen.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub discovery: DiscoveryConfig,
    pub emission: EmissionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    pub root: PathBuf,
}

/// Knobs for the emitted source text.
#[derive(Debug, Clone, Deserialize)]
pub struct EmissionConfig {
    pub mode: Mode,
    /// Fixture root as written into path-mode tests; the scan root when unset.
    #[serde(default)]
    pub path_prefix: Option<String>,
    pub wrap_tag: String,
    /// Replaces the mode's built-in header when set.
    #[serde(default)]
    pub header: Option<String>,
}

/// How generated tests get at their fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Reference fixtures by path at test-run time.
    Path,
    /// Inline fixture bytes into the generated source.
    Embedded,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Path => "path",
            Mode::Embedded => "embedded",
        }
    }
}

/// Helper for layering overrides over the built-in defaults.
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

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, GenError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GeneratorConfig, GenError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GeneratorConfig, GenError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.discovery.root, PathBuf::from("tests/xml"));
        assert_eq!(config.emission.mode, Mode::Path);
        assert!(config.emission.path_prefix.is_none());
        assert_eq!(config.emission.wrap_tag, "MEOW_XML_SUCKS");
        assert!(config.emission.header.is_none());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("emission.mode", "embedded")
            .expect("override to apply")
            .set_override("emission.header", "#include \"harness.h\"")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.emission.mode, Mode::Embedded);
        assert_eq!(
            config.emission.header.as_deref(),
            Some("#include \"harness.h\"")
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Loader::new()
            .set_override("emission.mode", "inline")
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(GenError::Config(_))));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/xml-testgen.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/xml-testgen.toml")
            .build()
            .expect("optional file to be skipped");
        assert_eq!(config.emission.mode, Mode::Path);
    }
}
