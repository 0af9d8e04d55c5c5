//! Error type shared by every stage of the generator.
//!
//! Generation is fail-fast: the first error aborts the run and no output file is
//! considered valid. Every variant carries the path that caused it so the
//! message printed by the binary points straight at the offending fixture.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    /// Listing a category directory failed.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON or lacks `name`/`expected`.
    #[error("malformed manifest '{path}': {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest file name has no usable base name to derive fixtures from.
    #[error("cannot derive fixture names from manifest '{path}'")]
    ManifestName { path: PathBuf },

    /// Fixture could not be read (embedded mode only).
    #[error("cannot read fixture '{path}': {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination could not be created, written, or replaced.
    #[error("cannot write output '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Output {
            path: path.into(),
            source,
        }
    }
}
