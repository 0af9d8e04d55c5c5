//! Test manifests.
//!
//! A manifest is a small JSON object describing one test case:
//!
//! ```json
//! { "name": "simple", "folder": "nested", "expected": ["root/child", "!root/missing"] }
//! ```
//!
//! `name` and `expected` are required, `folder` is optional and unknown keys are
//! ignored. A manifest that fails to parse aborts the whole run: a broken test
//! must never silently drop out of the generated suite.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::GenError;

/// Marker that turns an `expected` entry into an absence check.
pub const NEGATION_MARKER: char = '!';

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Test title, emitted verbatim.
    pub name: String,
    /// Sub-directory of the category holding the fixtures.
    #[serde(default)]
    pub folder: Option<String>,
    /// Path expressions to check after patching, in order.
    pub expected: Vec<String>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, GenError> {
        let text = fs::read_to_string(path).map_err(|err| GenError::io(path, err))?;
        Self::from_json(&text).map_err(|source| GenError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn expectations(&self) -> Vec<Expectation> {
        self.expected.iter().map(|e| Expectation::parse(e)).collect()
    }
}

/// One path-existence check against the patched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The path must locate at least one node.
    Present(String),
    /// The path must locate nothing.
    Absent(String),
}

impl Expectation {
    pub fn parse(entry: &str) -> Self {
        match entry.strip_prefix(NEGATION_MARKER) {
            Some(path) => Expectation::Absent(path.to_string()),
            None => Expectation::Present(entry.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Expectation::Present(path) | Expectation::Absent(path) => path,
        }
    }
}
