//! Resolved test cases.
//!
//! A [`TestCase`] names every artifact one generated test depends on. The
//! `<base>_input.xml` / `<base>_patch.xml` naming convention is applied here and
//! nowhere else; the emission strategies only ever read the file names stored on
//! the record.

use std::path::{Path, PathBuf};

use crate::discovery::ManifestRef;
use crate::error::GenError;
use crate::manifest::{Expectation, Manifest};

const INPUT_SUFFIX: &str = "_input.xml";
const PATCH_SUFFIX: &str = "_patch.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub category: String,
    /// Sub-directory of the category holding the fixtures.
    pub folder: Option<String>,
    pub manifest: PathBuf,
    /// Input fixture file name, e.g. `t1_input.xml`.
    pub input_file: String,
    /// Patch fixture file name, e.g. `t1_patch.xml`.
    pub patch_file: String,
    pub expectations: Vec<Expectation>,
}

impl TestCase {
    /// Load the referenced manifest and build the case.
    pub fn resolve(manifest_ref: &ManifestRef) -> Result<Self, GenError> {
        let manifest = Manifest::from_path(&manifest_ref.path)?;
        Self::from_manifest(manifest_ref, manifest)
    }

    pub fn from_manifest(manifest_ref: &ManifestRef, manifest: Manifest) -> Result<Self, GenError> {
        let base = base_name(&manifest_ref.path)?;
        let expectations = manifest.expectations();

        Ok(TestCase {
            name: manifest.name,
            category: manifest_ref.category.clone(),
            folder: manifest.folder,
            manifest: manifest_ref.path.clone(),
            input_file: format!("{}{}", base, INPUT_SUFFIX),
            patch_file: format!("{}{}", base, PATCH_SUFFIX),
            expectations,
        })
    }

    /// Directory holding the manifest, i.e. the category directory.
    pub fn category_dir(&self) -> &Path {
        self.manifest.parent().unwrap_or_else(|| Path::new(""))
    }
}

fn base_name(manifest: &Path) -> Result<&str, GenError> {
    manifest
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| GenError::ManifestName {
            path: manifest.to_path_buf(),
        })
}
