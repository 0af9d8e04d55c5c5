//! Fixture discovery.
//!
//! The fixture root holds one directory per test category. Every `*.json` file
//! directly inside a category directory is a manifest describing one test case:
//!
//! ```text
//! tests/xml/
//!   basic/
//!     t1.json  t1_input.xml  t1_patch.xml
//!   merge/
//!     m1.json  nested/m1_input.xml  nested/m1_patch.xml
//! ```
//!
//! Deeper directories are never walked; a manifest reaches into them only through
//! its `folder` field. Categories and manifests are yielded sorted by file name,
//! so two runs over the same tree always emit the same file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

use tracing::debug;

use crate::error::GenError;

const MANIFEST_EXTENSION: &str = "json";

/// A manifest file found during discovery, tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRef {
    /// Category directory name, used verbatim in generated paths.
    pub category: String,
    /// Full path of the manifest file.
    pub path: PathBuf,
}

/// Lazy walk over `(category, manifest)` pairs under a fixture root.
///
/// The root is listed on the first call to `next`, and each category is listed
/// only when the walk reaches it. A missing root is an empty walk, not an error.
/// After yielding an error the walk is finished.
#[derive(Debug)]
pub struct Discovery {
    root: PathBuf,
    categories: Option<vec::IntoIter<(String, PathBuf)>>,
    current: Option<(String, vec::IntoIter<PathBuf>)>,
    finished: bool,
}

impl Discovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Discovery {
            root: root.into(),
            categories: None,
            current: None,
            finished: false,
        }
    }

    fn fail(&mut self, err: GenError) -> Option<Result<ManifestRef, GenError>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl Iterator for Discovery {
    type Item = Result<ManifestRef, GenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.categories.is_none() {
            match list_categories(&self.root) {
                Ok(categories) => self.categories = Some(categories.into_iter()),
                Err(err) => return self.fail(err),
            }
        }

        loop {
            if let Some((category, manifests)) = self.current.as_mut() {
                if let Some(path) = manifests.next() {
                    return Some(Ok(ManifestRef {
                        category: category.clone(),
                        path,
                    }));
                }
                self.current = None;
            }

            let (category, dir) = match self.categories.as_mut().and_then(Iterator::next) {
                Some(next) => next,
                None => {
                    self.finished = true;
                    return None;
                }
            };

            match list_manifests(&dir) {
                Ok(manifests) => {
                    debug!(category = %category, manifests = manifests.len(), "scanning category");
                    self.current = Some((category, manifests.into_iter()));
                }
                Err(err) => return self.fail(err),
            }
        }
    }
}

/// List the category directories directly under `root`, sorted by name.
///
/// Plain files at the root are skipped. A root that does not exist, or is not a
/// directory, has no categories.
fn list_categories(root: &Path) -> Result<Vec<(String, PathBuf)>, GenError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if is_absent(&err) || !root.is_dir() => {
            debug!(root = %root.display(), "fixture root missing, nothing to generate");
            return Ok(Vec::new());
        }
        Err(err) => return Err(GenError::io(root, err)),
    };

    let mut categories = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| GenError::io(root, err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        categories.push((name, path));
    }

    categories.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(categories)
}

/// List the manifest files directly inside a category directory, sorted by name.
fn list_manifests(dir: &Path) -> Result<Vec<PathBuf>, GenError> {
    let mut manifests = Vec::new();

    for entry in fs::read_dir(dir).map_err(|err| GenError::io(dir, err))? {
        let entry = entry.map_err(|err| GenError::io(dir, err))?;
        let path = entry.path();

        // Hidden files (editor swap files, OS metadata) are never manifests
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        // Only process .json files
        if !path
            .extension()
            .map(|e| e == MANIFEST_EXTENSION)
            .unwrap_or(false)
        {
            continue;
        }
        if path.is_file() {
            manifests.push(path);
        }
    }

    manifests.sort();
    Ok(manifests)
}

fn is_absent(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}
