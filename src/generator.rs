//! Generation pipeline: discovery, then interpretation, then emission.
//!
//! Manifests are handled one at a time: each is parsed, its fixtures resolved,
//! and its unit written before the next manifest is opened. The first error
//! stops the run.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::case::TestCase;
use crate::discovery::Discovery;
use crate::emit::{EmbeddedStrategy, Emitter, PathStrategy, Strategy};
use crate::error::GenError;
use crate::settings::{GeneratorConfig, Mode};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub mode: Mode,
    /// Categories that contributed at least one case.
    pub categories: usize,
    pub cases: usize,
}

pub struct Generator {
    settings: GeneratorConfig,
}

impl Generator {
    pub fn new(settings: GeneratorConfig) -> Self {
        Generator { settings }
    }

    /// Generate the suite and replace `dest` with it.
    ///
    /// Output goes to a temporary file beside `dest` that is renamed over it only
    /// once every case has been written. On failure `dest` is left untouched.
    /// An existing destination keeps its permissions, and a symlinked destination
    /// has its target replaced rather than the link.
    pub fn generate_to_path(&self, dest: impl AsRef<Path>) -> Result<GenerationReport, GenError> {
        let dest = dest.as_ref();
        let target = fs::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut staging = staging_file(&dir, &target).map_err(|err| GenError::output(dest, err))?;
        let report = self
            .generate(BufWriter::new(&mut staging))
            .map_err(|err| match err {
                GenError::Output { source, .. } => GenError::output(dest, source),
                other => other,
            })?;
        staging
            .persist(&target)
            .map_err(|err| GenError::output(dest, err.error))?;

        info!(
            output = %dest.display(),
            mode = report.mode.name(),
            categories = report.categories,
            cases = report.cases,
            "generated test suite"
        );
        Ok(report)
    }

    /// Generate the suite into any writer.
    pub fn generate<W: Write>(&self, out: W) -> Result<GenerationReport, GenError> {
        let emission = &self.settings.emission;
        let header = emission.header.clone();

        match emission.mode {
            Mode::Path => {
                let prefix = emission.path_prefix.clone().unwrap_or_else(|| {
                    self.settings.discovery.root.to_string_lossy().into_owned()
                });
                let mut strategy = PathStrategy::new(prefix);
                if let Some(header) = header {
                    strategy = strategy.with_header(header);
                }
                self.run(strategy, out)
            }
            Mode::Embedded => {
                let mut strategy = EmbeddedStrategy::new(emission.wrap_tag.clone());
                if let Some(header) = header {
                    strategy = strategy.with_header(header);
                }
                self.run(strategy, out)
            }
        }
    }

    fn run<S: Strategy, W: Write>(&self, strategy: S, out: W) -> Result<GenerationReport, GenError> {
        let root = &self.settings.discovery.root;
        let mode = strategy.mode();
        info!(root = %root.display(), mode = mode.name(), "generating test suite");

        let mut emitter = Emitter::new(strategy, out).map_err(writer_error)?;
        let mut categories = 0;
        let mut last_category: Option<String> = None;

        for manifest_ref in Discovery::new(root) {
            let manifest_ref = manifest_ref?;
            let case = TestCase::resolve(&manifest_ref)?;
            let fixtures = emitter.strategy().load(&case)?;
            debug!(
                name = %case.name,
                manifest = %case.manifest.display(),
                assertions = case.expectations.len(),
                "emitting test case"
            );
            emitter.emit(&case, &fixtures).map_err(writer_error)?;

            if last_category.as_deref() != Some(manifest_ref.category.as_str()) {
                categories += 1;
                last_category = Some(manifest_ref.category);
            }
        }

        let cases = emitter.units();
        emitter.finish().map_err(writer_error)?;

        Ok(GenerationReport {
            mode,
            categories,
            cases,
        })
    }
}

/// Temporary file in `dir` carrying the permissions `target` has or would get.
///
/// A fresh destination gets `0o666` minus the umask, like `File::create`.
fn staging_file(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    let existing = fs::metadata(target).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".xml-testgen");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staging = builder.tempfile_in(dir)?;

    if let Some(permissions) = existing {
        staging.as_file().set_permissions(permissions)?;
    }
    Ok(staging)
}

/// Write failures against a bare writer; `generate_to_path` swaps in the real path.
fn writer_error(err: io::Error) -> GenError {
    GenError::output("<output>", err)
}
