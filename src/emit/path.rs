//! Path mode: generated tests open their fixtures at test-run time.
//!
//! Nothing is read here, so a missing fixture only shows up when the generated
//! suite runs. Paths are always written with forward slashes.

use std::io::{self, Write};

use super::Strategy;
use crate::case::TestCase;
use crate::error::GenError;
use crate::settings::Mode;

pub const DEFAULT_HEADER: &str = "#include \"runner.h\"";

/// Fixture locations as they appear in the generated string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    pub category: String,
    pub input: String,
    pub patch: String,
}

#[derive(Debug, Clone)]
pub struct PathStrategy {
    prefix: String,
    header: String,
}

impl PathStrategy {
    /// `prefix` is the fixture root as the generated suite sees it.
    pub fn new(prefix: impl Into<String>) -> Self {
        PathStrategy {
            prefix: prefix.into(),
            header: DEFAULT_HEADER.to_string(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn fixture_paths(&self, case: &TestCase) -> FixturePaths {
        let category = join_slashed(&[&self.prefix, &case.category]);
        let dir = match &case.folder {
            Some(folder) => join_slashed(&[&category, folder]),
            None => category.clone(),
        };

        FixturePaths {
            input: join_slashed(&[&dir, &case.input_file]),
            patch: join_slashed(&[&dir, &case.patch_file]),
            category,
        }
    }
}

impl Strategy for PathStrategy {
    type Fixtures = FixturePaths;

    fn mode(&self) -> Mode {
        Mode::Path
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn load(&self, case: &TestCase) -> Result<FixturePaths, GenError> {
        Ok(self.fixture_paths(case))
    }

    fn write_runner<W: Write>(&self, out: &mut W, fixtures: &FixturePaths) -> io::Result<()> {
        writeln!(
            out,
            "TestRunner runner(\"{}\", \"{}\", \"{}\");",
            fixtures.category, fixtures.input, fixtures.patch
        )
    }
}

/// Join path segments with `/`, converting any `\` separators.
///
/// Empty segments are dropped and duplicate slashes at the joints collapse;
/// a leading `/` on the first segment is kept.
fn join_slashed(segments: &[&str]) -> String {
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.replace('\\', "/");
        let segment = if joined.is_empty() {
            segment.trim_end_matches('/')
        } else {
            segment.trim_matches('/')
        };
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(segment);
    }
    joined
}
