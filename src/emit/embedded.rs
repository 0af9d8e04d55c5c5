//! Embedded mode: fixture bytes are compiled into the generated tests.
//!
//! The input fixture is wrapped in a single root element because fixtures are
//! usually fragments, and the runner strips that element again when dumping.
//! Both byte streams always end in an explicit `0x00`, even if the fixture
//! already ends in one.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::Strategy;
use crate::case::TestCase;
use crate::error::GenError;
use crate::settings::Mode;

pub const DEFAULT_HEADER: &str = "#include <string_view>";
pub const DEFAULT_WRAP_TAG: &str = "MEOW_XML_SUCKS";

const INPUT_ARRAY: &str = "input_data";
const PATCH_ARRAY: &str = "patch_data";
const BYTES_PER_LINE: usize = 16;
const TERMINATOR: u8 = 0x00;

/// Fixture contents ready to be written out, wrapping and terminators applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureBytes {
    pub input: Vec<u8>,
    pub patch: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EmbeddedStrategy {
    wrap_tag: String,
    header: String,
}

impl EmbeddedStrategy {
    pub fn new(wrap_tag: impl Into<String>) -> Self {
        EmbeddedStrategy {
            wrap_tag: wrap_tag.into(),
            header: DEFAULT_HEADER.to_string(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// `<tag>` + content + `</tag>` + terminator.
    pub fn wrap_input(&self, content: &[u8]) -> Vec<u8> {
        let open = format!("<{}>", self.wrap_tag);
        let close = format!("</{}>", self.wrap_tag);
        let mut bytes = Vec::with_capacity(open.len() + content.len() + close.len() + 1);
        bytes.extend_from_slice(open.as_bytes());
        bytes.extend_from_slice(content);
        bytes.extend_from_slice(close.as_bytes());
        bytes.push(TERMINATOR);
        bytes
    }

    /// Raw content + terminator.
    pub fn terminate_patch(&self, content: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(content.len() + 1);
        bytes.extend_from_slice(content);
        bytes.push(TERMINATOR);
        bytes
    }

    /// Build embedded fixtures from in-memory contents.
    pub fn fixture_bytes(&self, input: &[u8], patch: &[u8]) -> FixtureBytes {
        FixtureBytes {
            input: self.wrap_input(input),
            patch: self.terminate_patch(patch),
        }
    }
}

impl Default for EmbeddedStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_TAG)
    }
}

impl Strategy for EmbeddedStrategy {
    type Fixtures = FixtureBytes;

    fn mode(&self) -> Mode {
        Mode::Embedded
    }

    fn header(&self) -> &str {
        &self.header
    }

    /// Fixtures live next to the manifest; `folder` is a path-mode feature.
    fn load(&self, case: &TestCase) -> Result<FixtureBytes, GenError> {
        let dir = case.category_dir();
        let input = read_fixture(&dir.join(&case.input_file))?;
        let patch = read_fixture(&dir.join(&case.patch_file))?;
        Ok(self.fixture_bytes(&input, &patch))
    }

    fn write_runner<W: Write>(&self, out: &mut W, fixtures: &FixtureBytes) -> io::Result<()> {
        write_byte_array(out, INPUT_ARRAY, &fixtures.input)?;
        write_byte_array(out, PATCH_ARRAY, &fixtures.patch)?;
        writeln!(
            out,
            "TestRunner runner({}, {});",
            string_view(INPUT_ARRAY),
            string_view(PATCH_ARRAY)
        )
    }
}

fn read_fixture(path: &Path) -> Result<Vec<u8>, GenError> {
    fs::read(path).map_err(|source| GenError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

fn string_view(array: &str) -> String {
    format!(
        "std::string_view(reinterpret_cast<const char *>({0}), sizeof({0}))",
        array
    )
}

/// Declare `static const unsigned char <name>[]` holding `bytes` as hex literals.
fn write_byte_array<W: Write>(out: &mut W, name: &str, bytes: &[u8]) -> io::Result<()> {
    writeln!(out, "static const unsigned char {}[] = {{", name)?;
    for (i, line) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            writeln!(out, ",")?;
        }
        let literals: Vec<String> = line.iter().map(|b| format!("0x{:02x}", b)).collect();
        write!(out, "{}", literals.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "}};")
}
