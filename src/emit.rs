//! Code emission.
//!
//! The generated file is C++ for a Catch2 suite driving an external `TestRunner`:
//!
//! ```text
//! #include "runner.h"
//! TEST_CASE("simple") {
//! TestRunner runner("tests/xml/basic", "tests/xml/basic/t1_input.xml", "tests/xml/basic/t1_patch.xml");
//! runner.ApplyPatches();
//! INFO(runner.DumpXml());
//! CHECK(runner.PathExists("root/child"));
//! CHECK_FALSE(runner.PathExists("root/missing"));
//! }
//! ```
//!
//! Only the header and the runner construction differ between modes; both are
//! supplied by a [`Strategy`]. Everything else in a unit is written by
//! [`Emitter`], so negated expectations behave the same in every mode.

pub mod embedded;
pub mod path;

use std::io::{self, Write};

use crate::case::TestCase;
use crate::error::GenError;
use crate::manifest::Expectation;
use crate::settings::Mode;

pub use embedded::EmbeddedStrategy;
pub use path::PathStrategy;

/// Mode-specific half of test unit rendering.
pub trait Strategy {
    /// What [`Strategy::load`] resolves for one case.
    type Fixtures;

    fn mode(&self) -> Mode;

    /// First line of the generated file.
    fn header(&self) -> &str;

    /// Resolve the fixtures of a case.
    fn load(&self, case: &TestCase) -> Result<Self::Fixtures, GenError>;

    /// Write the statements constructing `runner` from resolved fixtures.
    fn write_runner<W: Write>(&self, out: &mut W, fixtures: &Self::Fixtures) -> io::Result<()>;
}

/// Writes a header and then one test unit per case into `out`.
pub struct Emitter<S, W> {
    strategy: S,
    out: W,
    units: usize,
}

impl<S: Strategy, W: Write> Emitter<S, W> {
    /// Start a new file by writing the strategy's header.
    pub fn new(strategy: S, mut out: W) -> io::Result<Self> {
        writeln!(out, "{}", strategy.header())?;
        Ok(Emitter {
            strategy,
            out,
            units: 0,
        })
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Number of units written so far.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Write the unit for one case.
    ///
    /// The name goes into the declaration verbatim; a name containing `"` yields
    /// source that will not compile.
    pub fn emit(&mut self, case: &TestCase, fixtures: &S::Fixtures) -> io::Result<()> {
        writeln!(self.out, "TEST_CASE(\"{}\") {{", case.name)?;
        self.strategy.write_runner(&mut self.out, fixtures)?;
        writeln!(self.out, "runner.ApplyPatches();")?;
        writeln!(self.out, "INFO(runner.DumpXml());")?;
        for expectation in &case.expectations {
            write_assertion(&mut self.out, expectation)?;
        }
        writeln!(self.out, "}}")?;
        writeln!(self.out)?;
        self.units += 1;
        Ok(())
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn write_assertion<W: Write>(out: &mut W, expectation: &Expectation) -> io::Result<()> {
    match expectation {
        Expectation::Present(path) => writeln!(out, "CHECK(runner.PathExists(\"{}\"));", path),
        Expectation::Absent(path) => {
            writeln!(out, "CHECK_FALSE(runner.PathExists(\"{}\"));", path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Strategy with a fixed runner line, so driver output can be checked alone.
    struct Fixed;

    impl Strategy for Fixed {
        type Fixtures = ();

        fn mode(&self) -> Mode {
            Mode::Path
        }

        fn header(&self) -> &str {
            "// header"
        }

        fn load(&self, _case: &TestCase) -> Result<(), GenError> {
            Ok(())
        }

        fn write_runner<W: Write>(&self, out: &mut W, _fixtures: &()) -> io::Result<()> {
            writeln!(out, "TestRunner runner;")
        }
    }

    fn case(name: &str, expected: &[&str]) -> TestCase {
        TestCase {
            name: name.to_string(),
            category: "basic".into(),
            folder: None,
            manifest: PathBuf::from("basic/t.json"),
            input_file: "t_input.xml".into(),
            patch_file: "t_patch.xml".into(),
            expectations: expected.iter().map(|e| Expectation::parse(e)).collect(),
        }
    }

    fn render(cases: &[TestCase]) -> String {
        let mut emitter = Emitter::new(Fixed, Vec::new()).unwrap();
        for case in cases {
            emitter.emit(case, &()).unwrap();
        }
        String::from_utf8(emitter.finish().unwrap()).unwrap()
    }

    #[test]
    fn header_only_without_cases() {
        assert_eq!(render(&[]), "// header\n");
    }

    #[test]
    fn unit_layout() {
        let out = render(&[case("simple", &["root/child", "!root/missing"])]);
        assert_eq!(
            out,
            "// header\n\
             TEST_CASE(\"simple\") {\n\
             TestRunner runner;\n\
             runner.ApplyPatches();\n\
             INFO(runner.DumpXml());\n\
             CHECK(runner.PathExists(\"root/child\"));\n\
             CHECK_FALSE(runner.PathExists(\"root/missing\"));\n\
             }\n\
             \n"
        );
    }

    #[test]
    fn no_expectations_means_no_assertions() {
        let out = render(&[case("degenerate", &[])]);
        assert!(!out.contains("CHECK"));
        assert!(out.contains("TEST_CASE(\"degenerate\") {"));
    }

    #[test]
    fn names_are_not_escaped() {
        let out = render(&[case(r#"say "hi""#, &[])]);
        assert!(out.contains(r#"TEST_CASE("say "hi"") {"#));
    }

    #[test]
    fn counts_units() {
        let mut emitter = Emitter::new(Fixed, Vec::new()).unwrap();
        emitter.emit(&case("a", &[]), &()).unwrap();
        emitter.emit(&case("b", &[]), &()).unwrap();
        assert_eq!(emitter.units(), 2);
    }
}
