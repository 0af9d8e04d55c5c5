//! # xml-testgen
//!
//! Build-time generator for XML patch test suites.
//!
//! A fixture root holds one directory per test category. Each `*.json` manifest
//! in a category describes a test case whose input and patch documents sit next
//! to it as `<base>_input.xml` and `<base>_patch.xml`. The generator turns every
//! manifest into a Catch2 `TEST_CASE` that builds a `TestRunner`, applies the
//! patch, and checks the expected paths, and writes all of them into one file.
//!
//! The pipeline is [`discovery`] -> [`case`] -> [`emit`], driven by
//! [`generator::Generator`]. Fixtures are either referenced by path
//! ([`emit::PathStrategy`]) or compiled in ([`emit::EmbeddedStrategy`]).

pub mod case;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod settings;

pub use error::GenError;
pub use generator::{GenerationReport, Generator};
pub use settings::{GeneratorConfig, Loader, Mode};
