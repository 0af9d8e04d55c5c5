//! Command-line interface for xml-testgen
//! Writes the generated XML patch test suite to the given file.
//!
//! Usage:
//!   xml-testgen `<output>`   - Generate the suite into `<output>`
//!
//! Settings come from the built-in defaults, overlaid with `xml-testgen.toml`
//! in the working directory when that file exists.

use clap::{Arg, Command, ValueHint};
use tracing::Level;
use xml_testgen::settings::PROJECT_CONFIG_FILE;
use xml_testgen::{Generator, Loader};

fn main() {
    let matches = Command::new("xml-testgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate an XML patch test suite from fixture manifests")
        .arg_required_else_help(true)
        .arg(
            Arg::new("output")
                .help("Path of the generated test source file")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = matches
        .get_one::<String>("output")
        .expect("output is a required argument");
    handle_generate_command(output);
}

/// Handle the generate command
fn handle_generate_command(output: &str) {
    let settings = Loader::new()
        .with_optional_file(PROJECT_CONFIG_FILE)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if let Err(e) = Generator::new(settings).generate_to_path(output) {
        eprintln!("Generation error: {}", e);
        std::process::exit(1);
    }
}
