//! CLI logic for the Loom pipeline language.
//!
//! `loom check` writes warnings to stderr and fails on errors. `loom graph` writes
//! the positioned dependency graph as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::info;

use loom::{Analyzer, Diagnostic, LoomError};

use error_adapter::diagnostics_to_reportables;

/// Run the Loom CLI application
///
/// # Errors
///
/// Returns `LoomError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Documents with error diagnostics (`check` only)
pub fn run(args: &Args) -> Result<(), LoomError> {
    let input = args.command.input();
    info!(input_path:% = input.display(); "Processing document");

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(input)?;
    let analyzer = Analyzer::new(app_config);

    match &args.command {
        Command::Check { .. } => check(&analyzer, &source),
        Command::Graph { output, active, .. } => graph(
            &analyzer,
            &source,
            output.as_deref().map(Path::new),
            active.as_deref(),
        ),
    }
}

fn check(analyzer: &Analyzer, source: &str) -> Result<(), LoomError> {
    let warnings = analyzer.check(source)?;
    write_warnings(&mut io::stderr().lock(), &warnings, source)?;

    info!(warnings_count = warnings.len(); "Document has no errors");
    Ok(())
}

/// Write rendered warnings to `out`, independent of the log level.
fn write_warnings(
    out: &mut impl Write,
    warnings: &[Diagnostic],
    source: &str,
) -> io::Result<()> {
    for reportable in diagnostics_to_reportables(warnings, source) {
        writeln!(out, "{}", reportable.render())?;
    }
    Ok(())
}

fn graph(
    analyzer: &Analyzer,
    source: &str,
    output: Option<&Path>,
    active: Option<&str>,
) -> Result<(), LoomError> {
    let graph = analyzer.graph(source, active);
    let json = serde_json::to_string_pretty(&graph).map_err(std::io::Error::from)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file:% = path.display(); "Graph exported successfully");
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use loom::config::AppConfig;

    use super::*;

    #[test]
    fn test_warnings_are_written_out() {
        let source = "module \"m\" { contract: { output: A } }\nmodule \"m\" { contract: { output: B } }";
        let analyzer = Analyzer::new(AppConfig::default());
        let warnings = analyzer.check(source).expect("duplicates are only warnings");

        let mut out = Vec::new();
        write_warnings(&mut out, &warnings, source).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(rendered.contains("E202"));
        assert!(rendered.contains("declared more than once"));
    }

    #[test]
    fn test_no_warnings_writes_nothing() {
        let mut out = Vec::new();
        write_warnings(&mut out, &[], "").unwrap();
        assert!(out.is_empty());
    }
}
