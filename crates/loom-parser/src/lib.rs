//! # Loom Parser
//!
//! Structural scanning and semantic checking for Loom pipeline documents.
//!
//! Loom documents declare `module "<name>" { ... }` units and
//! `pipeline "<name>" { ... }` bodies that call them. This crate works on
//! raw, possibly incomplete text: there is no grammar-driven parse tree.
//! Instead a string- and comment-aware [`scanner`] finds blocks, and the
//! passes built on it collect declarations and report problems.
//!
//! ## Usage
//!
//! ```
//! # use loom_parser::{analyze, CheckConfig};
//! let source = r#"
//!     module "text.summarize" { contract: { output: String } }
//!     pipeline "daily" {
//!         let summary = run text.summarize(input.body)
//!         run io.write_output(summary)
//!     }
//! "#;
//!
//! let analysis = analyze(source, &CheckConfig::default());
//! assert!(analysis.diagnostics().is_empty());
//! assert_eq!(analysis.declarations().len(), 2);
//! ```

pub mod checker;
pub mod declarations;
pub mod error;
pub mod line_index;
pub mod marker;
pub mod scanner;
mod span;
mod structure;
pub mod symbols;
pub mod syntax;

pub use span::Span;

use log::{info, trace};

use declarations::{Declaration, DeclarationScan};
use error::{Diagnostic, DiagnosticCollector, ParseError};
use symbols::SymbolTable;

/// Options for the analysis passes.
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    builtin_modules: Vec<String>,
}

impl CheckConfig {
    /// Create a configuration with extra built-in module names.
    ///
    /// The fixed built-ins in [`symbols::BUILTIN_MODULES`] are always known.
    pub fn new(builtin_modules: Vec<String>) -> Self {
        Self { builtin_modules }
    }

    pub fn builtin_modules(&self) -> &[String] {
        &self.builtin_modules
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    declarations: Vec<Declaration>,
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// Well-formed declarations in document order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Diagnostics ordered by position.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity().is_error())
    }
}

struct Passes {
    scan: DeclarationScan,
    symbols: SymbolTable,
    collector: DiagnosticCollector,
}

fn run_passes(source: &str, config: &CheckConfig) -> Passes {
    info!(bytes = source.len(); "Analyzing document");

    let scan = declarations::scan_declarations(source);
    let symbols = SymbolTable::build(&scan.declarations, config.builtin_modules());
    let mut collector = DiagnosticCollector::new();

    structure::check_brace_balance(source, &mut collector);
    structure::check_declaration_headers(&scan, &mut collector);
    structure::check_duplicates(&scan, &mut collector);

    for pipeline in scan.declarations.iter().filter(|decl| decl.is_pipeline()) {
        checker::check_pipeline(source, pipeline, &symbols, &mut collector);
    }

    info!(
        declarations_count = scan.declarations.len(),
        has_errors = collector.has_errors();
        "Analysis finished"
    );
    Passes {
        scan,
        symbols,
        collector,
    }
}

/// Run the declaration, structural and semantic passes over `source`.
///
/// Never fails: malformed input yields fewer declarations and more
/// diagnostics.
pub fn analyze(source: &str, config: &CheckConfig) -> Analysis {
    let Passes {
        scan,
        symbols,
        collector,
    } = run_passes(source, config);
    let diagnostics = collector.into_diagnostics();
    trace!(diagnostics:?; "Diagnostics");

    Analysis {
        declarations: scan.declarations,
        symbols,
        diagnostics,
    }
}

/// Check `source`, failing when any error-severity diagnostic is found.
///
/// On success the warnings are returned.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic, warnings included,
/// when at least one is an error.
pub fn check(source: &str, config: &CheckConfig) -> Result<Vec<Diagnostic>, ParseError> {
    run_passes(source, config).collector.finish()
}
