//! Loom - editor analysis for the Loom pipeline language.
//!
//! Diagnostics and positioned dependency graphs for `.loom` documents. Both
//! are pure functions of the source text, so callers can re-run them on
//! every edit and discard stale results.

pub mod config;
pub mod graph;
pub mod layout;
pub mod simulation;

mod error;

pub use loom_core::{geometry, identifier, semantic};
pub use loom_parser::{error::Diagnostic, marker::Marker};

pub use error::LoomError;

use log::{debug, info, trace};

use loom_parser::{declarations::Declaration, marker};

use config::AppConfig;
use graph::{Graph, GraphBuilder};
use layout::Layout;

/// Diagnostics, markers and graph from one analysis run.
#[derive(Debug, Clone)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    markers: Vec<Marker>,
    graph: Graph,
}

impl Report {
    /// Diagnostics ordered by position.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The diagnostics in editor line/column space.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The positioned dependency graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity().is_error())
    }
}

/// Entry point for checking documents and extracting their graphs.
///
/// # Examples
///
/// ```
/// use loom::{Analyzer, config::AppConfig};
///
/// let source = r#"
///     module "scan" { contract: { output: Files } }
///     module "review" {}
///     pipeline "audit" {
///         let files = run scan(input.repo)
///         run review(files)
///     }
/// "#;
///
/// let analyzer = Analyzer::new(AppConfig::default());
/// let report = analyzer.analyze(source, Some("scan"));
///
/// assert!(report.diagnostics().is_empty());
/// assert_eq!(report.graph().node_count(), 3);
/// assert_eq!(report.graph().edge_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Analyzer {
    config: AppConfig,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// All diagnostics for `source`, ordered by position.
    pub fn diagnostics(&self, source: &str) -> Vec<Diagnostic> {
        let analysis = loom_parser::analyze(source, &self.config.analysis().check_config());
        analysis.diagnostics().to_vec()
    }

    /// Check `source` strictly.
    ///
    /// Returns the warnings when no error-severity diagnostic is found.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::Parse`] with every diagnostic when the document
    /// has errors.
    pub fn check(&self, source: &str) -> Result<Vec<Diagnostic>, LoomError> {
        info!("Checking document");
        let warnings = loom_parser::check(source, &self.config.analysis().check_config())
            .map_err(|err| LoomError::new_parse_error(err, source))?;
        debug!(warnings_count = warnings.len(); "Document checked");
        Ok(warnings)
    }

    /// Build the positioned dependency graph of `source`.
    ///
    /// `active_module` marks the module node with that name, if any.
    pub fn graph(&self, source: &str, active_module: Option<&str>) -> Graph {
        let declarations = loom_parser::declarations::collect_declarations(source);
        self.build_graph(source, &declarations, active_module)
    }

    /// Run the checker and the graph builder over one declaration list.
    pub fn analyze(&self, source: &str, active_module: Option<&str>) -> Report {
        let analysis = loom_parser::analyze(source, &self.config.analysis().check_config());
        let graph = self.build_graph(source, analysis.declarations(), active_module);
        let markers = marker::markers(source, analysis.diagnostics());

        Report {
            diagnostics: analysis.diagnostics().to_vec(),
            markers,
            graph,
        }
    }

    fn build_graph(
        &self,
        source: &str,
        declarations: &[Declaration],
        active_module: Option<&str>,
    ) -> Graph {
        info!(declarations_count = declarations.len(); "Building dependency graph");
        let mut graph = GraphBuilder::new(source).build(declarations);

        Layout::from_config(self.config.layout()).apply(&mut graph);

        if let Some(module) = active_module {
            if !graph.set_active(module) {
                debug!(module; "Active module hint matches no module node");
            }
        }

        trace!(graph:?; "Positioned graph");
        graph
    }
}
