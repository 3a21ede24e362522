//! Collector for accumulating diagnostics across analysis passes.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during an analysis run.
///
/// Passes emit into the collector instead of returning early, so one run
/// reports every problem in the document.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if an error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Consume the collector and return its diagnostics ordered by position.
    ///
    /// Diagnostics without a primary label sort last. The sort is stable, so
    /// diagnostics at the same position keep their emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by_key(|diag| {
            diag.primary_span()
                .map_or((usize::MAX, usize::MAX), |span| (span.start(), span.end()))
        });
        diagnostics
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        let has_errors = self.has_errors;
        let diagnostics = self.into_diagnostics();
        if has_errors {
            Err(ParseError::new(diagnostics))
        } else {
            Ok(diagnostics)
        }
    }
}
