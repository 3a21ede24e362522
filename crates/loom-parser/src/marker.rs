//! Editor markers: diagnostics projected onto line/column space.

use serde::Serialize;

use crate::{
    error::{Diagnostic, ErrorCode, Severity},
    line_index::LineIndex,
};

/// A diagnostic positioned for an editor.
///
/// Lines and columns are 1-based; the end position is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl Marker {
    /// Position `diagnostic` using its primary label.
    ///
    /// A diagnostic without a primary label is anchored at the start of the
    /// document.
    pub fn from_diagnostic(diagnostic: &Diagnostic, index: &LineIndex<'_>) -> Self {
        let (start, end) = diagnostic
            .primary_span()
            .map(|span| index.range(span))
            .unwrap_or_else(|| (index.position(0), index.position(0)));

        Self {
            start_line: start.line,
            start_col: start.column,
            end_line: end.line,
            end_col: end.column,
            message: diagnostic.message().to_string(),
            severity: diagnostic.severity(),
            code: diagnostic.code(),
        }
    }
}

/// Position every diagnostic against `source`.
pub fn markers(source: &str, diagnostics: &[Diagnostic]) -> Vec<Marker> {
    let index = LineIndex::new(source);
    diagnostics
        .iter()
        .map(|diag| Marker::from_diagnostic(diag, &index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_marker_from_diagnostic() {
        let source = "pipeline \"p\" {\n  run nope()\n}";
        let diag = Diagnostic::error("undefined module `nope`")
            .with_code(ErrorCode::E200)
            .with_label(Span::new(21..25), "not declared");

        let markers = markers(source, &[diag]);

        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!((marker.start_line, marker.start_col), (2, 7));
        assert_eq!((marker.end_line, marker.end_col), (2, 11));
        assert_eq!(marker.code, Some(ErrorCode::E200));
        assert!(marker.severity.is_error());
    }

    #[test]
    fn test_marker_without_label_anchors_at_start() {
        let diag = Diagnostic::warning("something odd");

        let marker = Marker::from_diagnostic(&diag, &LineIndex::new("abc"));

        assert_eq!((marker.start_line, marker.start_col), (1, 1));
        assert_eq!((marker.end_line, marker.end_col), (1, 1));
    }
}
