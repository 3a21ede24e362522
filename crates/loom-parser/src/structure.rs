//! Document-level structural checks.
//!
//! These run before the semantic pass and look at the document as a whole:
//! brace balance, declaration headers and duplicate names.

use std::collections::HashMap;

use log::debug;

use loom_core::semantic::DeclarationKind;

use crate::{
    declarations::{DeclarationScan, RejectReason},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    scanner,
    span::Span,
};

/// Report a brace count mismatch across the whole document.
///
/// The diagnostic is anchored to the last line that has any content.
pub(crate) fn check_brace_balance(source: &str, collector: &mut DiagnosticCollector) {
    let (open, close) = scanner::brace_counts(source);
    if open == close {
        return;
    }
    debug!(open, close; "Unbalanced braces");

    let message = if open > close {
        format!("unbalanced braces: {} `{{` never closed", open - close)
    } else {
        format!("unbalanced braces: {} unmatched `}}`", close - open)
    };

    collector.emit(
        Diagnostic::error(message)
            .with_code(ErrorCode::E100)
            .with_label(last_line_span(source), "document ends here")
            .with_help(format!("found {open} `{{` and {close} `}}` outside strings and comments")),
    );
}

/// Report declaration keywords without a quoted name.
pub(crate) fn check_declaration_headers(scan: &DeclarationScan, collector: &mut DiagnosticCollector) {
    for rejected in &scan.rejected {
        if rejected.reason != RejectReason::MissingName {
            continue;
        }
        let keyword = rejected.kind.keyword();
        collector.emit(
            Diagnostic::error(format!("`{keyword}` must be followed by a quoted name"))
                .with_code(ErrorCode::E101)
                .with_label(rejected.keyword_span, "expected a name in double quotes after this")
                .with_help(format!("write `{keyword} \"name\" {{ ... }}`")),
        );
    }
}

/// Warn about declarations whose name repeats an earlier one of the same kind.
pub(crate) fn check_duplicates(scan: &DeclarationScan, collector: &mut DiagnosticCollector) {
    let mut first_seen: HashMap<(DeclarationKind, &str), Span> = HashMap::new();

    for declaration in &scan.declarations {
        let key = (declaration.kind(), declaration.name());
        let Some(first) = first_seen.get(&key) else {
            first_seen.insert(key, declaration.name_span());
            continue;
        };
        collector.emit(
            Diagnostic::warning(format!(
                "{} `{}` is declared more than once",
                declaration.kind(),
                declaration.name()
            ))
            .with_code(ErrorCode::E202)
            .with_label(declaration.name_span(), "duplicate declaration")
            .with_secondary_label(*first, "first declared here")
            .with_help("the last declaration wins"),
        );
    }
}

fn last_line_span(source: &str) -> Span {
    let trimmed = source.trim_end();
    let line_start = trimmed.rfind('\n').map_or(0, |pos| pos + 1);
    let line = &trimmed[line_start..];
    let indent = line.len() - line.trim_start().len();
    Span::new(line_start + indent..trimmed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::scan_declarations;

    fn run(source: &str) -> Vec<Diagnostic> {
        let scan = scan_declarations(source);
        let mut collector = DiagnosticCollector::new();
        check_brace_balance(source, &mut collector);
        check_declaration_headers(&scan, &mut collector);
        check_duplicates(&scan, &mut collector);
        collector.into_diagnostics()
    }

    #[test]
    fn test_balanced_document() {
        assert!(run(r#"module "m" { contract: { x: "}" } }"#).is_empty());
    }

    #[test]
    fn test_unbalanced_anchored_to_last_line() {
        let source = "module \"m\" {\n  contract: {\n  }\n\n";
        let diagnostics = run(source);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
        let span = diagnostics[0].primary_span().unwrap();
        assert_eq!(&source[span.range()], "}");
    }

    #[test]
    fn test_extra_closing_brace() {
        let diagnostics = run("pipeline \"p\" { } }");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message().contains("unmatched"));
    }

    #[test]
    fn test_missing_name() {
        let source = "module summarize {}";
        let diagnostics = run(source);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E101));
        assert_eq!(diagnostics[0].primary_span(), Some(Span::new(0..6)));
    }

    #[test]
    fn test_unterminated_body_is_not_a_header_error() {
        let diagnostics = run(r#"module "m" { contract: {"#);

        let codes: Vec<_> = diagnostics.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, [ErrorCode::E100]);
    }

    #[test]
    fn test_duplicate_is_warning_with_secondary_label() {
        let source = r#"module "m" {}
module "m" {}"#;
        let diagnostics = run(source);

        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.primary_span(), Some(Span::new(22..23)));
        assert!(diag.labels().iter().any(|label| {
            label.is_secondary() && label.span() == Span::new(8..9)
        }));
    }

    #[test]
    fn test_same_name_different_kind_is_not_duplicate() {
        assert!(run(r#"module "x" {} pipeline "x" {}"#).is_empty());
    }
}
