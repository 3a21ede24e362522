use loom_parser::error::{Diagnostic, ErrorCode};
use loom_parser::marker::markers;
use loom_parser::{CheckConfig, analyze, check};
use proptest::prelude::*;

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().filter_map(Diagnostic::code).collect()
}

#[test]
fn test_declared_module_call_is_clean() {
    let source = r#"module "a.b" { contract: { output: String } }
pipeline "p" { run a.b() }"#;

    let analysis = analyze(source, &CheckConfig::default());

    assert!(analysis.diagnostics().is_empty());
    assert!(analysis.symbols().contains("a.b"));
}

#[test]
fn test_undefined_module_reported_once() {
    let source = r#"pipeline "p" { run unknown.mod(input.x) }"#;

    let analysis = analyze(source, &CheckConfig::default());

    assert_eq!(codes(analysis.diagnostics()), [ErrorCode::E200]);
    assert!(analysis.diagnostics()[0].message().contains("unknown.mod"));
}

#[test]
fn test_rebinding_flow_is_clean() {
    let source = "module \"m\" {}\npipeline \"p\" { let y = run m(input.z) \n run m(y) }";

    assert!(analyze(source, &CheckConfig::default()).diagnostics().is_empty());
}

#[test]
fn test_unterminated_block_reports_unbalanced_braces() {
    let source = r#"module "m" { contract: {"#;

    let analysis = analyze(source, &CheckConfig::default());

    assert!(analysis.declarations().is_empty());
    assert_eq!(codes(analysis.diagnostics()), [ErrorCode::E100]);
}

#[test]
fn test_arrow_pipeline_is_clean() {
    let source = r#"pipeline "p" { ingest -> analyze -> generate }"#;

    assert!(analyze(source, &CheckConfig::default()).diagnostics().is_empty());
}

#[test]
fn test_extra_builtins_from_config() {
    let source = r#"pipeline "p" { run llm.chat(input.prompt) }"#;

    let strict = analyze(source, &CheckConfig::default());
    let relaxed = analyze(source, &CheckConfig::new(vec!["llm.chat".to_string()]));

    assert_eq!(codes(strict.diagnostics()), [ErrorCode::E200]);
    assert!(relaxed.diagnostics().is_empty());
}

#[test]
fn test_check_returns_warnings_on_success() {
    let source = r#"module "m" {}
module "m" {}"#;

    let warnings = check(source, &CheckConfig::default()).expect("warnings only");

    assert_eq!(codes(&warnings), [ErrorCode::E202]);
}

#[test]
fn test_check_fails_with_all_diagnostics() {
    let source = r#"module "m" {}
module "m" {}
pipeline "p" { run nope(ghost) }"#;

    let err = check(source, &CheckConfig::default()).expect_err("has errors");

    assert_eq!(err.error_count(), 2);
    assert_eq!(
        codes(err.diagnostics()),
        [ErrorCode::E202, ErrorCode::E200, ErrorCode::E201]
    );
}

#[test]
fn test_every_problem_in_one_run() {
    let source = r#"module summarize {}
module "m" {}
pipeline "p" {
  let a = run m(input.x)
  run m(a, b)
  run gone(a)
"#;

    let analysis = analyze(source, &CheckConfig::default());

    // The pipeline never closes, so only the header and brace checks fire.
    assert_eq!(
        codes(analysis.diagnostics()),
        [ErrorCode::E101, ErrorCode::E100]
    );
}

#[test]
fn test_markers_are_one_based() {
    let source = "module \"m\" {}\npipeline \"p\" {\n  run m(ghost)\n}";

    let analysis = analyze(source, &CheckConfig::default());
    let markers = markers(source, analysis.diagnostics());

    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].start_line, 3);
    assert_eq!(markers[0].start_col, 9);
    assert_eq!(markers[0].end_line, 3);
    assert_eq!(markers[0].end_col, 14);
}

#[test]
fn test_empty_document() {
    let analysis = analyze("", &CheckConfig::default());

    assert!(analysis.declarations().is_empty());
    assert!(analysis.diagnostics().is_empty());
}

fn module_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(\\.[a-z]{1,6})?".prop_filter("not a keyword", |name| {
        !["input", "true", "false", "null", "run", "let", "module", "pipeline"]
            .contains(&name.as_str())
    })
}

proptest! {
    #[test]
    fn prop_declared_module_is_never_undefined(name in module_name()) {
        let source = format!("module \"{name}\" {{}}\npipeline \"p\" {{\n  run {name}(input.x)\n}}");

        let analysis = analyze(&source, &CheckConfig::default());

        prop_assert!(!codes(analysis.diagnostics()).contains(&ErrorCode::E200));
    }

    #[test]
    fn prop_undeclared_module_reported_per_call(name in module_name(), calls in 1usize..5) {
        prop_assume!(!name.starts_with("io."));
        let body: String = (0..calls).map(|_| format!("  run {name}(input.x)\n")).collect();
        let source = format!("pipeline \"p\" {{\n{body}}}");

        let analysis = analyze(&source, &CheckConfig::default());

        let undefined: Vec<_> = analysis
            .diagnostics()
            .iter()
            .filter(|diag| diag.code() == Some(ErrorCode::E200))
            .collect();
        prop_assert_eq!(undefined.len(), calls);
        for diag in undefined {
            let span = diag.primary_span().expect("labelled");
            prop_assert_eq!(&source[span.range()], name.as_str());
        }
    }

    #[test]
    fn prop_binding_before_use_removes_undefined_variable(var in "[a-z]{1,6}") {
        prop_assume!(!["input", "true", "false", "null", "run", "let"].contains(&var.as_str()));
        let unbound = format!("module \"m\" {{}}\npipeline \"p\" {{\n  run m({var})\n}}");
        let bound = format!(
            "module \"m\" {{}}\npipeline \"p\" {{\n  let {var} = run m(input.x)\n  run m({var})\n}}"
        );

        let unbound = analyze(&unbound, &CheckConfig::default());
        let bound = analyze(&bound, &CheckConfig::default());

        prop_assert_eq!(codes(unbound.diagnostics()), vec![ErrorCode::E201]);
        prop_assert!(bound.diagnostics().is_empty());
    }

    #[test]
    fn prop_analysis_is_idempotent(source in "[a-z\"{}()., \n>=-]{0,96}") {
        let first = analyze(&source, &CheckConfig::default());
        let second = analyze(&source, &CheckConfig::default());

        prop_assert_eq!(first.diagnostics(), second.diagnostics());
        prop_assert_eq!(first.declarations(), second.declarations());
    }

    #[test]
    fn prop_markers_stay_inside_document(source in "(module|pipeline|run|let|[a-z\"{}()., \n])*") {
        let analysis = analyze(&source, &CheckConfig::default());
        let line_count = source.split('\n').count();

        for marker in markers(&source, analysis.diagnostics()) {
            prop_assert!(marker.start_line >= 1 && marker.start_line <= line_count);
            prop_assert!(marker.end_line >= marker.start_line && marker.end_line <= line_count);
            prop_assert!(marker.start_col >= 1 && marker.end_col >= 1);
        }
    }
}
