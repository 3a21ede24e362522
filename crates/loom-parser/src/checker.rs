//! Scope-tracked semantic checking of pipeline bodies.
//!
//! Each pipeline body is walked line by line. Per line, in order:
//!
//! 1. Update the brace depth from the line's code braces. A depth below the
//!    body's own level means the body ended; stop.
//! 2. A `let <name> =` binding adds `<name>` to the scope.
//! 3. Every `run <module>(...)` call is checked: the module must be in the
//!    symbol table, and every identifier root in the arguments must be in
//!    scope. Arguments that do not close on the same line are not checked.
//!
//! Lines that match none of these are skipped. Nothing here fails; problems
//! become diagnostics.

use std::collections::HashSet;

use log::debug;

use crate::{
    declarations::Declaration,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    scanner,
    span::Span,
    symbols::SymbolTable,
    syntax,
};

/// The name every pipeline can read without binding it.
pub const INPUT: &str = "input";

/// Names bound so far in one pipeline body.
///
/// Bindings are visible from their line onwards; there is no hoisting.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    names: HashSet<&'a str>,
}

impl<'a> Scope<'a> {
    /// A fresh scope holding only [`INPUT`].
    pub fn new() -> Self {
        Self {
            names: HashSet::from([INPUT]),
        }
    }

    pub fn bind(&mut self, name: &'a str) {
        self.names.insert(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for Scope<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check one pipeline declaration against `symbols`.
pub(crate) fn check_pipeline(
    source: &str,
    pipeline: &Declaration,
    symbols: &SymbolTable,
    collector: &mut DiagnosticCollector,
) {
    let body = pipeline.body_text(source);
    let mut scope = Scope::new();
    let mut depth = 0isize;
    let mut line_start = pipeline.body().start();

    for line in body.split_inclusive('\n') {
        let offset = line_start;
        line_start += line.len();

        let (open, close) = scanner::brace_counts(line);
        depth += open as isize - close as isize;
        if depth < 0 {
            break;
        }

        let code = &line[..scanner::code_end(line)];

        if let Some(binding) = syntax::let_binding(code) {
            debug!(pipeline = pipeline.name(), name = binding.name; "Bound variable");
            scope.bind(binding.name);
        }

        for call in syntax::run_calls(code) {
            if !symbols.contains(call.module) {
                collector.emit(undefined_module(call.module, call.module_span.shift(offset)));
            }

            let Some(args) = call.args else {
                continue;
            };
            for reference in syntax::references(&code[args.range()]) {
                let root = reference.root();
                if root == INPUT || scope.contains(root) {
                    continue;
                }
                let span = reference.root_span().shift(offset + args.start());
                collector.emit(undefined_variable(root, pipeline.name(), span));
            }
        }
    }
}

fn undefined_module(module: &str, span: Span) -> Diagnostic {
    Diagnostic::error(format!("undefined module `{module}`"))
        .with_code(ErrorCode::E200)
        .with_label(span, "not declared in this document")
        .with_help(format!(
            "declare it with `module \"{module}\" {{ ... }}` or call a built-in module"
        ))
}

fn undefined_variable(name: &str, pipeline: &str, span: Span) -> Diagnostic {
    Diagnostic::error(format!("undefined variable `{name}`"))
        .with_code(ErrorCode::E201)
        .with_label(span, format!("not bound in pipeline `{pipeline}`"))
        .with_help(format!(
            "bind it first with `let {name} = run <module>(...)`, or read it from `input.{name}`"
        ))
}
