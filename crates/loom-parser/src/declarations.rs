//! Discovery of top-level `module` and `pipeline` declarations.
//!
//! A declaration header is the keyword, optional spaces, a double-quoted
//! name closed on the same line, optional whitespace and an opening brace.
//! The body runs to the matching closing brace found by the block scanner.
//!
//! The scan is cursor based: after a declaration is accepted the cursor jumps
//! past its body, so keywords nested inside a body are never taken for
//! top-level declarations. After a rejection the cursor moves just past the
//! keyword, which guarantees termination on any input.

use std::{fmt, ops::Range};

use log::debug;
use winnow::{
    Parser as _,
    ascii::{multispace0, space0},
    combinator::{preceded, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location as _},
    token::take_till,
};

use loom_core::semantic::DeclarationKind;

use crate::{scanner, span::Span};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

const KEYWORDS: [&str; 2] = ["module", "pipeline"];

/// A successfully parsed declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    kind: DeclarationKind,
    name: String,
    name_span: Span,
    keyword_span: Span,
    body: Span,
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Span of the name, quotes excluded.
    pub fn name_span(&self) -> Span {
        self.name_span
    }

    pub fn keyword_span(&self) -> Span {
        self.keyword_span
    }

    /// Span of the text between the braces.
    pub fn body(&self) -> Span {
        self.body
    }

    /// The body text, braces excluded.
    pub fn body_text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.body.range()]
    }

    pub fn is_module(&self) -> bool {
        self.kind == DeclarationKind::Module
    }

    pub fn is_pipeline(&self) -> bool {
        self.kind == DeclarationKind::Pipeline
    }

    /// Span of the first nested `runtime { ... }` block's body, if any.
    ///
    /// Only module declarations carry runtime blocks.
    pub fn runtime_block(&self, source: &str) -> Option<Span> {
        if !self.is_module() {
            return None;
        }
        let body = self.body_text(source);
        let mut from = 0;
        while let Some(pos) = scanner::find_keyword(body, "runtime", from) {
            from = pos + "runtime".len();
            let rest = &body[from..];
            let open = from + (rest.len() - rest.trim_start().len());
            if body.as_bytes().get(open) != Some(&b'{') {
                continue;
            }
            let close = scanner::find_block_end(body, open)?;
            return Some(Span::new(open + 1..close).shift(self.body.start()));
        }
        None
    }
}

/// Why a keyword occurrence did not produce a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No double-quoted name on the keyword's line.
    MissingName,
    /// The name is not followed by `{`.
    MissingBody,
    /// The block never closes.
    Unterminated,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("missing quoted name"),
            Self::MissingBody => f.write_str("missing body"),
            Self::Unterminated => f.write_str("unterminated body"),
        }
    }
}

/// A keyword occurrence that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected {
    pub kind: DeclarationKind,
    pub keyword_span: Span,
    pub reason: RejectReason,
}

/// Result of one declaration scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationScan {
    pub declarations: Vec<Declaration>,
    pub rejected: Vec<Rejected>,
}

fn quoted_name<'a>(input: &mut Input<'a>) -> IResult<(&'a str, Range<usize>)> {
    preceded(
        (space0, '"'),
        terminated(take_till(0.., ['"', '\n']).with_span(), '"'),
    )
    .parse_next(input)
}

fn body_open(input: &mut Input<'_>) -> IResult<()> {
    (multispace0, '{').void().parse_next(input)
}

/// Scan `text` for declarations, keeping track of rejected headers.
pub fn scan_declarations(text: &str) -> DeclarationScan {
    let mut scan = DeclarationScan::default();
    let mut cursor = 0;

    while let Some((pos, keyword)) = scanner::find_any_keyword(text, &KEYWORDS, cursor) {
        let kind = if keyword == "module" {
            DeclarationKind::Module
        } else {
            DeclarationKind::Pipeline
        };
        let keyword_span = Span::new(pos..pos + keyword.len());

        match parse_declaration(text, kind, keyword_span) {
            Ok(declaration) => {
                debug!(
                    kind:% = kind,
                    name = declaration.name(),
                    body:? = declaration.body().range();
                    "Collected declaration"
                );
                cursor = declaration.body().end() + 1;
                scan.declarations.push(declaration);
            }
            Err(reason) => {
                debug!(kind:% = kind, offset = pos, reason:% = reason; "Skipped declaration");
                cursor = keyword_span.end();
                scan.rejected.push(Rejected {
                    kind,
                    keyword_span,
                    reason,
                });
            }
        }
    }

    scan
}

/// Collect every well-formed declaration in document order.
///
/// # Examples
///
/// ```
/// use loom_parser::declarations::collect_declarations;
///
/// let source = r#"module "a.b" { contract: {} } pipeline "p" { run a.b() }"#;
/// let names: Vec<_> = collect_declarations(source)
///     .iter()
///     .map(|decl| decl.name().to_string())
///     .collect();
/// assert_eq!(names, ["a.b", "p"]);
/// ```
pub fn collect_declarations(text: &str) -> Vec<Declaration> {
    scan_declarations(text).declarations
}

fn parse_declaration(
    text: &str,
    kind: DeclarationKind,
    keyword_span: Span,
) -> Result<Declaration, RejectReason> {
    let start = keyword_span.end();
    let mut input = LocatingSlice::new(&text[start..]);

    let (name, name_range) = quoted_name(&mut input).map_err(|_| RejectReason::MissingName)?;
    body_open(&mut input).map_err(|_| RejectReason::MissingBody)?;

    let open = start + input.current_token_start() - 1;
    let close = scanner::find_block_end(text, open).ok_or(RejectReason::Unterminated)?;

    Ok(Declaration {
        kind,
        name: name.to_string(),
        name_span: Span::new(name_range).shift(start),
        keyword_span,
        body: Span::new(open + 1..close),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        collect_declarations(text)
            .iter()
            .map(|decl| decl.name().to_string())
            .collect()
    }

    #[test]
    fn test_collect_module_and_pipeline() {
        let text = r#"
module "text.summarize" {
  contract: { output: String }
}

pipeline "daily" {
  run text.summarize(input.body)
}
"#;
        let decls = collect_declarations(text);

        assert_eq!(decls.len(), 2);
        assert!(decls[0].is_module());
        assert_eq!(decls[0].name(), "text.summarize");
        assert!(decls[1].is_pipeline());
        assert_eq!(
            decls[1].body_text(text).trim(),
            "run text.summarize(input.body)"
        );
    }

    #[test]
    fn test_spans() {
        let text = r#"module "m" { x }"#;
        let decl = &collect_declarations(text)[0];

        assert_eq!(decl.keyword_span(), Span::new(0..6));
        assert_eq!(decl.name_span(), Span::new(8..9));
        assert_eq!(decl.body(), Span::new(12..15));
    }

    #[test]
    fn test_skip_keyword_suffix() {
        assert!(names(r#"mymodule "x" {}"#).is_empty());
        assert!(names(r#"module_x "x" {}"#).is_empty());
    }

    #[test]
    fn test_skip_keyword_in_string_and_comment() {
        let text = r#"
// module "commented" {}
note: "module \"quoted\" {}"
module "real" {}
"#;
        assert_eq!(names(text), ["real"]);
    }

    #[test]
    fn test_nested_keywords_are_not_top_level() {
        let text = r#"pipeline "outer" { module "inner" {} }"#;

        assert_eq!(names(text), ["outer"]);
    }

    #[test]
    fn test_brace_on_next_line() {
        let text = "module \"m\"\n{\n}";

        assert_eq!(names(text), ["m"]);
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let scan = scan_declarations("module m {}\nmodule \"ok\" {}");

        assert_eq!(scan.declarations.len(), 1);
        assert_eq!(scan.rejected.len(), 1);
        assert_eq!(scan.rejected[0].reason, RejectReason::MissingName);
        assert_eq!(scan.rejected[0].keyword_span, Span::new(0..6));
    }

    #[test]
    fn test_name_must_close_on_same_line() {
        let scan = scan_declarations("module \"m\n\" {}");

        assert!(scan.declarations.is_empty());
        assert_eq!(scan.rejected[0].reason, RejectReason::MissingName);
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let scan = scan_declarations("pipeline \"p\" ;");

        assert_eq!(scan.rejected[0].reason, RejectReason::MissingBody);
    }

    #[test]
    fn test_unterminated_body_is_dropped() {
        let scan = scan_declarations(r#"module "m" { contract: {"#);

        assert!(scan.declarations.is_empty());
        assert_eq!(scan.rejected[0].reason, RejectReason::Unterminated);
    }

    #[test]
    fn test_duplicates_are_all_collected() {
        assert_eq!(names(r#"module "m" {} module "m" {}"#), ["m", "m"]);
    }

    #[test]
    fn test_runtime_block() {
        let text = r#"module "m" { contract: {} runtime { retries: 3 } }"#;
        let decl = &collect_declarations(text)[0];

        let runtime = decl.runtime_block(text).unwrap();
        assert_eq!(text[runtime.range()].trim(), "retries: 3");
    }

    #[test]
    fn test_runtime_block_requires_brace() {
        let text = r#"module "m" { runtime: "fast" }"#;
        let decl = &collect_declarations(text)[0];

        assert!(decl.runtime_block(text).is_none());
    }

    #[test]
    fn test_pipeline_has_no_runtime_block() {
        let text = r#"pipeline "p" { runtime { } }"#;
        let decl = &collect_declarations(text)[0];

        assert!(decl.runtime_block(text).is_none());
    }

    #[test]
    fn test_empty_document() {
        assert!(collect_declarations("").is_empty());
        assert!(collect_declarations("   \n// nothing\n").is_empty());
    }
}
