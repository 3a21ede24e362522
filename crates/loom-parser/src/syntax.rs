//! Recognizers for the statement forms found inside pipeline bodies.
//!
//! The language has no full grammar here. Each recognizer matches one small
//! pattern at a given position and reports byte spans relative to the text it
//! was handed:
//!
//! - `let <name> =` bindings
//! - `run <module.path>(<args>)` calls, optionally prefixed by a binding
//! - `<a> -> <b> -> ...` arrow chains (`→` is accepted as well)
//! - identifier references inside call arguments
//!
//! Anything that does not match is skipped, never reported.

use std::ops::Range;

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, opt, preceded, repeat, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location as _},
    token::{literal, one_of, take_while},
};

use crate::{
    scanner::{self, Delimiter, Region},
    span::Span,
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Bare words that are literals, never variable references.
pub const LITERAL_WORDS: [&str; 3] = ["true", "false", "null"];

/// A `let <name> =` binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub span: Span,
}

/// A `run <module>(...)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call<'a> {
    /// The `let` binding in front of the call, if any.
    pub binding: Option<Binding<'a>>,
    pub module: &'a str,
    pub module_span: Span,
    /// Text between the parentheses; `None` when the call never closes.
    pub args: Option<Span>,
    /// Offset just past the call.
    pub end: usize,
}

/// A chain of two or more endpoints joined by arrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowChain<'a> {
    pub endpoints: Vec<(&'a str, Span)>,
    /// Offset just past the last endpoint.
    pub end: usize,
}

impl ArrowChain<'_> {
    /// Consecutive endpoint pairs, in source order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.endpoints
            .windows(2)
            .map(|pair| (pair[0].0, pair[1].0))
    }
}

/// A statement inside a pipeline body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Call(Call<'a>),
    Arrow(ArrowChain<'a>),
}

/// An identifier path referenced inside call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// The full dotted path, e.g. `input.user.name`.
    pub path: &'a str,
    pub span: Span,
}

impl<'a> Reference<'a> {
    /// The segment before the first `.`.
    pub fn root(&self) -> &'a str {
        self.path.split('.').next().unwrap_or(self.path)
    }

    /// Span of [`root`](Self::root).
    pub fn root_span(&self) -> Span {
        Span::new(self.span.start()..self.span.start() + self.root().len())
    }

    /// The second segment, e.g. `user` in `input.user.name`.
    pub fn field(&self) -> Option<&'a str> {
        self.path.split('.').nth(1)
    }
}

fn identifier<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        one_of(scanner::is_ident_start),
        take_while(0.., scanner::is_ident_char),
    )
        .take()
        .parse_next(input)
}

fn dotted_path<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (identifier, repeat::<_, _, (), _, _>(0.., ('.', identifier)))
        .take()
        .parse_next(input)
}

fn let_head<'a>(input: &mut Input<'a>) -> IResult<(&'a str, Range<usize>)> {
    preceded(
        (literal("let"), space1),
        terminated(identifier.with_span(), (space0, '=')),
    )
    .parse_next(input)
}

fn run_head<'a>(input: &mut Input<'a>) -> IResult<(&'a str, Range<usize>)> {
    preceded(
        (literal("run"), space1),
        terminated(dotted_path.with_span(), (space0, '(')),
    )
    .parse_next(input)
}

type CallHead<'a> = (Option<(&'a str, Range<usize>)>, (&'a str, Range<usize>));

fn call_head<'a>(input: &mut Input<'a>) -> IResult<CallHead<'a>> {
    (opt(terminated(let_head, space0)), run_head).parse_next(input)
}

fn arrow<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    alt((literal("->"), literal("→"))).parse_next(input)
}

fn arrow_chain<'a>(input: &mut Input<'a>) -> IResult<Vec<(&'a str, Range<usize>)>> {
    let first = dotted_path.with_span().parse_next(input)?;
    let rest: Vec<_> = repeat(
        1..,
        preceded((space0, arrow, space0), dotted_path.with_span()),
    )
    .parse_next(input)?;

    let mut endpoints = Vec::with_capacity(rest.len() + 1);
    endpoints.push(first);
    endpoints.extend(rest);
    Ok(endpoints)
}

/// Recognize `let <name> =` at the start of `line`, after indentation.
///
/// # Examples
///
/// ```
/// use loom_parser::syntax::let_binding;
///
/// let binding = let_binding("  let draft = run text.write(input.topic)").unwrap();
/// assert_eq!(binding.name, "draft");
/// assert!(let_binding("letter = 1").is_none());
/// ```
pub fn let_binding(line: &str) -> Option<Binding<'_>> {
    let indent = line.len() - line.trim_start().len();
    let mut input = LocatingSlice::new(&line[indent..]);
    let (name, range) = let_head(&mut input).ok()?;
    Some(Binding {
        name,
        span: Span::new(range).shift(indent),
    })
}

/// Recognize a call, with optional `let` prefix, starting exactly at `pos`.
pub fn call_at(text: &str, pos: usize) -> Option<Call<'_>> {
    let mut input = LocatingSlice::new(&text[pos..]);
    let (binding, (module, module_range)) = call_head(&mut input).ok()?;
    let open_paren = pos + input.current_token_start() - 1;

    let (args, end) = match scanner::find_matching(text, open_paren, Delimiter::Paren) {
        Some(close) => (Some(Span::new(open_paren + 1..close)), close + 1),
        None => (None, open_paren + 1),
    };

    Some(Call {
        binding: binding.map(|(name, range)| Binding {
            name,
            span: Span::new(range).shift(pos),
        }),
        module,
        module_span: Span::new(module_range).shift(pos),
        args,
        end,
    })
}

/// Every `run <module>(` call on one line of code.
///
/// The `let` prefix is not attached here; line-oriented callers recognize it
/// separately with [`let_binding`].
pub fn run_calls(line: &str) -> Vec<Call<'_>> {
    let mut calls = Vec::new();
    let mut from = 0;
    while let Some(pos) = scanner::find_keyword(line, "run", from) {
        from = pos + "run".len();
        if let Some(call) = call_at(line, pos) {
            from = from.max(call.end);
            calls.push(call);
        }
    }
    calls
}

/// Recognize an arrow chain starting exactly at `pos`.
///
/// # Examples
///
/// ```
/// use loom_parser::syntax::arrow_chain_at;
///
/// let chain = arrow_chain_at("ingest -> analyze → generate", 0).unwrap();
/// let links: Vec<_> = chain.links().collect();
/// assert_eq!(links, [("ingest", "analyze"), ("analyze", "generate")]);
/// ```
pub fn arrow_chain_at(text: &str, pos: usize) -> Option<ArrowChain<'_>> {
    let mut input = LocatingSlice::new(&text[pos..]);
    let endpoints = arrow_chain(&mut input).ok()?;
    let end = pos + input.current_token_start();
    Some(ArrowChain {
        endpoints: endpoints
            .into_iter()
            .map(|(name, range)| (name, Span::new(range).shift(pos)))
            .collect(),
        end,
    })
}

/// Calls and arrow chains in `body`, in document order.
///
/// Strings and comments are skipped. A call's arguments are consumed with
/// the call, so nothing inside them is reported as a separate statement.
pub fn statements(body: &str) -> Vec<Statement<'_>> {
    let regions = scanner::classify(body);
    let mut statements = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        if regions[pos] == Region::Code && starts_word(body, pos) {
            if let Some(call) = call_at(body, pos) {
                pos = call.end;
                statements.push(Statement::Call(call));
                continue;
            }
            if let Some(chain) = arrow_chain_at(body, pos) {
                pos = chain.end;
                statements.push(Statement::Arrow(chain));
                continue;
            }
        }
        pos += 1;
    }

    statements
}

/// Identifier references in call arguments.
///
/// Exclusions, applied in order:
/// 1. text inside string literals or comments
/// 2. numeric literals, including forms like `1.5e3` and `0x1f`
/// 3. member accesses that do not start a path (`f().field`)
/// 4. object keys: a path followed by `:`
/// 5. the literals `true`, `false` and `null`
///
/// `input` paths are reported; callers decide what to do with them.
pub fn references(args: &str) -> Vec<Reference<'_>> {
    let regions = scanner::classify(args);
    let mut references = Vec::new();
    let mut pos = 0;

    while pos < args.len() {
        let Some(c) = args[pos..].chars().next() else {
            break;
        };
        if regions[pos] != Region::Code {
            pos += c.len_utf8();
            continue;
        }

        if c.is_numeric() {
            pos += args[pos..]
                .find(|c: char| !(scanner::is_ident_char(c) || c == '.'))
                .unwrap_or(args.len() - pos);
            continue;
        }

        if !scanner::is_ident_start(c) {
            pos += c.len_utf8();
            continue;
        }

        let mut input = LocatingSlice::new(&args[pos..]);
        let Ok(path) = dotted_path(&mut input) else {
            pos += c.len_utf8();
            continue;
        };
        let span = Span::new(pos..pos + path.len());
        pos = span.end();

        let is_member = args[..span.start()].ends_with('.');
        let is_key = args[span.end()..].trim_start().starts_with(':');
        let root = path.split('.').next().unwrap_or(path);
        if is_member || is_key || LITERAL_WORDS.contains(&root) {
            continue;
        }

        references.push(Reference { path, span });
    }

    references
}

fn starts_word(text: &str, pos: usize) -> bool {
    if !text.is_char_boundary(pos) {
        return false;
    }
    let starts_ident = text[pos..].chars().next().is_some_and(scanner::is_ident_start);
    let detached = text[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !scanner::is_ident_char(c) && c != '.');
    starts_ident && detached
}
