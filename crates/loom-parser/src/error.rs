//! Error and diagnostic system for the Loom analysis passes.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating diagnostics across passes
//!
//! # Overview
//!
//! Every problem found in a document is a [`Diagnostic`]. Analysis never
//! stops at the first problem: the structural and semantic passes feed a
//! shared collector, and callers receive every diagnostic at once. The
//! strict [`check`](crate::check) entry point wraps error diagnostics in a
//! [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use loom_parser::error::{Diagnostic, ErrorCode};
//! # use loom_parser::Span;
//!
//! let span = Span::new(100..120);
//! let first_span = Span::new(10..30);
//!
//! let diag = Diagnostic::warning("module `text.summarize` is declared more than once")
//!     .with_code(ErrorCode::E202)
//!     .with_label(span, "duplicate declaration")
//!     .with_secondary_label(first_span, "first declared here")
//!     .with_help("the last declaration wins");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
