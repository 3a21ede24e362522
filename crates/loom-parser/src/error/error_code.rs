//! Error codes for the Loom diagnostic system.
//!
//! Error codes are organized by pass:
//! - `E1xx` - Structural errors (brace balance, declaration headers)
//! - `E2xx` - Resolution errors (modules, variables, declarations)

use std::fmt;

use serde::{Serialize, Serializer};

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Unbalanced braces.
    ///
    /// The document contains a different number of `{` and `}` outside of
    /// string literals and comments.
    E100,

    /// Missing quoted name.
    ///
    /// A `module` or `pipeline` keyword is not followed by a quoted name on
    /// the same line.
    E101,

    // =========================================================================
    // Resolution Errors (E2xx)
    // =========================================================================
    /// Undefined module reference.
    ///
    /// A `run` call names a module that is neither declared in the document
    /// nor built in.
    E200,

    /// Undefined variable reference.
    ///
    /// An identifier in a call's arguments was never bound with `let` earlier
    /// in the enclosing pipeline.
    E201,

    /// Duplicate declaration.
    ///
    /// A module or pipeline name is declared more than once. Reported as a
    /// warning; the last module declaration wins.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unbalanced braces",
            ErrorCode::E101 => "missing quoted name",
            ErrorCode::E200 => "undefined module",
            ErrorCode::E201 => "undefined variable",
            ErrorCode::E202 => "duplicate declaration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unbalanced braces");
        assert_eq!(ErrorCode::E200.description(), "undefined module");
        assert_eq!(ErrorCode::E202.description(), "duplicate declaration");
    }
}
