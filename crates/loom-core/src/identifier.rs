//! Interned identifiers for module names, variables and graph nodes.
//!
//! Every name that flows from the source text into a symbol table or a graph
//! is stored as an [`Id`]. Ids are cheap to copy, hash and compare, which
//! matters because the editor re-runs the whole analysis on every keystroke.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all analysis runs.
///
/// Interned strings are never removed. Only names that become symbols or
/// graph nodes are interned; lookups go through [`Id::get`], which never adds
/// an entry.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use loom_core::identifier::Id;
///
/// let summarize = Id::new("text.summarize");
/// assert_eq!(summarize, "text.summarize");
///
/// let runtime = summarize.create_nested(Id::new("runtime"));
/// assert_eq!(runtime, "text.summarize::runtime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Looks up `name` without interning it.
    ///
    /// Returns `None` when `name` was never interned, so no symbol or node can
    /// carry it.
    pub fn get(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }

    /// Creates a nested ID by joining this ID and `child_id` with `::`.
    ///
    /// Used for nodes that belong to another node, such as the runtime
    /// block of a module.
    pub fn create_nested(&self, child_id: Id) -> Self {
        let mut interner = interner();
        let nested_name = format!(
            "{}::{}",
            interner.resolve(self.0).unwrap_or_default(),
            interner.resolve(child_id.0).unwrap_or_default()
        );
        Self(interner.get_or_intern(nested_name))
    }

    /// Returns an owned copy of the identifier text.
    pub fn to_text(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        f.write_str(interner.resolve(self.0).unwrap_or_default())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
