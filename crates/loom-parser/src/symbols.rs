//! The set of module names a document may call.

use indexmap::IndexSet;
use log::debug;

use loom_core::identifier::Id;

use crate::declarations::Declaration;

/// Module names every document can call without declaring them.
pub const BUILTIN_MODULES: [&str; 5] = [
    "io.write_file",
    "io.write_output",
    "io.read_logs",
    "io.read_fs",
    "io.write_fs",
];

/// Known module names, built-ins first, then declared modules in document
/// order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    modules: IndexSet<Id>,
}

impl SymbolTable {
    /// Build the table from the fixed built-ins, `extra_builtins` and the
    /// module declarations in `declarations`.
    ///
    /// # Examples
    ///
    /// ```
    /// use loom_parser::{declarations::collect_declarations, symbols::SymbolTable};
    ///
    /// let decls = collect_declarations(r#"module "text.summarize" {}"#);
    /// let symbols = SymbolTable::build(&decls, &[] as &[&str]);
    ///
    /// assert!(symbols.contains("text.summarize"));
    /// assert!(symbols.contains("io.write_output"));
    /// assert!(!symbols.contains("text.translate"));
    /// ```
    pub fn build<S: AsRef<str>>(declarations: &[Declaration], extra_builtins: &[S]) -> Self {
        let builtins = BUILTIN_MODULES
            .iter()
            .copied()
            .chain(extra_builtins.iter().map(AsRef::as_ref));
        let declared = declarations
            .iter()
            .filter(|decl| decl.is_module())
            .map(Declaration::name);

        let modules: IndexSet<Id> = builtins.chain(declared).map(Id::new).collect();

        debug!(modules_count = modules.len(); "Built symbol table");
        Self { modules }
    }

    /// Returns `true` if `name` is a built-in or declared module.
    ///
    /// Looking up a name never interns it.
    pub fn contains(&self, name: &str) -> bool {
        Id::get(name).is_some_and(|id| self.modules.contains(&id))
    }
}
