//! Semantic vocabulary shared by the checker, the graph builder and the CLI.
//!
//! - [`DeclarationKind`] - the two top-level declaration forms
//! - [`NodeKind`] - visual style category of a dependency graph node
//! - [`EdgeKind`] - data-flow versus structural edges
//! - [`LayoutEngine`] - available ranking algorithms

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `module "<name>" { ... }`
    Module,
    /// `pipeline "<name>" { ... }`
    Pipeline,
}

impl DeclarationKind {
    /// The keyword that introduces this declaration in source text.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Pipeline => "pipeline",
        }
    }
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind of a dependency graph node.
///
/// Renderers pick a visual style per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A declared module.
    Module,
    /// The `runtime { ... }` block nested in a module.
    Runtime,
    /// A pipeline input field referenced as `input.<name>`.
    Input,
    /// An arrow endpoint that was never declared as a module.
    Inferred,
}

/// Kind of a dependency graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Data flows from the source into the target.
    DataFlow,
    /// Ownership link from a module to its runtime block, drawn dashed.
    Structural,
}

/// Available ranking algorithms for graph layout.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Relaxation` - Bounded iterative relaxation over the edge set (default)
/// - `LongestPath` - Exact longest-path layering over a topological order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Bounded relaxation (default)
    #[default]
    Relaxation,
    /// Longest-path layering, falls back to relaxation on cycles
    LongestPath,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relaxation" => Ok(Self::Relaxation),
            "longest_path" => Ok(Self::LongestPath),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Relaxation => "relaxation",
            LayoutEngine::LongestPath => "longest_path",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_engine_from_str() {
        assert_eq!(
            "relaxation".parse::<LayoutEngine>(),
            Ok(LayoutEngine::Relaxation)
        );
        assert_eq!(
            "longest_path".parse::<LayoutEngine>(),
            Ok(LayoutEngine::LongestPath)
        );
        assert!("sugiyama".parse::<LayoutEngine>().is_err());
    }

    #[test]
    fn test_layout_engine_display_round_trips() {
        for engine in [LayoutEngine::Relaxation, LayoutEngine::LongestPath] {
            assert_eq!(engine.to_string().parse::<LayoutEngine>(), Ok(engine));
        }
    }

    #[test]
    fn test_declaration_keyword() {
        assert_eq!(DeclarationKind::Module.keyword(), "module");
        assert_eq!(DeclarationKind::Pipeline.to_string(), "pipeline");
    }
}
