//! Configuration types for Loom analysis and graph layout.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! field, so a partial TOML file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining analysis and layout settings.
//! - [`AnalysisConfig`] - Extra built-in module names.
//! - [`LayoutConfig`] - Ranking engine, pass bound and spacing constants.
//!
//! # Example
//!
//! ```
//! # use loom::config::AppConfig;
//! # use loom::semantic::LayoutEngine;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().engine(), LayoutEngine::Relaxation);
//! assert_eq!(config.layout().rank_spacing(), 280);
//! ```

use serde::Deserialize;

use loom_core::semantic::LayoutEngine;
use loom_parser::CheckConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis configuration section.
    #[serde(default)]
    analysis: AnalysisConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(analysis: AnalysisConfig, layout: LayoutConfig) -> Self {
        Self { analysis, layout }
    }

    /// Returns the analysis configuration.
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Settings for the checking passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Module names callable without a declaration, in addition to the
    /// fixed `io.*` built-ins.
    #[serde(default)]
    builtin_modules: Vec<String>,
}

impl AnalysisConfig {
    pub fn new(builtin_modules: Vec<String>) -> Self {
        Self { builtin_modules }
    }

    /// Returns the extra built-in module names.
    pub fn builtin_modules(&self) -> &[String] {
        &self.builtin_modules
    }

    /// Converts to the parser's configuration.
    pub fn check_config(&self) -> CheckConfig {
        CheckConfig::new(self.builtin_modules.clone())
    }
}

/// Graph layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Ranking algorithm.
    engine: LayoutEngine,

    /// Relaxation pass bound. `None` uses the node count, which always
    /// reaches a fixed point on acyclic graphs.
    passes: Option<usize>,

    /// Horizontal distance between ranks.
    rank_spacing: i32,

    /// Vertical distance between nodes of one rank.
    order_spacing: i32,

    /// Offset of the first rank and first row from the origin.
    margin: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            passes: None,
            rank_spacing: 280,
            order_spacing: 140,
            margin: 40,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration with the given engine and default
    /// spacing.
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Sets the relaxation pass bound.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = Some(passes);
        self
    }

    /// Sets the rank, order and margin spacing.
    pub fn with_spacing(mut self, rank_spacing: i32, order_spacing: i32, margin: i32) -> Self {
        self.rank_spacing = rank_spacing;
        self.order_spacing = order_spacing;
        self.margin = margin;
        self
    }

    /// Returns the ranking algorithm.
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Returns the configured pass bound, if any.
    pub fn passes(&self) -> Option<usize> {
        self.passes
    }

    pub fn rank_spacing(&self) -> i32 {
        self.rank_spacing
    }

    pub fn order_spacing(&self) -> i32 {
        self.order_spacing
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }
}
