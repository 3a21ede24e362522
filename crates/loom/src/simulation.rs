//! Interface to an external execution simulator.
//!
//! A simulator takes a document and an input payload and returns the steps a
//! run would take. Loom does not ship one; it only consumes traces, using the
//! module of the current step as the graph's active-module hint.

use serde::{Deserialize, Serialize};

use crate::LoomError;

/// One step of a simulated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    /// Module executed in this step.
    pub module: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_preview: Option<String>,
}

/// Ordered steps and the final output of a simulated run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub steps: Vec<TraceStep>,
    pub output: String,
}

impl ExecutionTrace {
    pub fn new(steps: Vec<TraceStep>, output: impl Into<String>) -> Self {
        Self {
            steps,
            output: output.into(),
        }
    }

    /// Module to highlight while `step` is shown.
    ///
    /// Returns `None` past the last step.
    pub fn active_module_at(&self, step: usize) -> Option<&str> {
        self.steps.get(step).map(|step| step.module.as_str())
    }
}

/// A service that fabricates an execution trace for a pipeline.
///
/// The trace content is not validated against the document.
pub trait ExecutionSimulator {
    /// Simulate running `source` with `input`.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`LoomError::Simulation`].
    fn simulate(&self, source: &str, input: &str) -> Result<ExecutionTrace, LoomError>;
}
