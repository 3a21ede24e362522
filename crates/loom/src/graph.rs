//! Dependency graphs extracted from Loom documents.
//!
//! # Architecture
//!
//! - [`Graph`], [`Node`], [`Edge`]: the positioned graph handed to renderers
//! - [`GraphBuilder`]: walks declarations and pipeline statements to create
//!   nodes and edges
//!
//! Node ids:
//! - module nodes use the module name
//! - runtime nodes use `<module>::runtime`
//! - input nodes use the field name, so `input.z` becomes `z`
//! - inferred nodes use the arrow endpoint text
//!
//! Edge ids are `<source>-<target>`; one edge exists per ordered pair.

mod builder;
mod model;

pub use builder::GraphBuilder;
pub use model::{Edge, Graph, Node};
