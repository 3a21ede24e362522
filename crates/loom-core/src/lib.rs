//! Loom Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Loom analysis
//! crates. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Integer layout coordinates ([`geometry::Point`])
//! - **Semantic**: Declaration, node, edge and layout kinds ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
