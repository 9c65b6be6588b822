// src/graph/mod.rs

//! Projection of the simulation onto a node/edge diagram.
//!
//! - [`model`] defines render nodes, edges and styles.
//! - [`infra`] lists the static infrastructure nodes and the archive edge.
//! - [`layout`] places runner nodes on a grid.
//! - [`projector`] builds a [`Projection`] from the live job set.

pub mod infra;
pub mod layout;
pub mod model;
pub mod projector;

pub use layout::GridLayout;
pub use model::{
    EdgeStyle, NodeIcon, NodeKind, Position, Projection, RenderEdge, RenderNode, Tone,
};
pub use projector::GraphProjector;
