// src/dag/mod.rs

//! Runnable dependency graph and its layered layout.
//!
//! - [`runnable`] defines runnable identity, attributes and field edits.
//! - [`store`] owns the live runnable set and every mutation on it.
//! - [`guard`] keeps the set free of dangling edges and cycles.
//! - [`layout`] ranks runnables by longest dependency path and places them.
//! - [`diagram`] projects a laid-out store into drawable nodes and edges.

pub mod diagram;
pub mod guard;
pub mod layout;
pub mod runnable;
pub mod store;

pub use diagram::{Diagram, DiagramEdge, DiagramNode};
pub use layout::{Layout, LayoutOptions, Position};
pub use runnable::{Runnable, RunnableAttrs, RunnableField, RunnableId};
pub use store::RunnableStore;
