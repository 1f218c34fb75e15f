// src/engine/mod.rs

//! Editing engine for rungraph.
//!
//! User actions arrive one at a time as [`Edit`]s. The [`EditorSession`]
//! applies each edit to the runnable store (which runs the consistency
//! guard) and then recomputes the layout from scratch, so the layout always
//! matches the current store.
//!
//! Everything here is synchronous and free of IO; the only asynchronous
//! path in the crate is the scheduler gateway.

use crate::dag::{RunnableField, RunnableId};

/// A single user edit against the runnable set.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Create a runnable with default attributes.
    Add,
    /// Delete a runnable and every edge pointing at it.
    Remove(RunnableId),
    /// Replace one attribute.
    SetField(RunnableId, RunnableField),
    /// Change the display name.
    Rename(RunnableId, String),
    /// Replace the whole dependency list.
    SetDependencies(RunnableId, Vec<RunnableId>),
}

/// What an applied edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStep {
    /// Whether the store actually changed (silent no-ops report `false`).
    pub changed: bool,
    /// Id allocated by an [`Edit::Add`].
    pub added: Option<RunnableId>,
}

pub mod session;

pub use session::EditorSession;
