// src/engine/session.rs

//! Store + always-current layout.

use tracing::{debug, warn};

use crate::dag::{Diagram, Layout, LayoutOptions, RunnableStore};
use crate::engine::{Edit, EditStep};
use crate::errors::Result;

/// Owns a runnable store and the layout derived from it.
///
/// After every successful [`apply`](Self::apply) the layout is recomputed
/// from scratch. A rejected edit leaves both store and layout untouched.
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: RunnableStore,
    options: LayoutOptions,
    layout: Layout,
}

impl EditorSession {
    pub fn new(store: RunnableStore, options: LayoutOptions) -> Result<Self> {
        let layout = Layout::compute(&store, &options)?;
        Ok(Self {
            store,
            options,
            layout,
        })
    }

    pub fn store(&self) -> &RunnableStore {
        &self.store
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn diagram(&self) -> Diagram {
        Diagram::project(&self.store, &self.layout)
    }

    /// Switch spacing/policy and re-lay out the current store.
    pub fn set_options(&mut self, options: LayoutOptions) -> Result<()> {
        self.layout = Layout::compute(&self.store, &options)?;
        self.options = options;
        Ok(())
    }

    /// Apply one edit and recompute the layout.
    pub fn apply(&mut self, edit: Edit) -> Result<EditStep> {
        // Edits land on a scratch copy; it is adopted only once relayout succeeds.
        let mut next = self.store.clone();
        let step = apply_to_store(&mut next, &edit).inspect_err(|e| {
            warn!(edit = ?edit, error = %e, "edit rejected");
        })?;

        if step.changed {
            let layout = Layout::compute(&next, &self.options)?;
            self.store = next;
            self.layout = layout;
            debug!(
                edit = ?edit,
                runnables = self.store.len(),
                levels = self.layout.levels().len(),
                "edit applied; layout recomputed"
            );
        }

        Ok(step)
    }
}

fn apply_to_store(store: &mut RunnableStore, edit: &Edit) -> Result<EditStep> {
    let mut step = EditStep {
        changed: true,
        added: None,
    };

    match edit {
        Edit::Add => step.added = Some(store.add()),
        Edit::Remove(id) => step.changed = store.remove(*id),
        Edit::SetField(id, field) => store.set_field(*id, *field)?,
        Edit::Rename(id, name) => step.changed = store.rename(*id, name)?,
        Edit::SetDependencies(id, deps) => store.set_dependencies(*id, deps)?,
    }

    Ok(step)
}
