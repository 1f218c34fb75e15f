// src/dag/store.rs

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::config::model::ConfigFile;
use crate::dag::guard;
use crate::dag::runnable::{Runnable, RunnableAttrs, RunnableField, RunnableId};
use crate::errors::{Result, RungraphError};

/// Canonical set of live runnables, keyed by identity.
///
/// Enumeration order is allocation order: ids are handed out monotonically
/// and never reused, so iterating the underlying `BTreeMap` visits runnables
/// in the order they were created. The layout engine relies on this for
/// deterministic horizontal placement.
///
/// Every mutation keeps two invariants (see [`guard`]):
/// - no dependency list mentions an id that is not live,
/// - the dependency graph is acyclic.
#[derive(Debug, Clone, Default)]
pub struct RunnableStore {
    runnables: BTreeMap<RunnableId, Runnable>,
    next_id: u32,
}

impl RunnableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a validated [`ConfigFile`].
    ///
    /// Runnables are created in the order the file declares them, then their
    /// `after` lists are resolved to ids.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut store = Self::new();
        let mut ids: HashMap<&str, RunnableId> = HashMap::new();

        for (name, rc) in cfg.runnable.iter() {
            let id = store.insert(name, RunnableAttrs::from(rc))?;
            ids.insert(name.as_str(), id);
        }

        for (name, rc) in cfg.runnable.iter() {
            let deps = rc
                .after
                .iter()
                .map(|dep| {
                    ids.get(dep.as_str()).copied().ok_or_else(|| {
                        RungraphError::RunnableNotFound(format!(
                            "runnable '{}' depends on unknown runnable '{}'",
                            name, dep
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            store.set_dependencies(ids[name.as_str()], &deps)?;
        }

        Ok(store)
    }

    /// Insert a new runnable with default attributes and no dependencies.
    ///
    /// The display name is `Runnable<id>`, suffixed if that name is taken.
    pub fn add(&mut self) -> RunnableId {
        let id = self.allocate_id();
        let mut name = format!("Runnable{}", id.0);
        let mut suffix = 1;
        while self.id_of(&name).is_some() {
            name = format!("Runnable{}_{}", id.0, suffix);
            suffix += 1;
        }

        debug!(id = %id, name = %name, "adding runnable");
        self.runnables.insert(
            id,
            Runnable {
                id,
                name,
                attrs: RunnableAttrs::default(),
                deps: Vec::new(),
            },
        );
        id
    }

    /// Insert a named runnable with the given attributes and no dependencies.
    pub fn insert(&mut self, name: &str, attrs: RunnableAttrs) -> Result<RunnableId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RungraphError::InvalidField {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.id_of(name).is_some() {
            return Err(RungraphError::DuplicateName(name.to_string()));
        }

        let id = self.allocate_id();
        debug!(id = %id, name = %name, "inserting runnable");
        self.runnables.insert(
            id,
            Runnable {
                id,
                name: name.to_string(),
                attrs,
                deps: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Delete `id` and strip it from every remaining dependency list.
    ///
    /// Unknown ids are a silent no-op; returns whether anything was removed.
    pub fn remove(&mut self, id: RunnableId) -> bool {
        let Some(removed) = self.runnables.remove(&id) else {
            debug!(id = %id, "remove of unknown runnable; ignoring");
            return false;
        };

        let touched = guard::purge_references(self.runnables.values_mut(), id);
        debug!(
            id = %id,
            name = %removed.name,
            dependents_updated = touched,
            "removed runnable"
        );
        true
    }

    /// Replace one attribute of `id`.
    pub fn set_field(&mut self, id: RunnableId, field: RunnableField) -> Result<()> {
        let runnable = self.get_mut(id)?;
        field.apply_to(&mut runnable.attrs)?;
        debug!(id = %id, field = field.name(), "updated runnable field");
        Ok(())
    }

    /// Change the display name of `id`.
    ///
    /// Empty (after trimming) and unchanged names are silent no-ops and
    /// return `Ok(false)`. Edges are held by id, so dependents follow the
    /// rename without any rewrite.
    pub fn rename(&mut self, id: RunnableId, new_name: &str) -> Result<bool> {
        let new_name = new_name.trim();
        let current = &self.get(id).ok_or_else(|| not_found(id))?.name;

        if new_name.is_empty() || new_name == current {
            debug!(id = %id, "rename to empty or unchanged name; ignoring");
            return Ok(false);
        }
        if let Some(other) = self.id_of(new_name) {
            if other != id {
                warn!(id = %id, name = %new_name, "rename rejected; name already in use");
                return Err(RungraphError::DuplicateName(new_name.to_string()));
            }
        }

        let runnable = self.get_mut(id)?;
        debug!(id = %id, from = %runnable.name, to = %new_name, "renamed runnable");
        runnable.name = new_name.to_string();
        Ok(true)
    }

    /// Replace the full dependency list of `id`.
    ///
    /// Self-references and duplicates are dropped. Unknown dependencies and
    /// edits that would close a cycle are rejected and leave the store
    /// unchanged.
    pub fn set_dependencies(&mut self, id: RunnableId, deps: &[RunnableId]) -> Result<()> {
        if !self.contains(id) {
            return Err(not_found(id));
        }

        let deps = guard::sanitize_dependencies(id, deps);
        guard::check_references(self, &deps)?;
        guard::check_acyclic_with(self, id, &deps)?;

        let runnable = self.get_mut(id)?;
        debug!(id = %id, deps = ?deps, "set dependencies");
        runnable.deps = deps;
        Ok(())
    }

    /// Append a single dependency edge. Returns `Ok(false)` if it already
    /// existed or points at `id` itself.
    pub fn add_dependency(&mut self, id: RunnableId, dep: RunnableId) -> Result<bool> {
        let current = self.get(id).ok_or_else(|| not_found(id))?;
        if dep == id || current.deps.contains(&dep) {
            return Ok(false);
        }

        let mut deps = current.deps.clone();
        deps.push(dep);
        self.set_dependencies(id, &deps)?;
        Ok(true)
    }

    /// Remove a single dependency edge. Returns whether it existed.
    pub fn remove_dependency(&mut self, id: RunnableId, dep: RunnableId) -> Result<bool> {
        let runnable = self.get_mut(id)?;
        let before = runnable.deps.len();
        runnable.deps.retain(|d| *d != dep);
        Ok(runnable.deps.len() != before)
    }

    pub fn get(&self, id: RunnableId) -> Option<&Runnable> {
        self.runnables.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Runnable> {
        self.runnables.values().find(|r| r.name == name)
    }

    pub fn id_of(&self, name: &str) -> Option<RunnableId> {
        self.get_by_name(name).map(|r| r.id)
    }

    pub fn contains(&self, id: RunnableId) -> bool {
        self.runnables.contains_key(&id)
    }

    /// Live runnables in enumeration (allocation) order.
    pub fn iter(&self) -> impl Iterator<Item = &Runnable> {
        self.runnables.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = RunnableId> + '_ {
        self.runnables.keys().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.runnables.values().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.runnables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runnables.is_empty()
    }

    /// Runnables that list `id` as a direct dependency.
    pub fn dependents_of(&self, id: RunnableId) -> Vec<RunnableId> {
        self.runnables
            .values()
            .filter(|r| r.deps.contains(&id))
            .map(|r| r.id)
            .collect()
    }

    /// Runnables with no dependencies.
    pub fn roots(&self) -> Vec<RunnableId> {
        self.runnables
            .values()
            .filter(|r| r.deps.is_empty())
            .map(|r| r.id)
            .collect()
    }

    /// Dependency names of `id`, in display order.
    pub fn dependency_names(&self, id: RunnableId) -> Vec<String> {
        self.get(id)
            .map(|r| {
                r.deps
                    .iter()
                    .filter_map(|dep| self.get(*dep))
                    .map(|dep| dep.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get_mut(&mut self, id: RunnableId) -> Result<&mut Runnable> {
        self.runnables.get_mut(&id).ok_or_else(|| not_found(id))
    }

    fn allocate_id(&mut self) -> RunnableId {
        let id = RunnableId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn not_found(id: RunnableId) -> RungraphError {
    RungraphError::RunnableNotFound(format!("no live runnable with id {id}"))
}
