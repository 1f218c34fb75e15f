// src/dag/guard.rs

//! Graph consistency checks run by every store mutation.
//!
//! Two invariants are kept here:
//! - no dangling edges: every dependency names a live runnable,
//! - acyclicity: no runnable transitively depends on itself.
//!
//! Cycle detection uses a `petgraph` topological sort with edges pointing
//! from a dependency to its dependent.

use std::fmt::Display;

use petgraph::algo::toposort;
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use tracing::trace;

use crate::dag::runnable::{Runnable, RunnableId};
use crate::dag::store::RunnableStore;
use crate::errors::{Result, RungraphError};

/// Topologically sort `nodes` given `(dependency, dependent)` edges.
///
/// Returns the order (dependencies first) or a `DagCycle` error naming one
/// node on a cycle.
pub fn topological_order<N, I, E>(nodes: I, edges: E) -> Result<Vec<N>>
where
    N: NodeTrait + Display,
    I: IntoIterator<Item = N>,
    E: IntoIterator<Item = (N, N)>,
{
    sort_nodes(nodes, edges).map_err(|node| {
        RungraphError::DagCycle(format!(
            "cycle detected in runnable graph involving runnable '{}'",
            node
        ))
    })
}

fn sort_nodes<N, I, E>(nodes: I, edges: E) -> std::result::Result<Vec<N>, N>
where
    N: NodeTrait,
    I: IntoIterator<Item = N>,
    E: IntoIterator<Item = (N, N)>,
{
    let mut graph: DiGraphMap<N, ()> = DiGraphMap::new();
    for node in nodes {
        graph.add_node(node);
    }
    for (dep, dependent) in edges {
        graph.add_edge(dep, dependent, ());
    }

    toposort(&graph, None).map_err(|cycle| cycle.node_id())
}

/// Topological order of every runnable in `store`, dependencies first.
pub fn store_topological_order(store: &RunnableStore) -> Result<Vec<RunnableId>> {
    sort_nodes(store.ids(), store_edges(store, None)).map_err(|id| cycle_error(store, id))
}

/// Strip `removed` from every dependency list. Returns how many lists changed.
pub(crate) fn purge_references<'a>(
    runnables: impl Iterator<Item = &'a mut Runnable>,
    removed: RunnableId,
) -> usize {
    let mut touched = 0;
    for runnable in runnables {
        let before = runnable.deps.len();
        runnable.deps.retain(|dep| *dep != removed);
        if runnable.deps.len() != before {
            trace!(runnable = %runnable.name, removed = %removed, "purged dependency edge");
            touched += 1;
        }
    }
    touched
}

/// Drop self-references and repeated entries, keeping first occurrences in order.
pub(crate) fn sanitize_dependencies(id: RunnableId, deps: &[RunnableId]) -> Vec<RunnableId> {
    let mut out: Vec<RunnableId> = Vec::with_capacity(deps.len());
    for dep in deps {
        if *dep != id && !out.contains(dep) {
            out.push(*dep);
        }
    }
    out
}

/// Every proposed dependency must be a live runnable.
pub(crate) fn check_references(store: &RunnableStore, deps: &[RunnableId]) -> Result<()> {
    match deps.iter().find(|dep| !store.contains(**dep)) {
        Some(missing) => Err(RungraphError::RunnableNotFound(format!(
            "dependency id {} does not refer to a live runnable",
            missing
        ))),
        None => Ok(()),
    }
}

/// Would replacing `id`'s dependency list with `deps` keep the graph acyclic?
pub(crate) fn check_acyclic_with(
    store: &RunnableStore,
    id: RunnableId,
    deps: &[RunnableId],
) -> Result<()> {
    sort_nodes(store.ids(), store_edges(store, Some((id, deps))))
        .map(|_order| ())
        .map_err(|node| cycle_error(store, node))
}

/// `(dependency, dependent)` edges of `store`, optionally with one runnable's
/// dependency list swapped for a proposed one.
fn store_edges<'a>(
    store: &'a RunnableStore,
    replace: Option<(RunnableId, &'a [RunnableId])>,
) -> impl Iterator<Item = (RunnableId, RunnableId)> + 'a {
    store.iter().flat_map(move |runnable| {
        let deps = match replace {
            Some((id, proposed)) if id == runnable.id => proposed,
            _ => runnable.deps.as_slice(),
        };
        deps.iter().map(move |dep| (*dep, runnable.id))
    })
}

fn cycle_error(store: &RunnableStore, id: RunnableId) -> RungraphError {
    let name = store
        .get(id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| format!("#{id}"));
    RungraphError::DagCycle(format!(
        "cycle detected in runnable graph involving runnable '{}'",
        name
    ))
}
