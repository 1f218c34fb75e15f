// src/dag/diagram.rs

//! Drawable node/edge records built from a store and its layout.

use serde::Serialize;

use crate::dag::layout::{Layout, Position};
use crate::dag::runnable::RunnableId;
use crate::dag::store::RunnableStore;
use crate::types::ScheduleKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub id: RunnableId,
    pub label: String,
    pub depth: usize,
    pub position: Position,
    pub kind: ScheduleKind,
    pub criticality: u8,
    pub affinity: u32,
    pub execution_time: u32,
    /// Present for periodic runnables only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

/// Edge from a dependency (`source`) to the runnable that waits on it (`target`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: RunnableId,
    pub target: RunnableId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl Diagram {
    /// Project every runnable in `store` to a node and every dependency to
    /// an edge. Nodes follow store enumeration order; edges follow each
    /// runnable's dependency order.
    pub fn project(store: &RunnableStore, layout: &Layout) -> Self {
        let nodes = store
            .iter()
            .map(|r| DiagramNode {
                id: r.id,
                label: r.name.clone(),
                depth: layout.depth(r.id).unwrap_or(0),
                position: layout.position(r.id),
                kind: r.attrs.kind,
                criticality: r.attrs.criticality,
                affinity: r.attrs.affinity,
                execution_time: r.attrs.execution_time,
                period: match r.attrs.kind {
                    ScheduleKind::Periodic => Some(r.attrs.period),
                    ScheduleKind::Event => None,
                },
            })
            .collect();

        let edges = store
            .iter()
            .flat_map(|r| {
                r.deps.iter().map(move |dep| DiagramEdge {
                    id: format!("e{}-{}", dep, r.id),
                    source: *dep,
                    target: r.id,
                })
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: RunnableId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
