// src/dag/layout.rs

//! Layered layout of the runnable graph.
//!
//! Each runnable gets a depth (longest dependency path from a root, roots
//! are depth 0) and a position:
//! - `y = depth * vertical_spacing`
//! - within a level of `m` runnables (in store enumeration order) the `i`-th
//!   gets `x = i * horizontal_spacing - (m - 1) * horizontal_spacing / 2`,
//!   i.e. the level is centred on `x = 0`.
//!
//! The layout is recomputed from scratch on every change. A topological sort
//! runs first, so a cyclic graph is reported as `DagCycle` instead of
//! recursing forever.

use std::collections::HashMap;
use std::f64::consts::TAU;

use serde::Serialize;
use tracing::trace;

use crate::config::model::LayoutSection;
use crate::dag::guard;
use crate::dag::runnable::RunnableId;
use crate::dag::store::RunnableStore;
use crate::errors::Result;
use crate::types::LayoutPolicy;

/// Default distance between consecutive levels.
pub const DEFAULT_VERTICAL_SPACING: f64 = 120.0;
/// Default distance between neighbours within a level.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 120.0;
/// Default circle radius for [`LayoutPolicy::Radial`].
pub const DEFAULT_RADIUS: f64 = 200.0;

/// A point in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub vertical_spacing: f64,
    pub horizontal_spacing: f64,
    pub policy: LayoutPolicy,
    pub radius: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            policy: LayoutPolicy::Layered,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl From<&LayoutSection> for LayoutOptions {
    fn from(section: &LayoutSection) -> Self {
        Self {
            vertical_spacing: section.vertical_spacing,
            horizontal_spacing: section.horizontal_spacing,
            policy: section.policy,
            radius: section.radius,
        }
    }
}

/// Derived rank and position assignment for one snapshot of a store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    depths: HashMap<RunnableId, usize>,
    levels: Vec<Vec<RunnableId>>,
    positions: HashMap<RunnableId, Position>,
}

impl Layout {
    /// Compute depths, levels and positions for `store`.
    pub fn compute(store: &RunnableStore, options: &LayoutOptions) -> Result<Self> {
        let depths = compute_depths(store)?;
        let levels = group_levels(store, &depths);

        let positions = match options.policy {
            LayoutPolicy::Layered => layered_positions(&levels, options),
            LayoutPolicy::Radial => radial_positions(store, options.radius),
        };

        trace!(
            runnables = store.len(),
            levels = levels.len(),
            policy = ?options.policy,
            "layout computed"
        );

        Ok(Self {
            depths,
            levels,
            positions,
        })
    }

    /// Depth of `id`, or `None` if it is not part of this layout.
    pub fn depth(&self, id: RunnableId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// Position of `id`. Ids not in the layout sit at the origin.
    pub fn position(&self, id: RunnableId) -> Position {
        self.positions.get(&id).copied().unwrap_or(Position::ORIGIN)
    }

    /// Level `k` holds every runnable of depth `k`, in store enumeration order.
    pub fn levels(&self) -> &[Vec<RunnableId>] {
        &self.levels
    }

    /// Deepest level index, or `None` for an empty layout.
    pub fn max_depth(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

/// Longest-path depth per runnable, memoized over a topological order so
/// every dependency is resolved before its dependents.
fn compute_depths(store: &RunnableStore) -> Result<HashMap<RunnableId, usize>> {
    let order = guard::store_topological_order(store)?;
    let mut depths: HashMap<RunnableId, usize> = HashMap::with_capacity(order.len());

    for id in order {
        let Some(runnable) = store.get(id) else {
            continue;
        };
        let depth = runnable
            .deps
            .iter()
            .filter_map(|dep| depths.get(dep))
            .max()
            .map_or(0, |deepest| deepest + 1);
        depths.insert(id, depth);
    }

    Ok(depths)
}

fn group_levels(store: &RunnableStore, depths: &HashMap<RunnableId, usize>) -> Vec<Vec<RunnableId>> {
    let mut levels: Vec<Vec<RunnableId>> = Vec::new();
    for id in store.ids() {
        let Some(&depth) = depths.get(&id) else {
            continue;
        };
        if levels.len() <= depth {
            levels.resize_with(depth + 1, Vec::new);
        }
        levels[depth].push(id);
    }
    levels
}

fn layered_positions(levels: &[Vec<RunnableId>], options: &LayoutOptions) -> HashMap<RunnableId, Position> {
    let mut positions = HashMap::new();
    for (depth, level) in levels.iter().enumerate() {
        let y = depth as f64 * options.vertical_spacing;
        let span = (level.len().saturating_sub(1)) as f64 * options.horizontal_spacing;
        for (i, id) in level.iter().enumerate() {
            let x = i as f64 * options.horizontal_spacing - span / 2.0;
            positions.insert(*id, Position::new(x, y));
        }
    }
    positions
}

fn radial_positions(store: &RunnableStore, radius: f64) -> HashMap<RunnableId, Position> {
    let n = store.len().max(1) as f64;
    store
        .ids()
        .enumerate()
        .map(|(i, id)| {
            let angle = TAU * i as f64 / n;
            (id, Position::new(radius * angle.cos(), radius * angle.sin()))
        })
        .collect()
}
