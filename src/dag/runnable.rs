// src/dag/runnable.rs

//! Runnable attributes and the edit vocabulary for them.

use std::fmt;

use serde::Serialize;

use crate::config::model::RunnableConfig;
use crate::errors::{Result, RungraphError};
use crate::types::{MAX_CRITICALITY, ScheduleKind};

/// Period assigned to new runnables and to event runnables loaded without one.
pub const DEFAULT_PERIOD: u32 = 100;

/// Execution time assigned to new runnables.
pub const DEFAULT_EXECUTION_TIME: u32 = 1;

/// Stable identity of a runnable.
///
/// Allocated by the store, never reused and never derived from the display
/// name, so renames cannot invalidate dependency edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RunnableId(pub u32);

impl fmt::Display for RunnableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A schedulable unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Runnable {
    pub id: RunnableId,
    pub name: String,
    pub attrs: RunnableAttrs,
    /// Direct dependencies, in display order. No duplicates, never `id`.
    pub deps: Vec<RunnableId>,
}

/// Editable per-runnable attributes (everything except name and edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnableAttrs {
    pub criticality: u8,
    pub affinity: u32,
    pub execution_time: u32,
    pub kind: ScheduleKind,
    /// Only meaningful when `kind` is periodic.
    pub period: u32,
}

impl Default for RunnableAttrs {
    fn default() -> Self {
        Self {
            criticality: 0,
            affinity: 0,
            execution_time: DEFAULT_EXECUTION_TIME,
            kind: ScheduleKind::Periodic,
            period: DEFAULT_PERIOD,
        }
    }
}

impl From<&RunnableConfig> for RunnableAttrs {
    fn from(cfg: &RunnableConfig) -> Self {
        Self {
            criticality: cfg.criticality,
            affinity: cfg.affinity,
            execution_time: cfg.execution_time,
            kind: cfg.kind,
            period: cfg.period.unwrap_or(DEFAULT_PERIOD),
        }
    }
}

/// A single-attribute edit.
///
/// Each variant is checked on its own; no cross-field validation happens
/// (setting a period on an event runnable is accepted and simply unused).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnableField {
    Criticality(u8),
    Affinity(u32),
    ExecutionTime(u32),
    Kind(ScheduleKind),
    Period(u32),
}

impl RunnableField {
    pub fn name(&self) -> &'static str {
        match self {
            RunnableField::Criticality(_) => "criticality",
            RunnableField::Affinity(_) => "affinity",
            RunnableField::ExecutionTime(_) => "execution_time",
            RunnableField::Kind(_) => "type",
            RunnableField::Period(_) => "period",
        }
    }

    /// Write this field into `attrs`, rejecting out-of-range values.
    pub(crate) fn apply_to(self, attrs: &mut RunnableAttrs) -> Result<()> {
        match self {
            RunnableField::Criticality(level) => {
                if level > MAX_CRITICALITY {
                    return Err(RungraphError::InvalidField {
                        field: self.name(),
                        reason: format!("{level} exceeds maximum {MAX_CRITICALITY}"),
                    });
                }
                attrs.criticality = level;
            }
            RunnableField::Affinity(core) => attrs.affinity = core,
            RunnableField::ExecutionTime(time) => {
                if time == 0 {
                    return Err(RungraphError::InvalidField {
                        field: self.name(),
                        reason: "must be positive".to_string(),
                    });
                }
                attrs.execution_time = time;
            }
            RunnableField::Kind(kind) => attrs.kind = kind,
            RunnableField::Period(period) => {
                if period == 0 {
                    return Err(RungraphError::InvalidField {
                        field: self.name(),
                        reason: "must be positive".to_string(),
                    });
                }
                attrs.period = period;
            }
        }
        Ok(())
    }
}
