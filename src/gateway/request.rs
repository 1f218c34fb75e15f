// src/gateway/request.rs

//! Request payload for the scheduling service.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dag::RunnableStore;
use crate::errors::{Result, RungraphError};
use crate::types::{DEFAULT_SIMULATION_TIME, ScheduleKind};

/// Per-request knobs that are not part of the runnable set itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub num_cores: u32,
    pub simulation_time: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            num_cores: 1,
            simulation_time: DEFAULT_SIMULATION_TIME,
        }
    }
}

/// One runnable as the service expects it. Dependencies are sent by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnablePayload {
    pub criticality: u8,
    pub affinity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    pub execution_time: u32,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub deps: Vec<String>,
}

/// Body of `POST /api/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRequest {
    /// Keyed by display name.
    pub runnables: BTreeMap<String, RunnablePayload>,
    #[serde(rename = "numCores")]
    pub num_cores: u32,
    #[serde(rename = "simulationTime")]
    pub simulation_time: u32,
}

impl ScheduleRequest {
    /// Snapshot `store` into a request.
    ///
    /// Fails when the set is empty, when no cores are requested, or when a
    /// runnable is pinned to a core outside `0..num_cores`.
    pub fn from_store(store: &RunnableStore, options: RequestOptions) -> Result<Self> {
        if store.is_empty() {
            return Err(RungraphError::ConfigError(
                "cannot submit an empty runnable set".to_string(),
            ));
        }
        if options.num_cores == 0 {
            return Err(RungraphError::ConfigError(
                "number of cores must be >= 1 (got 0)".to_string(),
            ));
        }

        let mut runnables = BTreeMap::new();
        for runnable in store.iter() {
            let attrs = runnable.attrs;
            if attrs.affinity >= options.num_cores {
                return Err(RungraphError::ConfigError(format!(
                    "runnable '{}' has affinity {} but only {} core(s) are available",
                    runnable.name, attrs.affinity, options.num_cores
                )));
            }

            runnables.insert(
                runnable.name.clone(),
                RunnablePayload {
                    criticality: attrs.criticality,
                    affinity: attrs.affinity,
                    period: match attrs.kind {
                        ScheduleKind::Periodic => Some(attrs.period),
                        ScheduleKind::Event => None,
                    },
                    execution_time: attrs.execution_time,
                    kind: attrs.kind,
                    deps: store.dependency_names(runnable.id),
                },
            );
        }

        Ok(Self {
            runnables,
            num_cores: options.num_cores,
            simulation_time: options.simulation_time,
        })
    }
}
