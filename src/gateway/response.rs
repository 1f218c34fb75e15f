// src/gateway/response.rs

//! Response shapes returned by the scheduling service.
//!
//! The service answers with either a single result
//!
//! ```json
//! { "totalExecutionTime": 42, "executionLog": [...], "ganttChart": "<base64>" }
//! ```
//!
//! or one result per algorithm
//!
//! ```json
//! { "results": { "fcfs": { ... }, "criticality": { ... } } }
//! ```
//!
//! Both are normalised into a [`ResultSet`]. Algorithm order follows the
//! response body.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, RungraphError};

/// Key under which a single-shape response is exposed.
pub const SINGLE_RESULT_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub start: f64,
    pub end: f64,
    pub task: String,
    pub instance: u64,
    pub affinity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    #[serde(rename = "totalExecutionTime")]
    pub total_execution_time: f64,
    #[serde(rename = "executionLog", default)]
    pub execution_log: Vec<ExecutionLogEntry>,
    /// Base64-encoded PNG, if the service rendered one.
    #[serde(rename = "ganttChart", default)]
    pub gantt_chart: Option<String>,
}

impl AlgorithmResult {
    /// Decode the Gantt chart into raw image bytes.
    pub fn decode_gantt_chart(&self) -> Result<Option<Vec<u8>>> {
        match &self.gantt_chart {
            None => Ok(None),
            Some(encoded) => STANDARD
                .decode(encoded.trim())
                .map(Some)
                .map_err(|e| RungraphError::Service(format!("invalid ganttChart encoding: {e}"))),
        }
    }
}

/// Per-algorithm results of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, AlgorithmResult)>,
}

impl ResultSet {
    /// Build a set from `(algorithm, result)` pairs. The first pair is the default view.
    pub fn new(entries: Vec<(String, AlgorithmResult)>) -> Self {
        Self { entries }
    }

    /// Parse a response body in either shape.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(message) = value.get("error").filter(|message| !message.is_null()) {
            let message = message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string());
            return Err(RungraphError::Service(message));
        }

        match value.get("results") {
            Some(Value::Object(results)) => {
                let entries = results
                    .iter()
                    .map(|(key, result)| -> Result<(String, AlgorithmResult)> {
                        let parsed: AlgorithmResult = serde_json::from_value(result.clone())?;
                        Ok((key.clone(), parsed))
                    })
                    .collect::<Result<Vec<_>>>()?;
                if entries.is_empty() {
                    return Err(RungraphError::Service(
                        "response contained no algorithm results".to_string(),
                    ));
                }
                Ok(Self { entries })
            }
            Some(other) => Err(RungraphError::Service(format!(
                "`results` must be an object, got {other}"
            ))),
            None => {
                let single: AlgorithmResult = serde_json::from_value(value)?;
                Ok(Self {
                    entries: vec![(SINGLE_RESULT_KEY.to_string(), single)],
                })
            }
        }
    }

    /// Algorithm keys in response order.
    pub fn algorithm_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn default_key(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&AlgorithmResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    /// Pick the view for `key`, or the default (first) one when `key` is `None`.
    pub fn select(&self, key: Option<&str>) -> Result<(&str, &AlgorithmResult)> {
        let found = match key {
            Some(key) => self.entries.iter().find(|(k, _)| k == key),
            None => self.entries.first(),
        };
        found
            .map(|(k, result)| (k.as_str(), result))
            .ok_or_else(|| {
                RungraphError::ResultNotFound(format!(
                    "algorithm '{}' not in result set",
                    key.unwrap_or("<default>")
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
