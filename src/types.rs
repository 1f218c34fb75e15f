use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Highest criticality level a runnable may carry (levels are `0..=4`).
pub const MAX_CRITICALITY: u8 = 4;

/// Simulation horizon sent to the scheduling service when none is configured.
pub const DEFAULT_SIMULATION_TIME: u32 = 400;

/// How a runnable is released.
///
/// - `Periodic`: released every `period` time units.
/// - `Event`: released when its dependencies produce output. Any `period`
///   stored on an event runnable is simply unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    Periodic,
    Event,
}

impl Default for ScheduleKind {
    fn default() -> Self {
        ScheduleKind::Periodic
    }
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::Periodic => "periodic",
            ScheduleKind::Event => "event",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "periodic" => Ok(ScheduleKind::Periodic),
            "event" => Ok(ScheduleKind::Event),
            other => Err(format!(
                "invalid runnable type: {other} (expected \"periodic\" or \"event\")"
            )),
        }
    }
}

/// Placement policy used by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Rank by longest dependency path, centre each rank horizontally.
    Layered,
    /// Spread nodes evenly on a circle, ignoring dependencies.
    Radial,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy::Layered
    }
}
