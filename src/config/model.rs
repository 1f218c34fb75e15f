// src/config/model.rs

use std::fmt;
use std::ops::Index;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::types::{DEFAULT_SIMULATION_TIME, LayoutPolicy, ScheduleKind};

/// Top-level runnable set as read from a TOML file.
///
/// ```toml
/// [config]
/// num_cores = 2
/// simulation_time = 400
///
/// [layout]
/// vertical_spacing = 120
/// horizontal_spacing = 120
///
/// [runnable.CameraCapture]
/// execution_time = 7
/// type = "periodic"
/// period = 50
///
/// [runnable.SensorFusion]
/// execution_time = 6
/// type = "event"
/// after = ["CameraCapture"]
/// ```
///
/// This is the unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub layout: LayoutSection,

    /// All runnables from `[runnable.<name>]`, in file order.
    #[serde(default)]
    pub runnable: RunnableTable,
}

/// A runnable set that passed validation.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`), so
/// holders may assume dependencies resolve and the graph is acyclic.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub layout: LayoutSection,
    pub runnable: RunnableTable,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        layout: LayoutSection,
        runnable: RunnableTable,
    ) -> Self {
        Self {
            config,
            layout,
            runnable,
        }
    }
}

/// `[config]` section: simulation parameters and the service endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Number of cores available to the scheduler. Affinities index into
    /// `0..num_cores`.
    #[serde(default = "default_num_cores")]
    pub num_cores: u32,

    /// Simulation horizon sent with every request.
    #[serde(default = "default_simulation_time")]
    pub simulation_time: u32,

    /// Base URL of the scheduling service.
    #[serde(default = "default_service_url")]
    pub service_url: String,
}

fn default_num_cores() -> u32 {
    1
}

fn default_simulation_time() -> u32 {
    DEFAULT_SIMULATION_TIME
}

fn default_service_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            num_cores: default_num_cores(),
            simulation_time: default_simulation_time(),
            service_url: default_service_url(),
        }
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    #[serde(default = "default_spacing")]
    pub vertical_spacing: f64,

    #[serde(default = "default_spacing")]
    pub horizontal_spacing: f64,

    #[serde(default)]
    pub policy: LayoutPolicy,

    /// Circle radius for the radial policy.
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_spacing() -> f64 {
    120.0
}

fn default_radius() -> f64 {
    200.0
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            vertical_spacing: default_spacing(),
            horizontal_spacing: default_spacing(),
            policy: LayoutPolicy::default(),
            radius: default_radius(),
        }
    }
}

/// `[runnable.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnableConfig {
    /// Ordinal criticality, `0..=4`.
    #[serde(default)]
    pub criticality: u8,

    /// Core index this runnable is pinned to.
    #[serde(default)]
    pub affinity: u32,

    pub execution_time: u32,

    #[serde(rename = "type", default)]
    pub kind: ScheduleKind,

    /// Required for periodic runnables, ignored for event runnables.
    #[serde(default)]
    pub period: Option<u32>,

    /// Dependency list: this runnable executes after everything listed here.
    #[serde(default)]
    pub after: Vec<String>,
}

/// Named `[runnable.<name>]` tables kept in the order they were declared.
///
/// Store enumeration order, and with it the horizontal slot of every runnable
/// in a level, follows this order.
#[derive(Debug, Clone, Default)]
pub struct RunnableTable {
    entries: Vec<(String, RunnableConfig)>,
}

impl RunnableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name`, or replace its config in place if already present.
    pub fn insert(&mut self, name: impl Into<String>, runnable: RunnableConfig) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = runnable,
            None => self.entries.push((name, runnable)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RunnableConfig> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, runnable)| runnable)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RunnableConfig)> {
        self.entries.iter().map(|(name, runnable)| (name, runnable))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for RunnableTable {
    type Output = RunnableConfig;

    fn index(&self, name: &str) -> &RunnableConfig {
        match self.get(name) {
            Some(runnable) => runnable,
            None => panic!("no runnable named '{name}'"),
        }
    }
}

impl<'de> Deserialize<'de> for RunnableTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RunnableTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of [runnable.<name>] sections")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = RunnableTable::new();
                while let Some((name, runnable)) = map.next_entry::<String, RunnableConfig>()? {
                    table.insert(name, runnable);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
