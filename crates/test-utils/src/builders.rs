#![allow(dead_code)]

use rungraph::config::{
    ConfigFile, ConfigSection, LayoutSection, RawConfigFile, RunnableConfig, RunnableTable,
};
use rungraph::dag::{RunnableAttrs, RunnableId, RunnableStore};
use rungraph::types::ScheduleKind;

/// Builder for `RunnableStore` that wires dependencies by name.
///
/// Runnables are inserted in the order they are declared, which is also the
/// store's enumeration order.
pub struct StoreBuilder {
    entries: Vec<(String, RunnableAttrs, Vec<String>)>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a runnable with default attributes.
    pub fn runnable(self, name: &str, deps: &[&str]) -> Self {
        self.runnable_with(name, RunnableAttrs::default(), deps)
    }

    pub fn runnable_with(mut self, name: &str, attrs: RunnableAttrs, deps: &[&str]) -> Self {
        self.entries.push((
            name.to_string(),
            attrs,
            deps.iter().map(|d| d.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> RunnableStore {
        let mut store = RunnableStore::new();
        for (name, attrs, _) in &self.entries {
            store
                .insert(name, *attrs)
                .expect("Failed to insert runnable from builder");
        }
        for (name, _, deps) in &self.entries {
            let id = store.id_of(name).expect("runnable just inserted");
            let dep_ids = ids(&store, &deps.iter().map(String::as_str).collect::<Vec<_>>());
            store
                .set_dependencies(id, &dep_ids)
                .expect("Failed to wire dependencies from builder");
        }
        store
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve names to ids, panicking on unknown names.
pub fn ids(store: &RunnableStore, names: &[&str]) -> Vec<RunnableId> {
    names
        .iter()
        .map(|n| {
            store
                .id_of(n)
                .unwrap_or_else(|| panic!("unknown runnable '{n}' in test setup"))
        })
        .collect()
}

/// Shorthand for a single id lookup.
pub fn id(store: &RunnableStore, name: &str) -> RunnableId {
    ids(store, &[name])[0]
}

pub fn periodic(execution_time: u32, period: u32) -> RunnableAttrs {
    RunnableAttrs {
        execution_time,
        period,
        kind: ScheduleKind::Periodic,
        ..RunnableAttrs::default()
    }
}

pub fn event(execution_time: u32) -> RunnableAttrs {
    RunnableAttrs {
        execution_time,
        kind: ScheduleKind::Event,
        ..RunnableAttrs::default()
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                layout: LayoutSection::default(),
                runnable: RunnableTable::new(),
            },
        }
    }

    pub fn with_runnable(mut self, name: &str, runnable: RunnableConfig) -> Self {
        self.config.runnable.insert(name, runnable);
        self
    }

    pub fn with_num_cores(mut self, cores: u32) -> Self {
        self.config.config.num_cores = cores;
        self
    }

    pub fn with_simulation_time(mut self, time: u32) -> Self {
        self.config.config.simulation_time = time;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RunnableConfig`.
pub struct RunnableConfigBuilder {
    runnable: RunnableConfig,
}

impl RunnableConfigBuilder {
    /// Periodic runnable with the given execution time and period.
    pub fn periodic(execution_time: u32, period: u32) -> Self {
        Self {
            runnable: RunnableConfig {
                criticality: 0,
                affinity: 0,
                execution_time,
                kind: ScheduleKind::Periodic,
                period: Some(period),
                after: vec![],
            },
        }
    }

    /// Event runnable with the given execution time.
    pub fn event(execution_time: u32) -> Self {
        Self {
            runnable: RunnableConfig {
                criticality: 0,
                affinity: 0,
                execution_time,
                kind: ScheduleKind::Event,
                period: None,
                after: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.runnable.after.push(dep.to_string());
        self
    }

    pub fn criticality(mut self, level: u8) -> Self {
        self.runnable.criticality = level;
        self
    }

    pub fn affinity(mut self, core: u32) -> Self {
        self.runnable.affinity = core;
        self
    }

    pub fn build(self) -> RunnableConfig {
        self.runnable
    }
}
