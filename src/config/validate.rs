// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::dag::guard;
use crate::errors::{Result, RungraphError};
use crate::types::{MAX_CRITICALITY, ScheduleKind};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RungraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.layout, raw.runnable))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_runnables(cfg)?;
    validate_global_config(cfg)?;
    validate_layout(cfg)?;
    validate_runnable_attributes(cfg)?;
    validate_runnable_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_runnables(cfg: &RawConfigFile) -> Result<()> {
    if cfg.runnable.is_empty() {
        return Err(RungraphError::ConfigError(
            "config must contain at least one [runnable.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.num_cores == 0 {
        return Err(RungraphError::ConfigError(
            "[config].num_cores must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.config.simulation_time == 0 {
        return Err(RungraphError::ConfigError(
            "[config].simulation_time must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_layout(cfg: &RawConfigFile) -> Result<()> {
    let layout = &cfg.layout;
    for (key, value) in [
        ("vertical_spacing", layout.vertical_spacing),
        ("horizontal_spacing", layout.horizontal_spacing),
        ("radius", layout.radius),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(RungraphError::ConfigError(format!(
                "[layout].{key} must be a positive number (got {value})"
            )));
        }
    }
    Ok(())
}

fn validate_runnable_attributes(cfg: &RawConfigFile) -> Result<()> {
    let num_cores = cfg.config.num_cores;

    for (name, runnable) in cfg.runnable.iter() {
        if name.trim().is_empty() {
            return Err(RungraphError::ConfigError(
                "runnable names must not be empty".to_string(),
            ));
        }
        if name.trim() != name {
            return Err(RungraphError::ConfigError(format!(
                "runnable name '{}' must not have leading or trailing whitespace",
                name
            )));
        }
        if runnable.criticality > MAX_CRITICALITY {
            return Err(RungraphError::ConfigError(format!(
                "runnable '{}' has criticality {} (max {})",
                name, runnable.criticality, MAX_CRITICALITY
            )));
        }
        if runnable.affinity >= num_cores {
            return Err(RungraphError::ConfigError(format!(
                "runnable '{}' has affinity {} but only {} core(s) are configured",
                name, runnable.affinity, num_cores
            )));
        }
        if runnable.execution_time == 0 {
            return Err(RungraphError::ConfigError(format!(
                "runnable '{}' must have a positive execution_time",
                name
            )));
        }
        match (runnable.kind, runnable.period) {
            (ScheduleKind::Periodic, None) => {
                return Err(RungraphError::ConfigError(format!(
                    "periodic runnable '{}' is missing `period`",
                    name
                )));
            }
            (_, Some(0)) => {
                return Err(RungraphError::ConfigError(format!(
                    "runnable '{}' must have a positive period",
                    name
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_runnable_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, runnable) in cfg.runnable.iter() {
        for dep in runnable.after.iter() {
            if !cfg.runnable.contains_key(dep) {
                return Err(RungraphError::ConfigError(format!(
                    "runnable '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(RungraphError::ConfigError(format!(
                    "runnable '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> runnable, so `after = ["A"]` on B adds A -> B.
    let nodes = cfg.runnable.keys().map(|name| name.as_str());
    let edges = cfg.runnable.iter().flat_map(|(name, runnable)| {
        runnable
            .after
            .iter()
            .map(move |dep| (dep.as_str(), name.as_str()))
    });

    guard::topological_order(nodes, edges).map(|_order| ())
}
