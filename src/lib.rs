// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod gateway;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{Layout, LayoutOptions, RunnableStore};
use crate::engine::EditorSession;
use crate::gateway::{HttpSchedulerService, RequestOptions, ResultStore, SchedulerService};
use crate::types::LayoutPolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - the runnable store and its layout
/// - the scheduling-service client for `submit` / `health`
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);

    // `health --url` must work without a runnable set on disk.
    if let Command::Health { url: Some(url) } = &args.command {
        return check_health(&HttpSchedulerService::new(url.clone())).await;
    }

    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading runnable set from {}", config_path.display()))?;
    let store = RunnableStore::from_config(&cfg)?;
    info!(runnables = store.len(), "runnable set loaded");

    match args.command {
        Command::Validate => {
            print_summary(&cfg, &store);
            Ok(())
        }
        Command::Layout { radial } => {
            let mut options = LayoutOptions::from(&cfg.layout);
            if radial {
                options.policy = LayoutPolicy::Radial;
            }
            let layout = Layout::compute(&store, &options)?;
            print_layout(&store, &layout);
            Ok(())
        }
        Command::Diagram { pretty } => {
            let session = EditorSession::new(store, LayoutOptions::from(&cfg.layout))?;
            let diagram = session.diagram();
            let json = if pretty {
                serde_json::to_string_pretty(&diagram)?
            } else {
                serde_json::to_string(&diagram)?
            };
            println!("{json}");
            Ok(())
        }
        Command::Submit {
            url,
            num_cores,
            algorithm,
            gantt_out,
        } => {
            let service =
                HttpSchedulerService::new(url.unwrap_or_else(|| cfg.config.service_url.clone()));
            let options = RequestOptions {
                num_cores: num_cores.unwrap_or(cfg.config.num_cores),
                simulation_time: cfg.config.simulation_time,
            };
            submit_and_print(&service, &store, options, algorithm.as_deref(), gantt_out).await
        }
        Command::Health { url } => {
            let base_url = url.unwrap_or_else(|| cfg.config.service_url.clone());
            check_health(&HttpSchedulerService::new(base_url)).await
        }
    }
}

async fn check_health<S: SchedulerService + ?Sized>(service: &S) -> Result<()> {
    let status = service.health().await?;
    if status.is_healthy() {
        println!("scheduling service: {}", status.status);
        Ok(())
    } else {
        anyhow::bail!("scheduling service reported status '{}'", status.status)
    }
}

async fn submit_and_print<S: SchedulerService + ?Sized>(
    service: &S,
    store: &RunnableStore,
    options: RequestOptions,
    algorithm: Option<&str>,
    gantt_out: Option<String>,
) -> Result<()> {
    let mut results = ResultStore::new();
    let key = gateway::submit_snapshot(service, store, options, &mut results).await?;
    let result_set = results.get(&key)?;

    let keys: Vec<&str> = result_set.algorithm_keys().collect();
    println!("result {key}");
    println!("algorithms: {}", keys.join(", "));

    let (selected, result) = result_set.select(algorithm)?;
    println!();
    println!("[{selected}] total execution time: {}", result.total_execution_time);
    for entry in &result.execution_log {
        println!(
            "  {:>8} - {:<8} {} #{} (core {})",
            entry.start, entry.end, entry.task, entry.instance, entry.affinity
        );
    }

    if let Some(path) = gantt_out {
        match result.decode_gantt_chart()? {
            Some(bytes) => {
                std::fs::write(&path, bytes).with_context(|| format!("writing {path}"))?;
                info!(path = %path, "gantt chart written");
            }
            None => warn!(algorithm = %selected, "service returned no gantt chart"),
        }
    }

    Ok(())
}

/// Validate-only output: global settings, runnables and their dependencies.
fn print_summary(cfg: &ConfigFile, store: &RunnableStore) {
    println!("rungraph validate");
    println!("  config.num_cores = {}", cfg.config.num_cores);
    println!("  config.simulation_time = {}", cfg.config.simulation_time);
    println!("  config.service_url = {}", cfg.config.service_url);
    println!();

    println!("runnables ({}):", store.len());
    for runnable in store.iter() {
        let attrs = &runnable.attrs;
        println!("  - {}", runnable.name);
        println!(
            "      type: {}  criticality: {}  affinity: {}  execution_time: {}",
            attrs.kind, attrs.criticality, attrs.affinity, attrs.execution_time
        );
        if attrs.kind == types::ScheduleKind::Periodic {
            println!("      period: {}", attrs.period);
        }
        let deps = store.dependency_names(runnable.id);
        if !deps.is_empty() {
            println!("      after: {:?}", deps);
        }
    }

    debug!("validation complete (no layout or submission)");
}

fn print_layout(store: &RunnableStore, layout: &Layout) {
    for (depth, level) in layout.levels().iter().enumerate() {
        println!("level {depth}:");
        for id in level {
            let name = store.get(*id).map(|r| r.name.as_str()).unwrap_or("?");
            let pos = layout.position(*id);
            println!("  {name:<24} ({:.1}, {:.1})", pos.x, pos.y);
        }
    }
}
