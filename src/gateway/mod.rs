// src/gateway/mod.rs

//! Bridge to the external scheduling-simulation service.
//!
//! - [`request`] snapshots a runnable store into the service's request shape.
//! - [`response`] parses single- and multi-algorithm responses.
//! - [`client`] defines the [`SchedulerService`] seam and its HTTP implementation.
//! - [`results`] files parsed results under random keys.

pub mod client;
pub mod request;
pub mod response;
pub mod results;

pub use client::{HealthStatus, HttpSchedulerService, SchedulerService};
pub use request::{RequestOptions, RunnablePayload, ScheduleRequest};
pub use response::{AlgorithmResult, ExecutionLogEntry, ResultSet};
pub use results::{ResultKey, ResultStore};

use tracing::{info, warn};

use crate::dag::RunnableStore;
use crate::errors::Result;

/// Snapshot `store`, send it to `service` and file the answer in `results`.
///
/// Each call is independent: a failure leaves `results` untouched and the
/// caller may simply submit again.
pub async fn submit_snapshot<S: SchedulerService + ?Sized>(
    service: &S,
    store: &RunnableStore,
    options: RequestOptions,
    results: &mut ResultStore,
) -> Result<ResultKey> {
    let request = ScheduleRequest::from_store(store, options)?;

    let result_set = service.submit(&request).await.inspect_err(|e| {
        warn!(error = %e, "schedule submission failed");
    })?;

    let key = results.insert(result_set);
    info!(
        key = %key,
        runnables = request.runnables.len(),
        "schedule submission stored"
    );
    Ok(key)
}
