//! Prometheus metrics for the API.
//!
//! Installs a process-global recorder and exposes counters for the people
//! resource. Rendered text is served by the `/metrics` endpoint.

use std::sync::{Mutex, OnceLock};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Global metrics handle for rendering.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Serializes recorder installation across threads.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Application info gauge metric name.
pub const METRIC_APP_INFO: &str = "app_info";
/// People created counter metric name.
pub const METRIC_PEOPLE_CREATED: &str = "people_created_total";
/// People list requests counter metric name.
pub const METRIC_PEOPLE_LISTED: &str = "people_listed_total";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_metrics() -> Result<(), BuildError> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = METRICS_HANDLE.set(handle);

    register_metric_descriptions();

    gauge!(METRIC_APP_INFO, "version" => env!("CARGO_PKG_VERSION")).set(1.0);

    tracing::debug!("Metrics initialized");
    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if the recorder was never installed.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

/// Increment the people-created counter.
pub fn inc_people_created() {
    counter!(METRIC_PEOPLE_CREATED).increment(1);
}

/// Increment the people-listed counter.
pub fn inc_people_listed() {
    counter!(METRIC_PEOPLE_LISTED).increment(1);
}

/// Registers descriptions for all standard metrics.
fn register_metric_descriptions() {
    describe_gauge!(METRIC_APP_INFO, "Application info");
    describe_counter!(
        METRIC_PEOPLE_CREATED,
        "Total number of person records created"
    );
    describe_counter!(
        METRIC_PEOPLE_LISTED,
        "Total number of person list requests served"
    );
}
