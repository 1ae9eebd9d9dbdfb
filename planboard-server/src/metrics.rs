//! Prometheus metrics collection for Planboard server

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Instant;

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!("planboard_requests_total", "Total number of handled API requests");
    describe_counter!("planboard_records_created_total", "Total number of records created");
    describe_counter!("planboard_uploads_total", "Total number of accepted file uploads");
    describe_counter!("planboard_errors_total", "Total number of error responses");

    // Histograms
    describe_histogram!("planboard_request_latency_seconds", "API request latency in seconds");
    describe_histogram!("planboard_upload_size_bytes", "Size of accepted uploads in bytes");

    // Gauges
    describe_gauge!("planboard_uptime_seconds", "Seconds since the server started");
}

/// Record a handled request
pub fn record_request(operation: &'static str, status: u16) {
    counter!(
        "planboard_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a created record
pub fn record_created(entity: &'static str) {
    counter!("planboard_records_created_total", "entity" => entity).increment(1);
}

/// Record an accepted upload
pub fn record_upload(kind: &'static str, size_bytes: usize) {
    counter!("planboard_uploads_total", "kind" => kind).increment(1);
    histogram!("planboard_upload_size_bytes", "kind" => kind).record(size_bytes as f64);
}

/// Record an error
pub fn record_error(error_type: &'static str) {
    counter!("planboard_errors_total", "type" => error_type).increment(1);
}

/// Update uptime gauge
pub fn update_uptime(seconds: u64) {
    gauge!("planboard_uptime_seconds").set(seconds as f64);
}

/// Timer for measuring request latency
///
/// The request is counted when the timer drops. A timer dropped without
/// [`LatencyTimer::record`] counts as a 422, which is what every handler
/// error answers with.
pub struct LatencyTimer {
    start: Instant,
    operation: &'static str,
    status: u16,
}

impl LatencyTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            status: 422,
        }
    }

    /// Record the latency and the request outcome
    pub fn record(mut self, status: u16) {
        self.status = status;
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        histogram!("planboard_request_latency_seconds", "operation" => self.operation)
            .record(elapsed);
        record_request(self.operation, self.status);
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Install the Prometheus recorder
///
/// Only the first call installs; later calls are no-ops.
pub fn init_prometheus() -> anyhow::Result<()> {
    static INSTALL: std::sync::Mutex<()> = std::sync::Mutex::new(());
    let _guard = INSTALL
        .lock()
        .map_err(|_| anyhow::anyhow!("Prometheus install lock poisoned"))?;

    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Get Prometheus metrics string
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("list_partners", 200);
        record_created("partner");
        record_upload("plan-data", 0);
        record_error("invalid_json");
        update_uptime(3);
        LatencyTimer::new("hello").record(200);
    }

    #[test]
    fn test_prometheus_render_after_init() {
        init_prometheus().unwrap();
        init_prometheus().unwrap();
        init_metrics();

        record_error("invalid_json");
        let rendered = get_prometheus_metrics();
        assert!(rendered.contains("planboard_errors_total"));
    }

    #[test]
    fn test_dropped_timer_counts_as_unprocessable() {
        init_prometheus().unwrap();

        {
            let _timer = LatencyTimer::new("timer_dropped_early");
        }
        LatencyTimer::new("timer_recorded").record(201);

        let rendered = get_prometheus_metrics();
        let line_for = |operation: &str| {
            rendered
                .lines()
                .find(|line| {
                    line.starts_with("planboard_requests_total")
                        && line.contains(&format!("operation=\"{}\"", operation))
                })
                .map(str::to_string)
                .unwrap_or_default()
        };
        assert!(line_for("timer_dropped_early").contains("status=\"422\""));
        assert!(line_for("timer_recorded").contains("status=\"201\""));
    }
}
