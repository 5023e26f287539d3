use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Instant;

/// Global metrics instance.
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Metrics collector for the read API.
///
/// Recording is a no-op until a recorder is installed with [`init_metrics`].
#[derive(Debug, Clone, Default)]
pub struct Metrics;

impl Metrics {
    pub fn new() -> Self {
        Self
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_ms: f64) {
        counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string()).increment(1);
        histogram!("http_request_duration_ms", "method" => method.to_string(), "path" => path.to_string()).record(duration_ms);
    }

    pub fn record_document_load(&self, duration_ms: f64, success: bool) {
        counter!("document_loads_total", "success" => success.to_string()).increment(1);
        histogram!("document_load_duration_ms").record(duration_ms);
    }

    pub fn record_auth_rejection(&self, reason: &'static str) {
        counter!("auth_rejections_total", "reason" => reason).increment(1);
    }

    pub fn record_not_found(&self, resource: &'static str) {
        counter!("lookups_not_found_total", "resource" => resource).increment(1);
    }
}

/// Timer for measuring operation latency.
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the Prometheus recorder and serves `/metrics` on `listen_addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(listen_addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .install()?;

    describe_metrics();
    METRICS.get_or_init(Metrics::new);
    Ok(())
}

fn describe_metrics() {
    describe_counter!("http_requests_total", Unit::Count, "Total HTTP requests");
    describe_histogram!("http_request_duration_ms", Unit::Milliseconds, "HTTP request latency in milliseconds");

    describe_counter!("document_loads_total", Unit::Count, "Total dataset document loads");
    describe_histogram!("document_load_duration_ms", Unit::Milliseconds, "Dataset document load latency in milliseconds");

    describe_counter!("auth_rejections_total", Unit::Count, "Requests rejected by the bearer-token gate");
    describe_counter!("lookups_not_found_total", Unit::Count, "Account lookups that found no record");
}

/// Returns the global metrics instance.
pub fn get_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}
