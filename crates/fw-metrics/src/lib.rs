use std::env;
use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const REQUESTS_TOTAL: &str = "fw_http_requests_total";
pub const RANKED_RESULTS: &str = "fw_ranked_results";

/// Installed recorder plus the port its scrape endpoint should bind.
#[derive(Clone, Copy)]
pub struct MetricsEndpoint {
    pub handle: &'static PrometheusHandle,
    pub port: u16,
}

fn parse_port(raw: Option<&str>, default_port: u16) -> u16 {
    raw.and_then(|raw| raw.trim().parse::<u16>().ok())
        .filter(|port| *port > 0)
        .unwrap_or(default_port)
}

/// Install the Prometheus recorder once per process.
///
/// The scrape port comes from `port_env`, falling back to `default_port`.
/// Returns `None` when another recorder is already installed.
pub fn init_metrics(port_env: &str, default_port: u16) -> Option<MetricsEndpoint> {
    let port = parse_port(env::var(port_env).ok().as_deref(), default_port);

    if let Some(existing) = PROMETHEUS_HANDLE.get() {
        return Some(MetricsEndpoint {
            handle: existing,
            port,
        });
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let handle = PROMETHEUS_HANDLE.get_or_init(|| handle);
            info!(metrics_port = port, "installed prometheus recorder");
            Some(MetricsEndpoint { handle, port })
        }
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to install prometheus recorder");
            None
        }
    }
}

/// Count a served request under its matched route template.
pub fn record_request(route: &str, status: u16) {
    counter!(
        REQUESTS_TOTAL,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Size of a ranked response.
pub fn record_ranked(operation: &'static str, returned: usize) {
    histogram!(RANKED_RESULTS, "operation" => operation).record(returned as f64);
}
