use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and pre-register the engine's counters.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload for the embedding application.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("ratings_recomputed_total").absolute(0);
    counter!("subscriptions_recorded_total").absolute(0);
    counter!("withdrawal_requests_total").absolute(0);
    counter!("withdrawal_requests_denied").absolute(0);
    counter!("withdrawals_resolved_total").absolute(0);

    handle
}
