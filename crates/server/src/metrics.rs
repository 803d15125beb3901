use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static CANONICAL_REDIRECTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "sendly_portal_canonical_redirects_total",
        "Requests redirected to their canonical pagination URL",
        &["list"]
    )
    .expect("register canonical_redirects_total")
});

pub static UPSTREAM_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "sendly_portal_upstream_requests_total",
        "Requests sent to the remote API",
        &["endpoint"]
    )
    .expect("register upstream_requests_total")
});

pub static UPSTREAM_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "sendly_portal_upstream_errors_total",
        "Remote API requests that failed, by error kind",
        &["endpoint", "kind"]
    )
    .expect("register upstream_errors_total")
});

/// Touch every metric so it shows up in the exposition before first use.
pub fn init() {
    Lazy::force(&CANONICAL_REDIRECTS_TOTAL);
    Lazy::force(&UPSTREAM_REQUESTS_TOTAL);
    Lazy::force(&UPSTREAM_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
