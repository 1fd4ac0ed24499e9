use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("webgate_requests_total", "Total proxied requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "webgate_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_ERRORS: Counter = register_counter!(
        "webgate_upstream_errors_total",
        "Upstream transport failures"
    )
    .unwrap();
    pub static ref HTML_REWRITES: Counter = register_counter!(
        "webgate_html_rewrites_total",
        "Responses passed through the HTML rewriter"
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "webgate_upstream_latency_seconds",
        "Upstream request latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "webgate_tracked_clients",
        "Identifiers currently tracked by the rate limiter"
    )
    .unwrap();
}
