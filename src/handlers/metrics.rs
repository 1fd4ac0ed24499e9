use axum::response::IntoResponse;
use prometheus::{Encoder, TextEncoder};

// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        buffer.clear();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
