mod assets;
mod health;
mod metrics;
mod proxy;
mod search;

pub use assets::{asset_handler, index_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use proxy::{form_proxy_handler, proxy_handler};
pub use search::search_handler;

use crate::error::ProxyError;
use crate::metrics::RATE_LIMITED_TOTAL;
use crate::rate_limit::{client_id, now_ms};
use crate::state::AppState;
use axum::http::HeaderMap;
use std::net::SocketAddr;
use tracing::warn;

// Every proxied endpoint goes through here first; rejection
// short-circuits before URL validation or any upstream I/O.
fn admit_or_reject(
    state: &AppState,
    headers: &HeaderMap,
    addr: SocketAddr,
) -> Result<(), ProxyError> {
    let id = client_id(headers, addr);
    if state.rate_limiter.admit(&id, now_ms()) {
        Ok(())
    } else {
        RATE_LIMITED_TOTAL.inc();
        warn!(client = %id, "rate limit exceeded");
        Err(ProxyError::RateLimited)
    }
}
