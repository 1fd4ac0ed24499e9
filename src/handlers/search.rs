use super::admit_or_reject;
use crate::error::ProxyError;
use crate::forward::{ProxyRequest, forward, parse_target};
use crate::metrics::REQUEST_TOTAL;
use crate::rewrite::encode_target;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

// GET /search?q= - runs the query against the configured search engine
// and proxies the result page back, rewritten.
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    REQUEST_TOTAL.inc();
    admit_or_reject(&state, &headers, addr)?;

    let q = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ProxyError::MissingParam("q"))?;
    let target = parse_target(&format!("{}{}", state.search_url, encode_target(&q)))?;

    forward(
        &state,
        ProxyRequest {
            target,
            method: Method::GET,
            headers,
            body: None,
        },
    )
    .await
}
