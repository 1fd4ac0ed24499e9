use super::admit_or_reject;
use crate::error::ProxyError;
use crate::forward::{ProxyRequest, forward, parse_target};
use crate::metrics::REQUEST_TOTAL;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Query, RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::response::Response;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use url::form_urlencoded;

#[derive(Deserialize)]
pub struct ProxyParams {
    url: Option<String>,
}

// GET /proxy?url= - fetches the target and returns it, rewritten when
// it's HTML, streamed through otherwise.
pub async fn proxy_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<ProxyParams>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    REQUEST_TOTAL.inc();
    admit_or_reject(&state, &headers, addr)?;

    let raw = params.url.ok_or(ProxyError::MissingParam("url"))?;
    let target = parse_target(&raw)?;

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

// /form-proxy?url= - replays rewritten form submissions against their
// original target. GET re-serializes the remaining query params onto
// the target; POST forwards the body verbatim.
pub async fn form_proxy_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    REQUEST_TOTAL.inc();
    admit_or_reject(&state, &headers, addr)?;

    let pairs: Vec<(String, String)> = raw_query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let raw_target = pairs
        .iter()
        .find(|(name, _)| name == "url")
        .map(|(_, value)| value.clone())
        .ok_or(ProxyError::MissingParam("url"))?;
    let mut target = parse_target(&raw_target)?;

    match method {
        Method::GET => {
            {
                let mut query = target.query_pairs_mut();
                for (name, value) in pairs.iter().filter(|(name, _)| name != "url") {
                    query.append_pair(name, value);
                }
            }
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
        Method::POST => {
            let mut headers = headers;
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
            }
            forward(
                &state,
                ProxyRequest {
                    target,
                    method: Method::POST,
                    headers,
                    body: Some(body),
                },
            )
            .await
        }
        _ => Err(ProxyError::MethodNotAllowed),
    }
}
