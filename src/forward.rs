use crate::error::ProxyError;
use crate::headers::{sanitize_inbound_headers, sanitize_outbound_headers};
use crate::metrics::{HTML_REWRITES, UPSTREAM_LATENCY};
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::Response;
use std::time::Instant;
use tracing::debug;
use url::Url;

// Validated outbound request: target plus the client's method, headers
// and body, before denylist sanitization.
pub struct ProxyRequest {
    pub target: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

// Decided once per response: HTML is buffered for rewriting, anything
// else streams through byte-for-byte.
enum UpstreamBody {
    Html(Bytes),
    Opaque(reqwest::Response),
}

pub fn parse_target(raw: &str) -> Result<Url, ProxyError> {
    let url = Url::parse(raw).map_err(|_| ProxyError::InvalidTarget(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ProxyError::InvalidTarget(raw.to_string())),
    }
}

pub async fn forward(state: &AppState, request: ProxyRequest) -> Result<Response, ProxyError> {
    let headers = sanitize_outbound_headers(&request.headers);
    debug!(method = %request.method, target = %request.target, "forwarding upstream");

    let mut outbound = state
        .client
        .request(request.method, request.target.as_str())
        .headers(headers);
    if let Some(body) = request.body {
        outbound = outbound.body(body);
    }

    let started = Instant::now();
    let upstream = outbound.send().await?;
    UPSTREAM_LATENCY.observe(started.elapsed().as_secs_f64());

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| ProxyError::Internal(e.to_string()))?;
    let is_html = upstream
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));

    let body = if is_html {
        UpstreamBody::Html(upstream.bytes().await?)
    } else {
        UpstreamBody::Opaque(upstream)
    };

    match body {
        UpstreamBody::Html(bytes) => {
            HTML_REWRITES.inc();
            // UTF-8-only: legacy-charset pages decode lossily and are
            // re-served as UTF-8, which is why the content type below
            // is forced rather than copied from upstream.
            let document = String::from_utf8_lossy(&bytes);
            let rewritten = state.rewriter.rewrite(&document);
            Response::builder()
                .status(status)
                .header(CONTENT_TYPE, "text/html; charset=utf-8")
                .header(CACHE_CONTROL, "no-store")
                .body(Body::from(rewritten))
                .map_err(|e| ProxyError::Internal(e.to_string()))
        }
        UpstreamBody::Opaque(upstream) => {
            let mut headers = sanitize_inbound_headers(upstream.headers());
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

            // Hand the open upstream body to hyper; a downstream
            // disconnect drops the stream and aborts the upstream
            // connection with it.
            let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_targets() {
        assert!(parse_target("http://example.com/a?b=c").is_ok());
        assert!(parse_target("https://example.com/").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(matches!(
            parse_target("ftp://example.com/"),
            Err(ProxyError::InvalidTarget(_))
        ));
        assert!(matches!(
            parse_target("javascript:alert(1)"),
            Err(ProxyError::InvalidTarget(_))
        ));
        assert!(matches!(
            parse_target("not a url"),
            Err(ProxyError::InvalidTarget(_))
        ));
        assert!(matches!(
            parse_target("//example.com/relative"),
            Err(ProxyError::InvalidTarget(_))
        ));
    }
}
