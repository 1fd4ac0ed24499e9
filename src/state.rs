use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::rewrite::{RegexRewriter, Rewrite};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("webgate/", env!("CARGO_PKG_VERSION"));

// App's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub rate_limiter: RateLimiter,
    pub rewriter: Arc<dyn Rewrite>,
    pub search_url: String,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(args: &Args) -> Self {
        // Identifying user agent and default Accept apply to the
        // upstream leg only when the inbound request didn't carry one.
        let mut default_headers = reqwest::header::HeaderMap::new();
        default_headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("*/*"),
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(Duration::from_secs(args.upstream_timeout))
            .build()
            .expect("failed to build http client");

        Self {
            client,
            rate_limiter: RateLimiter::new(args.rate_limit, args.rate_window * 1_000),
            rewriter: Arc::new(RegexRewriter),
            search_url: args.search_url.clone(),
            static_dir: args.static_dir.clone(),
        }
    }
}
