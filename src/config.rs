use clap::Parser;
use std::path::PathBuf;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "webgate")]
#[command(about = "Rewriting web proxy with per-client rate limiting")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Search engine endpoint; the query string is appended percent-encoded
    #[arg(long, default_value = "https://html.duckduckgo.com/html/?q=")]
    pub search_url: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 60)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,

    // Directory served for static assets
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,
}
