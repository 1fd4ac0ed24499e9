use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use webgate::config::Args;
use webgate::metrics::TRACKED_CLIENTS;
use webgate::rate_limit::now_ms;
use webgate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();
    let state = Arc::new(AppState::new(&args));

    // background sweep keeps the limiter map bounded; admission
    // semantics don't depend on it
    let sweep_state = state.clone();
    let sweep_every = Duration::from_secs(args.rate_window.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            sweep_state.rate_limiter.sweep(now_ms());
            let tracked = sweep_state.rate_limiter.tracked_clients();
            TRACKED_CLIENTS.set(tracked as f64);
            debug!(tracked, "swept rate limiter");
        }
    });

    let app = webgate::app(state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");

    info!(
        port = args.port,
        search_url = %args.search_url,
        rate_limit = args.rate_limit,
        rate_window = args.rate_window,
        "webgate listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
