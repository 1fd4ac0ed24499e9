use crate::state::AppState;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use std::sync::Arc;

// GET / - the landing page with the search form
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    serve_file(&state, "index.html").await
}

// Fallback - plain file-existence check against the asset directory
pub async fn asset_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() || path.split('/').any(|part| part == "..") {
        return not_found();
    }
    serve_file(&state, path).await
}

async fn serve_file(state: &AppState, path: &str) -> Response {
    let full = state.static_dir.join(path);
    match tokio::fs::read(&full).await {
        Ok(bytes) => {
            ([(header::CONTENT_TYPE, content_type_for(&full))], bytes).into_response()
        }
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found.").into_response()
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
