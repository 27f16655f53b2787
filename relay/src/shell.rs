//! Static browser shell with single-page fallback.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Path as UrlPath;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::state::AppState;

/// Served when the public directory has no `index.html` of its own.
pub const EMBEDDED_INDEX: &str = include_str!("../public/index.html");

const INDEX_FILE: &str = "index.html";

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    serve_index(&state.config.public_dir).await
}

/// `GET /{*path}`: files by extension, everything else gets the shell.
pub async fn asset_or_index(
    State(state): State<Arc<AppState>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    if Path::new(&path).extension().is_none() {
        return serve_index(&state.config.public_dir).await;
    }

    let Some(file) = resolve(&state.config.public_dir, &path) else {
        return not_found();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            ([(CONTENT_TYPE, mime.as_ref().to_string())], bytes).into_response()
        }
        Err(err) => {
            tracing::debug!("Static file {} unavailable: {err}", file.display());
            not_found()
        }
    }
}

async fn serve_index(public_dir: &Path) -> Response {
    match tokio::fs::read_to_string(public_dir.join(INDEX_FILE)).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Html(EMBEDDED_INDEX).into_response(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Joins a request path onto the public directory, refusing anything that
/// could climb out of it.
fn resolve(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut resolved = public_dir.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}
