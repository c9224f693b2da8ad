//! HTTP server for the site
//!
//! Serves the page templates, static assets and the wasm bundle from a site
//! root on disk, plus the `/dropdown` form endpoint.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Form, Path as UrlPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Page routes and the template each one serves
pub const PAGES: [(&str, &str); 5] = [
    ("/", "index.html"),
    ("/pacman", "pacman.html"),
    ("/super-mario", "super-mario.html"),
    ("/space-invaders", "space-invaders.html"),
    ("/artists-statement", "artists-statement.html"),
];

#[derive(Clone)]
struct SiteState {
    root: Arc<PathBuf>,
}

impl SiteState {
    async fn page(&self, template: &str) -> Response {
        send_file(&self.root.join("templates").join(template)).await
    }

    async fn asset(&self, mount: &str, requested: &str) -> Response {
        match safe_relative(requested) {
            Some(rel) => send_file(&self.root.join(mount).join(rel)).await,
            None => {
                log::warn!("Rejected asset path {:?} under /{}", requested, mount);
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

/// Build the site router over `site_root`
pub fn build_router(site_root: impl Into<PathBuf>) -> Router {
    let state = SiteState {
        root: Arc::new(site_root.into()),
    };

    let mut router = Router::new();
    for (route, template) in PAGES {
        router = router.route(
            route,
            get(move |State(site): State<SiteState>| async move { site.page(template).await }),
        );
    }

    router
        .route("/static/{*path}", get(static_asset))
        .route("/pixel_pioneers/{*path}", get(bundle_asset))
        .route("/dropdown", post(dropdown))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!(
        "Serving {} on http://{}",
        settings.site_root.display(),
        listener.local_addr()?
    );

    axum::serve(listener, build_router(settings.site_root.clone()))
        .await
        .context("server stopped with an error")
}

async fn static_asset(State(site): State<SiteState>, UrlPath(path): UrlPath<String>) -> Response {
    site.asset("static", &path).await
}

async fn bundle_asset(State(site): State<SiteState>, UrlPath(path): UrlPath<String>) -> Response {
    site.asset("pixel_pioneers", &path).await
}

#[derive(Debug, Deserialize)]
struct DropdownForm {
    option: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct DropdownReply {
    message: String,
}

async fn dropdown(Form(form): Form<DropdownForm>) -> Json<DropdownReply> {
    log::debug!("Dropdown selection {:?}", form.option);
    Json(DropdownReply {
        message: format!("You selected: {}", form.option),
    })
}

/// `requested` as a path that cannot leave its mount directory
fn safe_relative(requested: &str) -> Option<PathBuf> {
    let path = Path::new(requested);
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if out.as_os_str().is_empty() { None } else { Some(out) }
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

async fn send_file(path: &Path) -> Response {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Not found: {}", path.display());
            return StatusCode::NOT_FOUND.into_response();
        }
        Err(e) => {
            log::warn!("Cannot stat {}: {}", path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(path))], bytes).into_response(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
