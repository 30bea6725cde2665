//! HTTP server rendering pages on request

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{ContentError, PostIndex};
use crate::templates::TemplateRenderer;
use crate::Blog;

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html><body><h1>404</h1><p>Post not found.</p></body></html>";

/// Shared server state. Everything here is immutable, so concurrent
/// requests only ever read.
struct ServerState {
    blog: Blog,
    index: PostIndex,
    templates: TemplateRenderer,
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        index: PostIndex::new(blog),
        templates: TemplateRenderer::new()?,
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/posts.json", get(posts_json_handler))
        .route("/:year/:month/:slug", get(post_handler))
        .fallback_service(ServeDir::new(&blog.assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// List route: render the sorted post index
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = match state.index.build_index() {
        Ok(posts) => posts,
        Err(e) => return content_error(e),
    };

    match state.templates.render_index(&state.blog.config, &posts) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(&e),
    }
}

/// Machine-readable list route: the ordered PostSummary sequence
async fn posts_json_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.index.build_index() {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => content_error(e),
    }
}

/// Detail route. Lookup is by slug alone; the year/month segments are
/// presentational and the canonical URL is re-derived from the post date.
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path((_year, _month, slug)): Path<(String, String, String)>,
) -> Response {
    let post = match state.index.load_post(&slug) {
        Ok(post) => post,
        Err(e) => return content_error(e),
    };

    match state.templates.render_post(&state.blog.config, &post) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(&e),
    }
}

/// Map a content error to an HTTP response
fn content_error(err: ContentError) -> Response {
    if err.is_not_found() {
        tracing::debug!("Not found: {}", err);
        (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
    } else {
        internal_error(&err.into())
    }
}

fn internal_error(err: &anyhow::Error) -> Response {
    tracing::error!("Request failed: {:#}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
