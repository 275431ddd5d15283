//! Read-only JSON API over the site's content
//!
//! Every request builds a fresh loader, so edits to the markdown files show
//! up on the next request without a restart.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{BlogPost, Document, MarkdownRenderer, Project, WritingPost};
use crate::Portfolio;

/// Server state
struct ServerState {
    site: Portfolio,
    renderer: MarkdownRenderer,
}

/// A record with its body rendered to HTML
#[derive(Debug, Serialize)]
struct Rendered<T> {
    meta: T,
    html: String,
}

/// Build the API router for `site`
pub fn router(site: &Portfolio) -> Router {
    let state = Arc::new(ServerState {
        site: site.clone(),
        renderer: site.renderer(),
    });

    Router::new()
        .route("/api/projects", get(projects))
        .route("/api/projects/featured", get(featured_projects))
        .route("/api/projects/:slug", get(project))
        .route("/api/posts", get(posts))
        .route("/api/posts/latest", get(latest_post))
        .route("/api/posts/:slug", get(post))
        .route("/api/writing", get(writing))
        .route("/api/writing/:slug", get(writing_post))
        .fallback_service(ServeDir::new(&site.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(site: &Portfolio, ip: &str, port: u16) -> Result<()> {
    let app = router(site);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving {:?} at http://{}:{}", site.content_dir, ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a content read off the async workers
async fn blocking<T, F>(state: Arc<ServerState>, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&ServerState) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            tracing::error!("Content read task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn projects(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Project>>, StatusCode> {
    blocking(state, |s| s.site.loader().projects()).await.map(Json)
}

async fn featured_projects(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Project>>, StatusCode> {
    blocking(state, |s| s.site.loader().featured_projects())
        .await
        .map(Json)
}

async fn project(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, StatusCode> {
    blocking(state, move |s| detail(s, s.site.loader().project(&slug))).await
}

async fn posts(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<BlogPost>>, StatusCode> {
    blocking(state, |s| s.site.loader().posts()).await.map(Json)
}

/// Latest post, JSON `null` when there are none
async fn latest_post(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Option<BlogPost>>, StatusCode> {
    blocking(state, |s| s.site.loader().latest_post())
        .await
        .map(Json)
}

async fn post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, StatusCode> {
    blocking(state, move |s| detail(s, s.site.loader().post(&slug))).await
}

async fn writing(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<WritingPost>>, StatusCode> {
    blocking(state, |s| s.site.loader().writing()).await.map(Json)
}

async fn writing_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, StatusCode> {
    blocking(state, move |s| detail(s, s.site.loader().writing_post(&slug))).await
}

fn detail<T: Serialize>(state: &ServerState, doc: Option<Document<T>>) -> Response {
    match doc {
        Some(doc) => {
            let html = doc.render(&state.renderer);
            Json(Rendered {
                meta: doc.meta,
                html,
            })
            .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
