use anyhow::{Context, Result};
use std::{net::SocketAddr, time::Duration};

use tracing::info;

use axum::{
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;

use super::catalog_routes::make_catalog_routes;
use super::page_routes::{home, track_page};
use super::upload_routes::{upload_track, upload_track_form};
use super::{http_cache, log_requests, state::*, ServerConfig};
use crate::catalog::CatalogService;
use crate::media::{MediaStore, PUBLIC_PREFIX};
use crate::render::PageRenderer;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn server_stats(State(state): State<ServerState>) -> Json<ServerStats> {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    })
}

pub fn make_app(state: ServerState) -> Router {
    let config = state.config.clone();
    let upload_limit = DefaultBodyLimit::max(config.max_upload_size_bytes);

    let catalog_routes = make_catalog_routes(state.clone()).merge(
        Router::new()
            .route(
                "/tracks/upload",
                post(upload_track).layer(upload_limit.clone()),
            )
            .with_state(state.clone()),
    );

    let page_routes: Router = Router::new()
        .route("/", get(home))
        .route("/v1", get(server_stats))
        .route("/v1/", get(server_stats))
        .route("/tracks/{id}", get(track_page))
        .route("/tracks/upload", post(upload_track_form).layer(upload_limit))
        .with_state(state.clone());

    let static_routes: Router = Router::new()
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.media.root()))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ));

    page_routes
        .merge(static_routes)
        .nest("/v1/catalog", catalog_routes)
        .layer(middleware::from_fn_with_state(
            config.requests_logging_level.clone(),
            log_requests,
        ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

pub async fn run_server(
    config: ServerConfig,
    catalog: CatalogService,
    media: MediaStore,
    renderer: PageRenderer,
) -> Result<()> {
    media
        .init()
        .await
        .with_context(|| format!("Failed to prepare media directory {:?}", media.root()))?;

    let addr = SocketAddr::new(config.host, config.port);
    let state = ServerState::new(config, catalog, media, renderer);
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
