//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own database and media
//! directory, seeded with the fixtures catalog.

use super::constants::*;
use super::fixtures::seed_catalog;
use audiopage_server::media::MediaStore;
use audiopage_server::render::PageRenderer;
use audiopage_server::{
    make_app, CatalogService, RequestsLoggingLevel, ServerConfig, ServerState,
    SqliteCatalogStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated catalog and media directory
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Catalog service sharing the server's database, for direct checks
    pub catalog: CatalogService,

    temp_dir: TempDir,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new seeded test server on a random port
    pub async fn spawn() -> Self {
        Self::spawn_with_upload_limit(1024 * 1024).await
    }

    pub async fn spawn_with_upload_limit(max_upload_size_bytes: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("catalog.db");
        let media_path = temp_dir.path().join("static");

        let store =
            Arc::new(SqliteCatalogStore::new(&db_path).expect("Failed to open catalog store"));
        let catalog = CatalogService::new(store);
        seed_catalog(&catalog).expect("Failed to seed catalog");

        let media = MediaStore::new(&media_path);
        media.init().await.expect("Failed to create media dir");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            content_cache_age_sec: 0,
            max_upload_size_bytes,
            ..Default::default()
        };
        let state = ServerState::new(config, catalog.clone(), media, PageRenderer::default());
        let app = make_app(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            catalog,
            temp_dir,
            shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Directory uploaded files are written to.
    pub fn uploads_dir(&self) -> PathBuf {
        self.temp_dir.path().join("static").join("uploads")
    }

    /// Polls the server info endpoint until it answers
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/v1/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
