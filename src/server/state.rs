use axum::extract::FromRef;

use crate::catalog::CatalogService;
use crate::media::MediaStore;
use crate::render::PageRenderer;
use crate::upload::UploadHandler;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedPageRenderer = Arc<PageRenderer>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: CatalogService,
    pub uploads: UploadHandler,
    pub media: MediaStore,
    pub renderer: GuardedPageRenderer,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: CatalogService,
        media: MediaStore,
        renderer: PageRenderer,
    ) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            uploads: UploadHandler::new(catalog.clone(), media.clone()),
            catalog,
            media,
            renderer: Arc::new(renderer),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for CatalogService {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for UploadHandler {
    fn from_ref(input: &ServerState) -> Self {
        input.uploads.clone()
    }
}

impl FromRef<ServerState> for GuardedPageRenderer {
    fn from_ref(input: &ServerState) -> Self {
        input.renderer.clone()
    }
}
