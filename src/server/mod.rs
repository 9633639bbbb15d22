mod api_error;
mod catalog_routes;
mod extract;
pub mod config;
mod http_layers;
mod page_routes;
pub mod server;
pub mod state;
mod upload_routes;

pub use api_error::{ApiError, ErrorResponse};
pub use catalog_routes::MessageResponse;
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
pub use state::ServerState;
