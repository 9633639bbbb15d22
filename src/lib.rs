//! AudioPage Server Library
//!
//! An audio-track catalog web service: upload audio files, browse and play
//! them, and manage tracks, authors, users and playlists over a JSON API.

pub mod catalog;
pub mod catalog_store;
pub mod config;
pub mod media;
pub mod render;
pub mod server;
pub mod sqlite_persistence;
pub mod upload;

pub use catalog::CatalogService;
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig, ServerState};
