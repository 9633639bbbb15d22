mod file_config;

pub use file_config::FileConfig;

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::net::IpAddr;
use std::path::PathBuf;

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub media_path: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub max_upload_size_mb: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("audio_server.db"),
            media_path: PathBuf::from("static"),
            templates_dir: None,
            host: "127.0.0.1".to_string(),
            port: 3001,
            logging_level: RequestsLoggingLevel::Path,
            content_cache_age_sec: 3600,
            max_upload_size_mb: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub media_path: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub host: IpAddr,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub max_upload_size_mb: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        let media_path = file
            .media_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.media_path.clone());
        let templates_dir = file
            .templates_dir
            .map(PathBuf::from)
            .or_else(|| cli.templates_dir.clone());

        if let Some(dir) = &templates_dir {
            if !dir.is_dir() {
                bail!("Templates directory does not exist: {:?}", dir);
            }
        }

        let host_str = file.host.unwrap_or_else(|| cli.host.clone());
        let host: IpAddr = host_str
            .parse()
            .with_context(|| format!("Invalid host address: {}", host_str))?;
        let port = file.port.unwrap_or(cli.port);

        // Unknown levels in the file fall back to the CLI value
        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let max_upload_size_mb = file.max_upload_size_mb.unwrap_or(cli.max_upload_size_mb);
        if max_upload_size_mb == 0 {
            bail!("max_upload_size_mb must be greater than zero");
        }

        Ok(Self {
            db_path,
            media_path,
            templates_dir,
            host,
            port,
            logging_level,
            content_cache_age_sec,
            max_upload_size_mb,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host,
            port: self.port,
            content_cache_age_sec: self.content_cache_age_sec,
            max_upload_size_bytes: self.max_upload_size_mb * 1024 * 1024,
        }
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
