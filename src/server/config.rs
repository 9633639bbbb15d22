use super::RequestsLoggingLevel;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub host: IpAddr,
    pub port: u16,
    /// `Cache-Control: max-age` for files under `/static`.
    pub content_cache_age_sec: usize,
    pub max_upload_size_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3001,
            content_cache_age_sec: 3600,
            max_upload_size_bytes: 100 * 1024 * 1024,
        }
    }
}
