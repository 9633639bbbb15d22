use anyhow::{Context, Result};
use audiopage_server::config::{AppConfig, CliConfig, FileConfig};
use audiopage_server::media::MediaStore;
use audiopage_server::render::PageRenderer;
use audiopage_server::{run_server, CatalogService, RequestsLoggingLevel, SqliteCatalogStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(version, about = "Audio track catalog server")]
struct CliArgs {
    /// Optional TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite catalog database file.
    #[clap(long, default_value = "audio_server.db", value_parser = parse_path)]
    pub db_path: PathBuf,

    /// Public media directory, served under /static. Uploads land in its
    /// `uploads` subdirectory.
    #[clap(long, default_value = "static", value_parser = parse_path)]
    pub media_path: PathBuf,

    /// Directory with `index.html` and/or `track.html` overriding the
    /// built-in pages.
    #[clap(long, value_parser = parse_path)]
    pub templates_dir: Option<PathBuf>,

    /// The address to bind.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of static media in the client cache, in seconds.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Largest accepted upload, in megabytes.
    #[clap(long, default_value_t = 100)]
    pub max_upload_size_mb: usize,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            media_path: self.media_path.clone(),
            templates_dir: self.templates_dir.clone(),
            host: self.host.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            max_upload_size_mb: self.max_upload_size_mb,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening catalog database at {:?}...", app_config.db_path);
    let store = Arc::new(SqliteCatalogStore::new(&app_config.db_path)?);
    let catalog = CatalogService::new(store);

    let renderer = match &app_config.templates_dir {
        Some(dir) => PageRenderer::from_dir(dir)?,
        None => PageRenderer::default(),
    };
    let media = MediaStore::new(&app_config.media_path);

    info!(
        "Serving media from {:?}, request logging: {}",
        app_config.media_path, app_config.logging_level
    );
    run_server(app_config.server_config(), catalog, media, renderer).await
}
