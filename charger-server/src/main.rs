use std::net::SocketAddr;
use std::path::PathBuf;

use charger_server::blacklist::{Blacklist, BlacklistError, FileBlacklist, MemoryBlacklist};
use charger_server::cache::{CacheConfig, CachedDirectory};
use charger_server::directory::{
    ChargerDirectory, DirectoryError, OpenChargeMapClient, OpenChargeMapConfig, StaticDirectory,
};
use charger_server::finder::{ChargerFinder, FinderConfig, SyntheticSource};
use charger_server::location::NoLocation;
use charger_server::synthetic::SyntheticGenerator;
use charger_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid CHARGER_BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid CHARGER_SYNTHETIC_SEED {0:?}: expected an unsigned integer")]
    Seed(String),

    #[error("invalid CHARGER_SYNTHETIC_SOURCE: {0} (expected nearby or waypoints)")]
    SyntheticSource(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Blacklist(#[from] BlacklistError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings read from the environment.
struct Settings {
    bind_addr: SocketAddr,
    api_key: String,
    base_url: Option<String>,
    poi_file: Option<PathBuf>,
    blacklist_path: Option<PathBuf>,
    synthetic_seed: Option<u64>,
    synthetic_source: SyntheticSource,
}

impl Settings {
    fn from_env() -> Result<Self, StartupError> {
        let bind = env("CHARGER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|source| StartupError::BindAddr { value: bind, source })?;

        let synthetic_seed = env("CHARGER_SYNTHETIC_SEED")
            .map(|s| s.trim().parse::<u64>().map_err(|_| StartupError::Seed(s)))
            .transpose()?;

        let synthetic_source = env("CHARGER_SYNTHETIC_SOURCE")
            .map(|s| s.parse::<SyntheticSource>())
            .transpose()
            .map_err(StartupError::SyntheticSource)?
            .unwrap_or_default();

        let poi_file = env("CHARGER_POI_FILE").map(PathBuf::from);
        let api_key = env("OPENCHARGEMAP_API_KEY").unwrap_or_default();
        if api_key.is_empty() && poi_file.is_none() {
            warn!("OPENCHARGEMAP_API_KEY not set; live searches may be refused");
        }

        Ok(Self {
            bind_addr,
            api_key,
            base_url: env("OPENCHARGEMAP_BASE_URL"),
            poi_file,
            blacklist_path: env("CHARGER_BLACKLIST_PATH").map(PathBuf::from),
            synthetic_seed,
            synthetic_source,
        })
    }
}

/// Non-empty environment variable.
fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let settings = Settings::from_env()?;
    let cache_config = CacheConfig::default();

    match &settings.poi_file {
        Some(path) => {
            let directory = StaticDirectory::from_file(path)?;
            with_blacklist(CachedDirectory::new(directory, &cache_config), &settings).await
        }
        None => {
            let mut config = OpenChargeMapConfig::new(&settings.api_key);
            if let Some(url) = &settings.base_url {
                config = config.with_base_url(url);
            }
            let client = OpenChargeMapClient::new(config)?;
            with_blacklist(CachedDirectory::new(client, &cache_config), &settings).await
        }
    }
}

async fn with_blacklist<D>(directory: D, settings: &Settings) -> Result<(), StartupError>
where
    D: ChargerDirectory + 'static,
{
    match &settings.blacklist_path {
        Some(path) => {
            let blacklist = FileBlacklist::open(path)?;
            info!(path = %path.display(), count = blacklist.ids().await.len(), "Loaded blacklist");
            serve(directory, blacklist, settings).await
        }
        None => serve(directory, MemoryBlacklist::new(), settings).await,
    }
}

async fn serve<D, B>(directory: D, blacklist: B, settings: &Settings) -> Result<(), StartupError>
where
    D: ChargerDirectory + 'static,
    B: Blacklist + 'static,
{
    let synthetic = match settings.synthetic_seed {
        Some(seed) => SyntheticGenerator::seeded(seed),
        None => SyntheticGenerator::from_entropy(),
    };
    let config = FinderConfig::default().with_synthetic_source(settings.synthetic_source);
    let finder =
        ChargerFinder::new(directory, NoLocation, blacklist, config).with_synthetic(synthetic);
    info!(synthetic = settings.synthetic_source.as_str(), "Fallback data source");

    let app = create_router(AppState::new(finder));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "Corridor charger finder listening");
    info!("  GET    /health               - Health check");
    info!("  GET    /api/chargers         - Rank chargers (direction, range, lat, lon, filters)");
    info!("  GET    /api/blacklist        - List hidden chargers");
    info!("  PUT    /api/blacklist/:id    - Hide a charger");
    info!("  DELETE /api/blacklist/:id    - Unhide a charger");
    info!("  DELETE /api/blacklist        - Clear the blacklist");

    axum::serve(listener, app).await?;
    Ok(())
}
