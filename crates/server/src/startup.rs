use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::assets::AssetService;
use service::auth::repo::seaorm::SeaOrmAdminRepository;
use service::auth::service::AuthConfig;
use service::auth::AuthService;
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::service::BookingConfig;
use service::booking::BookingService;
use service::runtime;
use service::storage::{ImageStorage, LocalDiskStorage, RemoteStorage};

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; a missing file falls back to a default config filled
/// from environment variables, which still must produce a database URL.
fn load_config() -> anyhow::Result<configs::AppConfig> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(_) => {
            let mut cfg = configs::AppConfig::default();
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
    }
}

fn build_storage(cfg: &configs::StorageConfig) -> Arc<dyn ImageStorage> {
    match cfg.backend.as_str() {
        "remote" => Arc::new(RemoteStorage::new(cfg.upload_url.clone(), cfg.api_key.clone())),
        _ => Arc::new(LocalDiskStorage::new(cfg.local_root.clone(), cfg.public_base.clone())),
    }
}

/// Wire services over one pool and build the application state.
pub async fn build_state(cfg: &configs::AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let storage = build_storage(&cfg.storage);

    let jwt_secret = if cfg.auth.jwt_secret.is_empty() {
        "dev-secret-change-me".to_string()
    } else {
        cfg.auth.jwt_secret.clone()
    };
    let auth = Arc::new(AuthService::new(
        Arc::new(SeaOrmAdminRepository { db: db.clone() }),
        AuthConfig { jwt_secret, session_ttl_hours: cfg.auth.session_ttl_hours },
    ));
    auth.ensure_bootstrap_admin(&cfg.admin.username, &cfg.admin.password).await?;

    let bookings = Arc::new(BookingService::new(
        Arc::new(SeaOrmBookingRepository { db: db.clone() }),
        BookingConfig {
            country_code: cfg.notify.country_code.clone(),
            whatsapp_number: cfg.notify.whatsapp_number.clone(),
        },
    ));

    let assets = Arc::new(AssetService::new(db, storage));

    Ok(ServerState {
        bookings,
        assets,
        auth,
        whatsapp_number: cfg.notify.whatsapp_number.clone(),
    })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    if cfg.storage.backend == "local" {
        runtime::ensure_env("static", &cfg.storage.local_root).await?;
    }

    let state = build_state(&cfg).await?;

    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, storage = %cfg.storage.backend, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
