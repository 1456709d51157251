use std::sync::Arc;

use axum::http::header::{self, HeaderName};
use axum::http::{HeaderValue, Method};
use shared::physics::PhysicsConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::{MemoryStore, PgStore, WheelStore};

mod config;
mod error;
mod logging;
mod routes;
mod services;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WheelStore>,
    pub physics: PhysicsConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup()?;

    let config = Config::from_env()?;

    let store: Arc<dyn WheelStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::connect(url).await?),
        None => {
            info!("DATABASE_URL not set, wheels are kept in memory and lost on restart");
            Arc::new(MemoryStore::default())
        }
    };

    let state = AppState {
        store,
        physics: config.physics,
    };

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS, Method::DELETE])
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-requested-with"),
        ]);

    let app = routes::create_router(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!(
        "🎡 Spin wheel server listening on {} (friction {}, stop below {})",
        config.bind_addr,
        config.physics.friction(),
        config.physics.min_speed()
    );
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
