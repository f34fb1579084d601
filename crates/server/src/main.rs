use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use db::{DBService, DbErr};
use server::{AppState, http};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};
use wechat::{SubscribeService, WechatConfig};

const DEFAULT_PORT: u16 = 80;
const DATA_DIR_ENV: &str = "BOOKING_DATA_DIR";

#[derive(Debug, Error)]
pub enum BookingServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

fn database_url() -> Result<String, std::io::Error> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }
    // Local fallback; cloud deployments point DATABASE_URL at MySQL.
    let data_dir = std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    std::fs::create_dir_all(&data_dir)?;
    Ok(format!(
        "sqlite://{}?mode=rwc",
        data_dir.join("db.sqlite").to_string_lossy()
    ))
}

fn listen_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<(), BookingServerError> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},db={level},wechat={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string).expect("Failed to create tracing filter");
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let db = DBService::new(&database_url()?).await?;
    let wechat = SubscribeService::new(WechatConfig::from_env());
    if wechat.is_configured() {
        tracing::info!("audit notification relay configured");
    }

    let app = http::router(AppState::new(db, wechat));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, listen_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "booking backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
