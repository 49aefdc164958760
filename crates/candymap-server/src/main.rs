mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use rand::{Rng, distr::Alphanumeric};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use candymap_api::moderation::{missing_moderators, seed_moderators};
use candymap_api::state::{AppState, AppStateInner};
use candymap_api::uploads::{PUBLIC_PREFIX, Storage};
use candymap_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candymap=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Durable directories, schema, seed accounts
    tokio::fs::create_dir_all(&config.data_dir).await?;
    let storage = Storage::new(config.uploads_dir()).await?;
    let db = Database::open(&config.db_path())?;

    let missing = missing_moderators(&db, &config.moderators)?;
    if !missing.is_empty() {
        let password = seed_password(config.moderator_password.as_deref(), &missing);
        let created = seed_moderators(&db, &config.moderators, &password)?;
        info!("Seeded {} moderator account(s)", created);
    }

    let uploads_dir = storage.dir().to_path_buf();
    let state: AppState = Arc::new(AppStateInner {
        db,
        storage,
        moderators: config.moderators.clone(),
    });

    let app = candymap_api::router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(uploads_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Candymap server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Configured password, or a random one logged once for the accounts
/// about to be created.
fn seed_password(configured: Option<&str>, missing: &[&str]) -> String {
    if let Some(p) = configured {
        return p.to_string();
    }
    let generated: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect();
    warn!(
        "CANDYMAP_MODERATOR_PASSWORD unset; moderator account(s) {} get password {}",
        missing.join(", "),
        generated
    );
    generated
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        else {
            ctrl_c.await.ok();
            info!("Received Ctrl+C, shutting down...");
            return;
        };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
