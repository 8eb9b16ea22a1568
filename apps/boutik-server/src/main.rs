//! Boutik server binary: config, database, migrations and the merged
//! module routers under `/v1`.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clientele::api::rest::routes::{
    self as clientele_routes, ClienteleServices, ConcreteAuthService, ConcreteClientsService,
    ConcreteUsersService,
};
use clientele::infra::security::argon_hasher::ArgonPasswordHasher;
use clientele::infra::security::loyalty::LoggingLoyaltyNotifier;
use clientele::infra::storage::clients_sea_repo::SeaOrmClientsRepository;
use clientele::infra::storage::tokens_sea_repo::SeaOrmTokensRepository;
use clientele::infra::storage::users_sea_repo::SeaOrmUsersRepository;
use inventory::api::rest::routes::{self as inventory_routes, ConcreteArticlesService};
use inventory::infra::storage::articles_sea_repo::SeaOrmArticlesRepository;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "boutik-server",
    version,
    about = "Boutik inventory & client management server"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address, overrides the configuration file.
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Database URL, overrides the configuration file.
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let db = connect(&config.database).await?;
    inventory::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("running inventory migrations")?;
    clientele::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("running clientele migrations")?;

    let app = build_router(Arc::new(db));
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(cfg: &config::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .with_context(|| format!("connecting to {}", cfg.url))
}

/// Wire both modules onto the shared connection and mount them under `/v1`.
fn build_router(db: Arc<DatabaseConnection>) -> Router {
    let articles = Arc::new(ConcreteArticlesService::new(
        Arc::clone(&db),
        Arc::new(SeaOrmArticlesRepository::new()),
    ));

    let clients_repo = Arc::new(SeaOrmClientsRepository::new());
    let users_repo = Arc::new(SeaOrmUsersRepository::new());
    let tokens_repo = Arc::new(SeaOrmTokensRepository::new());
    let hasher = Arc::new(ArgonPasswordHasher::new());

    let services = ClienteleServices {
        clients: Arc::new(ConcreteClientsService::new(
            Arc::clone(&db),
            clients_repo,
            Arc::clone(&users_repo),
            hasher.clone(),
            Arc::new(LoggingLoyaltyNotifier::new()),
        )),
        users: Arc::new(ConcreteUsersService::new(
            Arc::clone(&db),
            Arc::clone(&users_repo),
            hasher.clone(),
        )),
        auth: Arc::new(ConcreteAuthService::new(db, users_repo, tokens_repo, hasher)),
    };

    let v1 = inventory_routes::router(articles).merge(clientele_routes::router(services));
    Router::new()
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Full wiring smoke test: both module crates link, migrate and answer
    /// through the assembled router.
    #[tokio::test]
    async fn router_serves_both_modules() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        inventory::infra::storage::migrations::Migrator::up(&db, None)
            .await
            .unwrap();
        clientele::infra::storage::migrations::Migrator::up(&db, None)
            .await
            .unwrap();
        let app = build_router(Arc::new(db));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/v1/article")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/clients")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
