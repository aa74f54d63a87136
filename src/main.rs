use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecommerce_api::config;
use ecommerce_api::database::DatabaseManager;
use ecommerce_api::server;
use ecommerce_api::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "ecommerce-api", version, about = "E-commerce catalogue API server")]
struct Args {
    /// Interface to bind (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Do not apply database migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;
    config.database_url().context("invalid configuration")?;
    tracing::info!("Starting ecommerce API in {:?} mode", config.environment);

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database.health_check().await.context("database is not reachable")?;

    if config.database.run_migrations && !args.skip_migrations {
        database.migrate().await.context("failed to apply migrations")?;
    } else {
        tracing::info!("Skipping database migrations");
    }

    let state = AppState::postgres(database.pool(), &config)?;
    let router = server::app(state, &config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    server::serve(listener, router).await?;
    database.close().await;
    Ok(())
}
