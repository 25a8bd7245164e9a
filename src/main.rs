use axum::serve;
use horse_registry::config::AppConfig;
use horse_registry::seed;
use horse_registry::store::MemoryStore;
use log::{info, LevelFilter};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: server={}:{}, default pedigree depth {}",
        config.server.host, config.server.port, config.pedigree.default_max_generations
    );

    let store = Arc::new(MemoryStore::with_default_max_generations(
        config.pedigree.default_max_generations,
    ));

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        info!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
    }

    run_server(horse_registry::create_app(store), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Horse registry backend running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
