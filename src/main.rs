use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pokebox_backend::app::{AppState, build_app};
use pokebox_backend::config::Config;
use pokebox_backend::db::init_store;
use pokebox_backend::pokeapi::PokeApiClient;

// cargo watch -c -x run

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if config.jwt_secret.is_none() {
        tracing::error!("JWT_TOKEN_SECRET is not defined, token routes will answer 500");
    }

    let store = init_store(&config.redis_url)?;
    let api = PokeApiClient::new(&config.pokeapi_url, config.upstream_timeout)?;
    let addr = config.backend_url.clone();

    let app = build_app(AppState::new(config, store, Arc::new(api)));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
