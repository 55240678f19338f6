use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::error::ApiError;
use crate::pokeapi::PokeApi;
use crate::routes;
use crate::services::box_store::BoxStore;
use crate::services::pokemon::PokemonService;

pub const WELCOME: &str = "pokebox backend is running";

/// Handles shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub boxes: BoxStore,
    pub pokemon: PokemonService,
}

impl AppState {
    pub fn new(config: Config, kv: Arc<dyn KeyValueStore>, api: Arc<dyn PokeApi>) -> Self {
        Self {
            config: Arc::new(config),
            boxes: BoxStore::new(kv),
            pokemon: PokemonService::new(api),
        }
    }

    pub fn signing_secret(&self) -> Result<&str, ApiError> {
        self.config
            .jwt_secret
            .as_deref()
            .ok_or_else(|| ApiError::Config("JWT_TOKEN_SECRET is not defined".into()))
    }
}

pub fn build_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { WELCOME }))
        .merge(routes::auth::auth_routes())
        .merge(routes::box_entry::box_routes())
        .merge(routes::pokemon::pokemon_routes())
}

pub fn build_app(state: AppState) -> Router {
    let mut app = build_routes()
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = &state.config.frontend_origin {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
                app = app.layer(cors);
            }
            Err(e) => tracing::warn!("ignoring FRONTEND_ORIGIN {origin}: {e}"),
        }
    }
    app
}
