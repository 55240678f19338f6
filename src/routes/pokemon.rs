use axum::Router;
use axum::routing::get;

use crate::app::AppState;
use crate::handlers::pokemon::{get_pokemon, list_pokemon};

pub fn pokemon_routes() -> Router<AppState> {
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{name}", get(get_pokemon))
}
