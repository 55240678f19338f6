use axum::Router;
use axum::routing::post;

use crate::app::AppState;
use crate::handlers::auth::create_token;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(create_token))
}
