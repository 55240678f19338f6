use axum::Router;
use axum::routing::get;

use crate::app::AppState;
use crate::handlers::box_entry::{
    clear_entries, create_entry, delete_entry, get_entry, list_entries, update_entry,
};

pub fn box_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/box",
            get(list_entries).post(create_entry).delete(clear_entries),
        )
        .route(
            "/box/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}
