use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::helpers::{ApiResult, invalid_body, json_rejection, not_found};
use crate::models::box_entry::{BoxEntry, InsertBoxEntry, UpdateBoxEntry};

const ENTRY_NOT_FOUND: &str = "Box entry not found";

pub async fn list_entries(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.boxes.list(&pennkey).await?))
}

pub async fn create_entry(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
    payload: Result<Json<InsertBoxEntry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BoxEntry>)> {
    let Json(input) = payload.map_err(json_rejection)?;
    input.validate().map_err(invalid_body)?;

    let entry = state.boxes.create(&pennkey, input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn clear_entries(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
) -> ApiResult<StatusCode> {
    state.boxes.clear(&pennkey).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_entry(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BoxEntry>> {
    state
        .boxes
        .read(&pennkey, &id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTRY_NOT_FOUND))
}

pub async fn update_entry(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBoxEntry>, JsonRejection>,
) -> ApiResult<Json<BoxEntry>> {
    let Json(update) = payload.map_err(json_rejection)?;
    update.validate().map_err(invalid_body)?;

    state
        .boxes
        .update(&pennkey, &id, update)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ENTRY_NOT_FOUND))
}

pub async fn delete_entry(
    CurrentUser(pennkey): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.boxes.delete(&pennkey, &id).await? {
        return Err(not_found(ENTRY_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
