use axum::{
    Json,
    extract::rejection::QueryRejection,
    extract::{Path, Query, State},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::helpers::{ApiResult, bad_request, not_found, query_rejection};
use crate::models::pokemon::{ListParams, PokemonDetail};
use crate::pokeapi::PokeApiError;

pub async fn list_pokemon(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<PokemonDetail>>> {
    let Query(params) = params.map_err(query_rejection)?;
    let limit = u32::try_from(params.limit).ok().filter(|l| *l > 0);
    let offset = u32::try_from(params.offset).ok();
    let (Some(limit), Some(offset)) = (limit, offset) else {
        return Err(bad_request("Invalid limit or offset"));
    };

    Ok(Json(state.pokemon.page(limit, offset).await?))
}

/// Catalogue names and ids only use ASCII letters, digits and hyphens.
fn is_catalogue_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<PokemonDetail>> {
    if name.trim().is_empty() {
        return Err(bad_request("Name is required"));
    }
    if !is_catalogue_name(&name) {
        return Err(not_found("Pokemon not found"));
    }
    match state.pokemon.detail(&name).await {
        Ok(detail) => Ok(Json(detail)),
        Err(PokeApiError::NotFound(_)) => Err(not_found("Pokemon not found")),
        Err(e) => Err(ApiError::from(e)),
    }
}
