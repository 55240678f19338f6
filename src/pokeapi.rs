use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::pokeapi::{MoveData, NamedResourceList, PokemonData, SpeciesData};

#[derive(Debug, Error)]
pub enum PokeApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("reference data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookups against the reference catalogue.
#[async_trait]
pub trait PokeApi: Send + Sync {
    async fn pokemon(&self, name: &str) -> Result<PokemonData, PokeApiError>;
    async fn species(&self, name: &str) -> Result<SpeciesData, PokeApiError>;
    async fn move_detail(&self, name: &str) -> Result<MoveData, PokeApiError>;
    async fn pokemon_page(&self, limit: u32, offset: u32)
    -> Result<NamedResourceList, PokeApiError>;
}

pub struct PokeApiClient {
    http: Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PokeApiError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| PokeApiError::Unavailable(format!("invalid POKEAPI_URL {base_url}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Each segment is percent-encoded, so `/`, `?` and `#` in a name stay inside it.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, u32)],
    ) -> Result<T, PokeApiError> {
        let url = self.endpoint(segments);
        let res = self.http.get(url).query(query).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Err(PokeApiError::NotFound(segments.join("/")));
        }
        Ok(res.error_for_status()?.json::<T>().await?)
    }
}

#[async_trait]
impl PokeApi for PokeApiClient {
    async fn pokemon(&self, name: &str) -> Result<PokemonData, PokeApiError> {
        self.fetch(&["pokemon", name.to_lowercase().as_str()], &[])
            .await
    }

    async fn species(&self, name: &str) -> Result<SpeciesData, PokeApiError> {
        self.fetch(&["pokemon-species", name.to_lowercase().as_str()], &[])
            .await
    }

    async fn move_detail(&self, name: &str) -> Result<MoveData, PokeApiError> {
        self.fetch(&["move", name], &[]).await
    }

    async fn pokemon_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<NamedResourceList, PokeApiError> {
        self.fetch(&["pokemon"], &[("limit", limit), ("offset", offset)])
            .await
    }
}
