use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::net::TcpListener;

use pokebox_backend::app::{AppState, build_app};
use pokebox_backend::config::Config;
use pokebox_backend::db::MemoryStore;
use pokebox_backend::models::pokeapi::{MoveData, NamedResourceList, PokemonData, SpeciesData};
use pokebox_backend::pokeapi::{PokeApi, PokeApiError};

#[allow(dead_code)]
pub const SECRET: &str = "integration-secret";

/// Catalogue served from JSON fixtures shaped like PokéAPI responses.
#[derive(Default)]
pub struct FixtureCatalog {
    pokemon: HashMap<String, serde_json::Value>,
    species: HashMap<String, serde_json::Value>,
    moves: HashMap<String, serde_json::Value>,
}

impl FixtureCatalog {
    pub fn kanto() -> Self {
        let mut c = Self::default();
        c.pokemon.insert(
            "bulbasaur".into(),
            json!({
                "id": 1,
                "name": "bulbasaur",
                "moves": [
                    {"move": {"name": "tackle", "url": ""}},
                    {"move": {"name": "glitch", "url": ""}},
                    {"move": {"name": "vine-whip", "url": ""}}
                ],
                "types": [
                    {"slot": 1, "type": {"name": "grass", "url": ""}},
                    {"slot": 2, "type": {"name": "poison", "url": ""}}
                ],
                "stats": [
                    {"base_stat": 45, "stat": {"name": "hp", "url": ""}},
                    {"base_stat": 49, "stat": {"name": "attack", "url": ""}},
                    {"base_stat": 65, "stat": {"name": "special-defense", "url": ""}}
                ],
                "sprites": {"front_default": "https://img.example/1.png", "back_default": null}
            }),
        );
        c.species.insert(
            "bulbasaur".into(),
            json!({
                "names": [
                    {"name": "Bulbizarre", "language": {"name": "fr", "url": ""}},
                    {"name": "Bulbasaur", "language": {"name": "en", "url": ""}}
                ],
                "flavor_text_entries": [
                    {"flavor_text": "A strange seed was\nplanted on its\u{c}back at birth.", "language": {"name": "en", "url": ""}}
                ]
            }),
        );
        c.pokemon.insert(
            "ivysaur".into(),
            json!({
                "id": 2,
                "name": "ivysaur",
                "moves": [],
                "types": [{"slot": 1, "type": {"name": "grass", "url": ""}}],
                "stats": [],
                "sprites": {}
            }),
        );
        c.species.insert(
            "ivysaur".into(),
            json!({"names": [], "flavor_text_entries": []}),
        );
        c.moves.insert(
            "tackle".into(),
            json!({
                "name": "tackle",
                "names": [{"name": "Tackle", "language": {"name": "en", "url": ""}}],
                "power": 40,
                "type": {"name": "normal", "url": ""}
            }),
        );
        c.moves.insert(
            "vine-whip".into(),
            json!({
                "name": "vine-whip",
                "names": [{"name": "Vine Whip", "language": {"name": "en", "url": ""}}],
                "power": 45,
                "type": {"name": "grass", "url": ""}
            }),
        );
        c
    }

    fn lookup<T: serde::de::DeserializeOwned>(
        table: &HashMap<String, serde_json::Value>,
        path: &str,
        name: &str,
    ) -> Result<T, PokeApiError> {
        let value = table
            .get(name)
            .ok_or_else(|| PokeApiError::NotFound(format!("{path}/{name}")))?;
        serde_json::from_value(value.clone()).map_err(|e| PokeApiError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl PokeApi for FixtureCatalog {
    async fn pokemon(&self, name: &str) -> Result<PokemonData, PokeApiError> {
        Self::lookup(&self.pokemon, "pokemon", name)
    }

    async fn species(&self, name: &str) -> Result<SpeciesData, PokeApiError> {
        Self::lookup(&self.species, "pokemon-species", name)
    }

    async fn move_detail(&self, name: &str) -> Result<MoveData, PokeApiError> {
        if name == "glitch" {
            return Err(PokeApiError::Unavailable("move/glitch: 502".into()));
        }
        Self::lookup(&self.moves, "move", name)
    }

    async fn pokemon_page(&self, limit: u32, offset: u32) -> Result<NamedResourceList, PokeApiError> {
        let mut names: Vec<_> = self.pokemon.values().cloned().collect();
        names.sort_by_key(|p| p["id"].as_i64());
        let results: Vec<_> = names
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| json!({"name": p["name"].clone(), "url": ""}))
            .collect();
        serde_json::from_value(json!({"count": names.len(), "results": results}))
            .map_err(|e| PokeApiError::Unavailable(e.to_string()))
    }
}

#[allow(dead_code)]
pub async fn start_server() -> (String, tokio::task::JoinHandle<()>) {
    start_server_with(Some(SECRET)).await
}

pub async fn start_server_with(secret: Option<&str>) -> (String, tokio::task::JoinHandle<()>) {
    let config = Config {
        jwt_secret: secret.map(str::to_string),
        ..Config::default()
    };
    let state = AppState::new(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(FixtureCatalog::kanto()),
    );
    let app = build_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("serve error: {e}");
        }
    });

    for _ in 0..30 {
        if let Ok(resp) = reqwest::get(format!("{url}/")).await {
            if resp.status().is_success() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    (url, handle)
}

#[allow(dead_code)]
pub async fn token_for(base: &str, pennkey: &str) -> String {
    let res = reqwest::Client::new()
        .post(format!("{base}/token"))
        .json(&json!({ "pennkey": pennkey }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}
