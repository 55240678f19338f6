use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};

use crate::models::pokeapi::{MoveData, PokemonData, SpeciesData, english_name};
use crate::models::pokemon::{PokemonDetail, PokemonMove, PokemonType, Sprites, Stats};
use crate::pokeapi::{PokeApi, PokeApiError};

pub const NO_DESCRIPTION: &str = "No description available.";

/// Outcome of one per-move lookup during aggregation.
#[derive(Debug)]
pub enum MoveLookup {
    Found(PokemonMove),
    Skipped { name: String, reason: String },
}

impl MoveLookup {
    fn from_result(name: &str, result: Result<MoveData, PokeApiError>) -> Self {
        match result {
            Ok(data) => MoveLookup::Found(build_move(&data)),
            Err(err) => MoveLookup::Skipped {
                name: name.to_string(),
                reason: err.to_string(),
            },
        }
    }

    /// Logs and drops skipped lookups, keeping input order.
    pub fn into_found(lookups: Vec<MoveLookup>) -> Vec<PokemonMove> {
        lookups
            .into_iter()
            .filter_map(|lookup| match lookup {
                MoveLookup::Found(mv) => Some(mv),
                MoveLookup::Skipped { name, reason } => {
                    tracing::warn!(%name, %reason, "skipping move");
                    None
                }
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct PokemonService {
    api: Arc<dyn PokeApi>,
}

impl PokemonService {
    pub fn new(api: Arc<dyn PokeApi>) -> Self {
        Self { api }
    }

    /// Base data, species and every move, merged into one view.
    pub async fn detail(&self, name: &str) -> Result<PokemonDetail, PokeApiError> {
        let base = self.api.pokemon(name).await?;
        let species = self.api.species(name).await?;

        let lookups = join_all(base.moves.iter().map(|slot| async move {
            let move_name = slot.move_.name.as_str();
            MoveLookup::from_result(move_name, self.api.move_detail(move_name).await)
        }))
        .await;

        Ok(assemble(base, &species, MoveLookup::into_found(lookups)))
    }

    /// One page of the catalogue, detailed concurrently, in page order.
    /// A single failed detail fails the whole page.
    pub async fn page(&self, limit: u32, offset: u32) -> Result<Vec<PokemonDetail>, PokeApiError> {
        let list = self.api.pokemon_page(limit, offset).await?;
        try_join_all(list.results.iter().map(|p| async move {
            self.detail(&p.name).await.map_err(|err| match err {
                PokeApiError::NotFound(what) => {
                    PokeApiError::Unavailable(format!("listed pokemon {what} vanished"))
                }
                other => other,
            })
        }))
        .await
    }
}

fn build_move(data: &MoveData) -> PokemonMove {
    PokemonMove {
        name: english_name(&data.names).unwrap_or(&data.name).to_string(),
        power: data.power,
        type_: PokemonType::from_name(&data.type_.name),
    }
}

fn description(species: &SpeciesData) -> String {
    species
        .flavor_text_entries
        .iter()
        .find(|e| e.language.name == "en")
        .map(|e| e.flavor_text.replace(['\n', '\u{c}'], " "))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

fn stats(base: &PokemonData) -> Stats {
    let stat = |name: &str| {
        base.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
            .unwrap_or(0)
    };
    Stats {
        hp: stat("hp"),
        speed: stat("speed"),
        attack: stat("attack"),
        defense: stat("defense"),
        special_attack: stat("special-attack"),
        special_defense: stat("special-defense"),
    }
}

fn assemble(base: PokemonData, species: &SpeciesData, moves: Vec<PokemonMove>) -> PokemonDetail {
    let name = english_name(&species.names)
        .unwrap_or(&base.name)
        .to_string();
    let stats = stats(&base);
    let sprites = base.sprites;
    PokemonDetail {
        id: base.id,
        name,
        description: description(species),
        types: base
            .types
            .iter()
            .map(|t| PokemonType::from_name(&t.type_.name))
            .collect(),
        moves,
        sprites: Sprites {
            front_default: sprites.front_default.unwrap_or_default(),
            back_default: sprites.back_default.unwrap_or_default(),
            front_shiny: sprites.front_shiny.unwrap_or_default(),
            back_shiny: sprites.back_shiny.unwrap_or_default(),
        },
        stats,
    }
}
