use serde::{Deserialize, Serialize};

/// Color used for any type name missing from [`TYPE_COLORS`].
pub const UNKNOWN_TYPE_COLOR: &str = "#000000";

/// Canonical type name to badge color.
pub const TYPE_COLORS: [(&str, &str); 18] = [
    ("normal", "#A8A77A"),
    ("fire", "#EE8130"),
    ("water", "#6390F0"),
    ("electric", "#F7D02C"),
    ("grass", "#7AC74C"),
    ("ice", "#96D9D6"),
    ("fighting", "#C22E28"),
    ("poison", "#A33EA1"),
    ("ground", "#E2BF65"),
    ("flying", "#A98FF3"),
    ("psychic", "#F95587"),
    ("bug", "#A6B91A"),
    ("rock", "#B6A136"),
    ("ghost", "#735797"),
    ("dragon", "#6F35FC"),
    ("dark", "#705746"),
    ("steel", "#B7B7CE"),
    ("fairy", "#D685AD"),
];

pub fn type_color(name: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(t, _)| *t == name)
        .map(|(_, c)| *c)
        .unwrap_or(UNKNOWN_TYPE_COLOR)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonType {
    pub name: String,
    pub color: String,
}

impl PokemonType {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            color: type_color(name).to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonMove {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i64>,
    #[serde(rename = "type")]
    pub type_: PokemonType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: String,
    pub back_default: String,
    pub front_shiny: String,
    pub back_shiny: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: i64,
    pub speed: i64,
    pub attack: i64,
    pub defense: i64,
    pub special_attack: i64,
    pub special_defense: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub types: Vec<PokemonType>,
    pub moves: Vec<PokemonMove>,
    pub sprites: Sprites,
    pub stats: Stats,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
}
