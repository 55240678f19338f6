//! Subset of the PokéAPI v2 response schema that the aggregator reads.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

impl NamedResource {
    pub fn named(name: &str) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NamedResourceList {
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PokemonData {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub sprites: SpriteUrls,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: i64,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpriteUrls {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpeciesData {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    pub power: Option<i64>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// First English entry in source order.
pub fn english_name(names: &[LocalizedName]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.language.name == "en")
        .map(|n| n.name.as_str())
}
