use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::FieldIssue;

/// A caught Pokémon stored in one user's box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxEntry {
    pub id: String,
    pub created_at: String,
    pub level: i64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub pokemon_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertBoxEntry {
    pub created_at: String,
    pub level: i64,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub pokemon_id: i64,
}

/// Partial update. `null` and missing fields both mean "leave as is".
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoxEntry {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pokemon_id: Option<i64>,
}

impl BoxEntry {
    pub fn new(id: String, input: InsertBoxEntry) -> Self {
        Self {
            id,
            created_at: input.created_at,
            level: input.level,
            location: input.location,
            notes: input.notes,
            pokemon_id: input.pokemon_id,
        }
    }

    /// Shallow merge; `id` is never touched.
    pub fn apply(&mut self, update: UpdateBoxEntry) {
        if let Some(created_at) = update.created_at {
            self.created_at = created_at;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(pokemon_id) = update.pokemon_id {
            self.pokemon_id = pokemon_id;
        }
    }
}

impl InsertBoxEntry {
    pub fn validate(&self) -> Result<(), Vec<FieldIssue>> {
        let mut issues = Vec::new();
        check_created_at(&self.created_at, &mut issues);
        check_level(self.level, &mut issues);
        check_location(&self.location, &mut issues);
        check_pokemon_id(self.pokemon_id, &mut issues);
        finish(issues)
    }
}

impl UpdateBoxEntry {
    pub fn validate(&self) -> Result<(), Vec<FieldIssue>> {
        let mut issues = Vec::new();
        if let Some(created_at) = &self.created_at {
            check_created_at(created_at, &mut issues);
        }
        if let Some(level) = self.level {
            check_level(level, &mut issues);
        }
        if let Some(location) = &self.location {
            check_location(location, &mut issues);
        }
        if let Some(pokemon_id) = self.pokemon_id {
            check_pokemon_id(pokemon_id, &mut issues);
        }
        finish(issues)
    }
}

fn check_created_at(value: &str, issues: &mut Vec<FieldIssue>) {
    if OffsetDateTime::parse(value, &Rfc3339).is_err() {
        issues.push(FieldIssue::new("createdAt", "Invalid ISO 8601 date string"));
    }
}

fn check_level(value: i64, issues: &mut Vec<FieldIssue>) {
    if !(1..=100).contains(&value) {
        issues.push(FieldIssue::new("level", "must be between 1 and 100"));
    }
}

fn check_location(value: &str, issues: &mut Vec<FieldIssue>) {
    if value.is_empty() {
        issues.push(FieldIssue::new("location", "must not be empty"));
    }
}

fn check_pokemon_id(value: i64, issues: &mut Vec<FieldIssue>) {
    if value <= 0 {
        issues.push(FieldIssue::new("pokemonId", "must be a positive integer"));
    }
}

fn finish(issues: Vec<FieldIssue>) -> Result<(), Vec<FieldIssue>> {
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
