//! Catalog records and the admin API operations over them.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::api::ApiClient;

/// Rarity as the server reports it: an integer code or a string label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rarity {
    Code(i64),
    Label(String),
}

impl Rarity {
    /// Numeric form used by the edit payload. Labels that don't parse map to 0.
    pub fn code(&self) -> i64 {
        match self {
            Rarity::Code(code) => *code,
            Rarity::Label(label) => label.trim().parse().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Code(code) => write!(f, "{code}"),
            Rarity::Label(label) => f.write_str(label),
        }
    }
}

/// A catalog record. Created server-side by seeding; the id is stable
/// across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonMeta {
    pub id: i64,
    pub name: String,
    pub generation_id: i64,
    pub rarity: Rarity,
    /// A plain number or a structured stat block; the server decides.
    pub base_stat_total: Value,
}

/// Filters for the paged catalog list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub generation: Option<i64>,
    pub rarity: Option<i64>,
    pub search_term: String,
}

impl CatalogFilter {
    /// Builds the query string pairs for a page fetch.
    /// Empty filters are omitted entirely.
    pub fn to_query(&self, page_no: u32, page_size: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pageNo", page_no.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(generation) = self.generation {
            query.push(("generation", generation.to_string()));
        }
        if let Some(rarity) = self.rarity {
            query.push(("rarity", rarity.to_string()));
        }
        let term = self.search_term.trim();
        if !term.is_empty() {
            query.push(("searchTerm", term.to_string()));
        }
        query
    }
}

/// Payload for saving an edited row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub id: i64,
    pub rarity: i64,
    pub base_stats: Value,
    pub generation_id: i64,
}

/// Parses the scratch base-stat text against the shape of the original value.
///
/// If the original was numeric the input must parse to a finite number;
/// otherwise it must be valid JSON. Used by the edit flow before anything
/// touches the network.
pub fn parse_base_stats(original: &Value, input: &str) -> Result<Value> {
    let input = input.trim();
    if original.is_number() {
        if let Ok(int) = input.parse::<i64>() {
            return Ok(json!(int));
        }
        let float: f64 = input
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| anyhow!("Base stats must be a number"))?;
        Ok(json!(float))
    } else {
        serde_json::from_str(input).context("Base stats must be valid JSON")
    }
}

impl ApiClient {
    /// Fetches the "is the catalog seeded" flag.
    pub async fn is_seeded(&self) -> Result<bool> {
        self.get_json("/Admin/isPokemonsSeeded", &[]).await
    }

    /// Triggers the bulk seed.
    pub async fn seed(&self) -> Result<()> {
        self.post_empty("/Admin/SeedPokemons").await
    }

    /// Deletes every catalog record.
    pub async fn delete_all(&self) -> Result<()> {
        self.post_empty("/Admin/DeleteAllPokemons").await
    }

    /// Deletes everything, then seeds. The seed does not start until the
    /// delete has completed; a failure at either step surfaces as one error.
    pub async fn reseed(&self) -> Result<()> {
        self.delete_all().await?;
        self.seed().await
    }

    /// Fetches one page of catalog records.
    pub async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        page_no: u32,
        page_size: u32,
    ) -> Result<Vec<PokemonMeta>> {
        self.get_json("/Admin/pokemonMeta", &filter.to_query(page_no, page_size))
            .await
    }

    /// Saves an edited row.
    pub async fn save_row(&self, update: &RowUpdate) -> Result<()> {
        let body = serde_json::to_value(update).context("Failed to serialize row update")?;
        self.post("/Admin/pokemonMeta", &body).await
    }
}
