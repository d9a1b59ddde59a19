//! Pokémon lookup service
//!
//! The resolver only ever talks to [`LookupService`]; [`PokeApiClient`] is the
//! production implementation backed by the public PokéAPI.

pub mod pokeapi;

use crate::error::LookupResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use pokeapi::PokeApiClient;

/// A fetched Pokémon
///
/// `height` and `weight` are kept in source units (decimetres, hectograms);
/// use [`Record::height_m`] / [`Record::weight_kg`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    /// Type names in slot order
    pub types: Vec<String>,
    /// Ability names in slot order
    pub abilities: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub sprite_url: Option<String>,
}

impl Record {
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// External capabilities the resolver depends on
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Fetch one record by name or numeric id.
    ///
    /// Unknown keys fail with `LookupError::NotFound`.
    async fn fetch_by_key(&self, key: &str) -> LookupResult<Record>;

    /// Member keys of a type, in the order the service lists them.
    async fn fetch_by_category(&self, category: &str) -> LookupResult<Vec<String>>;
}
