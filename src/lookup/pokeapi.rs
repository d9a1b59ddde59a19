//! PokéAPI client
//!
//! HTTP client for `/pokemon/{key}` and `/type/{name}`.

use super::{LookupService, Record};
use crate::config::ClientConfig;
use crate::error::{LookupError, LookupResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    slot: u32,
    ability: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    sprites: Sprites,
}

impl From<PokemonResponse> for Record {
    fn from(mut raw: PokemonResponse) -> Self {
        raw.types.sort_by_key(|t| t.slot);
        raw.abilities.sort_by_key(|a| a.slot);
        Record {
            id: raw.id,
            name: raw.name,
            types: raw.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: raw.abilities.into_iter().map(|a| a.ability.name).collect(),
            height: raw.height,
            weight: raw.weight,
            sprite_url: raw.sprites.front_default,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeResponse {
    #[serde(default)]
    pokemon: Vec<TypeMember>,
}

// =============================================================================
// Client
// =============================================================================

pub struct PokeApiClient {
    http: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(config: &ClientConfig) -> LookupResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::Orchestration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.pokeapi_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> LookupResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "pokeapi request");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Network(format!(
                "PokéAPI error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response.json().await.map_err(LookupError::from)
    }
}

#[async_trait]
impl LookupService for PokeApiClient {
    async fn fetch_by_key(&self, key: &str) -> LookupResult<Record> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(LookupError::NotFound("empty key".to_string()));
        }
        let raw: PokemonResponse = self.get(&format!("/pokemon/{}", encode_segment(&key))).await?;
        Ok(raw.into())
    }

    async fn fetch_by_category(&self, category: &str) -> LookupResult<Vec<String>> {
        let category = normalize_key(category);
        if category.is_empty() {
            return Err(LookupError::NotFound("empty category".to_string()));
        }
        let raw: TypeResponse = self.get(&format!("/type/{}", encode_segment(&category))).await?;
        Ok(raw.pokemon.into_iter().map(|m| m.pokemon.name).collect())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Percent-encode a single path segment
fn encode_segment(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DITTO: &str = r#"{
        "id": 132,
        "name": "ditto",
        "height": 3,
        "weight": 40,
        "abilities": [
            {"ability": {"name": "imposter", "url": "https://pokeapi.co/api/v2/ability/150/"}, "is_hidden": true, "slot": 3},
            {"ability": {"name": "limber", "url": "https://pokeapi.co/api/v2/ability/7/"}, "is_hidden": false, "slot": 1}
        ],
        "types": [
            {"slot": 1, "type": {"name": "normal", "url": "https://pokeapi.co/api/v2/type/1/"}}
        ],
        "sprites": {"front_default": "https://example.invalid/132.png", "back_default": null}
    }"#;

    #[test]
    fn test_pokemon_response_into_record() {
        let raw: PokemonResponse = serde_json::from_str(DITTO).unwrap();
        let record = Record::from(raw);
        assert_eq!(record.id, 132);
        assert_eq!(record.name, "ditto");
        assert_eq!(record.types, vec!["normal"]);
        // Sorted by slot, not by payload order
        assert_eq!(record.abilities, vec!["limber", "imposter"]);
        assert_eq!(record.sprite_url.as_deref(), Some("https://example.invalid/132.png"));
        assert!((record.height_m() - 0.3).abs() < f64::EPSILON);
        assert!((record.weight_kg() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_sprites_tolerated() {
        let raw: PokemonResponse =
            serde_json::from_str(r#"{"id": 1, "name": "bulbasaur", "height": 7, "weight": 69}"#)
                .unwrap();
        let record = Record::from(raw);
        assert!(record.types.is_empty());
        assert!(record.sprite_url.is_none());
    }

    #[test]
    fn test_type_response_members_in_order() {
        let raw: TypeResponse = serde_json::from_str(
            r#"{"name": "fire", "pokemon": [
                {"pokemon": {"name": "charmander", "url": "u"}, "slot": 1},
                {"pokemon": {"name": "vulpix", "url": "u"}, "slot": 1}
            ]}"#,
        )
        .unwrap();
        let names: Vec<String> = raw.pokemon.into_iter().map(|m| m.pokemon.name).collect();
        assert_eq!(names, vec!["charmander", "vulpix"]);
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("mr-mime"), "mr-mime");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("flabébé"), "flab%C3%A9b%C3%A9");
    }

    #[test]
    fn test_base_url_trimmed() {
        let config = ClientConfig::default().with_pokeapi_url("http://localhost:1234/");
        let client = PokeApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
