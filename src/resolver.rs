//! Pokémon lookup resolution
//!
//! Turns a [`Query`] into the list of records to display by trying, in strict
//! order, and stopping at the first strategy that applies:
//!
//! ```text
//! Query::Category(c) ──► fetch_by_category(c) ──► fan-out (≤20) ──► records
//!                              │ item failure
//!                              └─► []  (no further fallback)
//!
//! Query::Text(t) ──► catalogue matches (≤12)
//!                      │ some ──► fan-out ──► records (possibly empty)
//!                      │ none
//!                      ▼
//!                    fetch_by_key(t) ──► [record]
//!                      │ item failure
//!                      ▼
//!                    8 random ids in [1,150] ──► records
//!
//! Query::Empty ──► 12 random ids in [1,150] ──► records
//! ```
//!
//! Fan-outs wait for every call to settle and keep the successes in request
//! order. Per-item failures are dropped; only orchestration failures surface.

use crate::catalogue::Catalogue;
use crate::error::{LookupError, LookupResult};
use crate::lookup::{LookupService, Record};
use futures::future::join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Maximum members fetched for a category
pub const CATEGORY_LIMIT: usize = 20;
/// Maximum catalogue matches fetched for a text query
pub const MATCH_LIMIT: usize = 12;
/// Maximum suggestions shown while typing
pub const SUGGESTION_LIMIT: usize = 8;
/// Random samples after a failed text query
pub const TEXT_FALLBACK_SAMPLES: usize = 8;
/// Random samples for an empty query
pub const EMPTY_QUERY_SAMPLES: usize = 12;
/// Random ids are drawn from `1..=RANDOM_ID_MAX` (first generation)
pub const RANDOM_ID_MAX: u32 = 150;

/// What the user is currently asking for
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Query {
    #[default]
    Empty,
    Text(String),
    Category(String),
}

impl Query {
    /// Build a text query; blank text is the empty query
    pub fn text(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Query::Empty
        } else {
            Query::Text(trimmed.to_string())
        }
    }

    /// Build a category query; a blank category is the empty query
    pub fn category(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Query::Empty
        } else {
            Query::Category(trimmed.to_lowercase())
        }
    }
}

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Category,
    CatalogueMatch,
    DirectKey,
    RandomFallback,
    RandomSample,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::CatalogueMatch => write!(f, "catalogue-match"),
            Self::DirectKey => write!(f, "direct-key"),
            Self::RandomFallback => write!(f, "random-fallback"),
            Self::RandomSample => write!(f, "random-sample"),
        }
    }
}

/// Records plus the strategy that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    pub strategy: Strategy,
    /// Number of `fetch_by_key` calls issued by the winning strategy
    pub attempted: usize,
    pub records: Vec<Record>,
}

/// Resolves queries against a lookup service and a static catalogue
pub struct Resolver<L: LookupService + ?Sized> {
    lookup: Arc<L>,
    catalogue: Arc<Catalogue>,
}

impl<L: LookupService + ?Sized> Clone for Resolver<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            catalogue: Arc::clone(&self.catalogue),
        }
    }
}

impl<L: LookupService + ?Sized> Resolver<L> {
    pub fn new(lookup: Arc<L>, catalogue: Arc<Catalogue>) -> Self {
        Self { lookup, catalogue }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Resolve a query to the records to display
    pub async fn resolve(&self, query: &Query) -> LookupResult<Vec<Record>> {
        self.resolve_detailed(query).await.map(|r| r.records)
    }

    /// Resolve a query and report which strategy won
    pub async fn resolve_detailed(&self, query: &Query) -> LookupResult<Resolved> {
        let resolved = match query {
            Query::Category(category) => self.by_category(category).await?,
            Query::Text(text) => {
                let needle = text.trim().to_lowercase();
                if needle.is_empty() {
                    self.random(Strategy::RandomSample, EMPTY_QUERY_SAMPLES).await?
                } else {
                    self.by_text(&needle).await?
                }
            }
            Query::Empty => self.random(Strategy::RandomSample, EMPTY_QUERY_SAMPLES).await?,
        };

        tracing::info!(
            strategy = %resolved.strategy,
            attempted = resolved.attempted,
            kept = resolved.records.len(),
            "resolved pokemon query"
        );
        Ok(resolved)
    }

    /// Synchronous suggestions for the text box; no network
    pub fn suggest(&self, raw: &str) -> Vec<String> {
        suggest(&self.catalogue, raw)
    }

    async fn by_category(&self, category: &str) -> LookupResult<Resolved> {
        let mut keys = match self.lookup.fetch_by_category(category).await {
            Ok(keys) => keys,
            Err(e) if e.is_item_failure() => {
                tracing::warn!(category, error = %e, "category lookup failed");
                return Ok(Resolved {
                    strategy: Strategy::Category,
                    attempted: 0,
                    records: vec![],
                });
            }
            Err(e) => return Err(e),
        };
        keys.truncate(CATEGORY_LIMIT);

        let attempted = keys.len();
        let records = self.fan_out(keys).await?;
        Ok(Resolved {
            strategy: Strategy::Category,
            attempted,
            records,
        })
    }

    async fn by_text(&self, needle: &str) -> LookupResult<Resolved> {
        if self.catalogue.is_empty() {
            return Err(LookupError::Orchestration(
                "name catalogue is unavailable".to_string(),
            ));
        }

        let matches: Vec<String> = self
            .catalogue
            .loose_matches(needle, MATCH_LIMIT)
            .into_iter()
            .map(str::to_string)
            .collect();

        // Once the catalogue has matches, their outcome is final even if
        // every fetch failed.
        if !matches.is_empty() {
            let attempted = matches.len();
            let records = self.fan_out(matches).await?;
            return Ok(Resolved {
                strategy: Strategy::CatalogueMatch,
                attempted,
                records,
            });
        }

        match self.lookup.fetch_by_key(needle).await {
            Ok(record) => Ok(Resolved {
                strategy: Strategy::DirectKey,
                attempted: 1,
                records: vec![record],
            }),
            Err(e) if e.is_item_failure() => {
                tracing::debug!(key = needle, error = %e, "direct lookup failed, sampling");
                self.random(Strategy::RandomFallback, TEXT_FALLBACK_SAMPLES)
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn random(&self, strategy: Strategy, count: usize) -> LookupResult<Resolved> {
        let ids = sample_ids(&mut rand::thread_rng(), count, RANDOM_ID_MAX)?;
        let keys: Vec<String> = ids.iter().map(u32::to_string).collect();
        let attempted = keys.len();
        let records = self.fan_out(keys).await?;
        Ok(Resolved {
            strategy,
            attempted,
            records,
        })
    }

    /// Fetch every key concurrently; keep successes in request order.
    /// Item failures are dropped; the first orchestration failure is returned.
    async fn fan_out(&self, keys: Vec<String>) -> LookupResult<Vec<Record>> {
        let lookup = &self.lookup;
        let results = join_all(keys.iter().map(|key| async move {
            let result = lookup.fetch_by_key(key).await;
            (key, result)
        }))
        .await;

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(results.len());
        for (key, result) in results {
            match result {
                Ok(record) => {
                    if seen.insert(record.id) {
                        records.push(record);
                    }
                }
                Err(e) if e.is_item_failure() => {
                    tracing::debug!(key = key.as_str(), error = %e, "dropping failed lookup");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }
}

/// Case-insensitive substring suggestions, capped at [`SUGGESTION_LIMIT`]
pub fn suggest(catalogue: &Catalogue, raw: &str) -> Vec<String> {
    let text = raw.trim();
    if text.is_empty() {
        return vec![];
    }
    catalogue
        .containing(text, SUGGESTION_LIMIT)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Draw `count` distinct ids from `1..=max`
pub fn sample_ids<R: Rng + ?Sized>(rng: &mut R, count: usize, max: u32) -> LookupResult<Vec<u32>> {
    let range = max as usize;
    if count > range {
        return Err(LookupError::Orchestration(format!(
            "cannot sample {} distinct ids from 1..={}",
            count, max
        )));
    }
    Ok(rand::seq::index::sample(rng, range, count)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect())
}
