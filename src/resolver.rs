//! Title resolution module
//!
//! Maps a free-text query to zero, one, or many catalog entries. Exact
//! identifiers resolve with a direct lookup; human-typed titles fall back
//! to a case-insensitive scan and then a substring scan. Catalogs are
//! small static reference data, so the O(n) scans are acceptable.

use serde::Serialize;
use serde_json::{Map, Value};

/// One catalog entry paired with the key it was stored under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub key: String,
    pub movie: Value,
}

/// Outcome of resolving a query against the catalog.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// Exactly one entry matched.
    Found(MatchEntry),
    /// Several entries matched by substring; returned as a list, not an error.
    Ambiguous(Vec<MatchEntry>),
    /// Nothing matched.
    NotFound,
}

/// Resolve a free-text title query against the catalog.
///
/// Matching tiers, first hit wins:
/// 1. the normalized query is itself a catalog key
/// 2. some entry's key or `title` field equals the query case-insensitively
/// 3. substring match on lowercased key or `title`; a lone hit resolves,
///    several hits come back as [`Resolution::Ambiguous`]
///
/// The caller must reject empty queries before calling this.
pub fn resolve(catalog: &Map<String, Value>, query: &str) -> Resolution {
    let q = query.trim().to_lowercase();

    // Direct key hit. Catalog keys are expected to be lowercase already;
    // mixed-case keys are only reachable through the scans below.
    if let Some(movie) = catalog.get(&q) {
        return Resolution::Found(MatchEntry {
            key: q,
            movie: movie.clone(),
        });
    }

    for (key, movie) in catalog {
        if key.to_lowercase() == q || title_of(movie).is_some_and(|t| t.to_lowercase() == q) {
            return Resolution::Found(MatchEntry {
                key: key.clone(),
                movie: movie.clone(),
            });
        }
    }

    let mut partials: Vec<MatchEntry> = catalog
        .iter()
        .filter(|(key, movie)| {
            key.to_lowercase().contains(&q)
                || title_of(movie).is_some_and(|t| t.to_lowercase().contains(&q))
        })
        .map(|(key, movie)| MatchEntry {
            key: key.clone(),
            movie: movie.clone(),
        })
        .collect();

    match partials.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Found(partials.remove(0)),
        _ => Resolution::Ambiguous(partials),
    }
}

fn title_of(movie: &Value) -> Option<&str> {
    movie.get("title").and_then(Value::as_str)
}
