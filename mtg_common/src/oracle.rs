//! Oracle catalog: canonical card attributes keyed by card name
//!
//! The catalog is a JSON document downloaded once and kept in a local cache
//! file. Keys carrying the handful of characters that implemented-card names
//! spell in ASCII are re-keyed through [`normalize_oracle`] on load.

use crate::error::{CommonError, Result};
use crate::text::{needs_rekey, normalize_oracle};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Catalog endpoint used when nothing else is configured
pub const DEFAULT_ORACLE_URL: &str = "https://mtgjson.com/api/v5/AtomicCards.json";

/// Canonical attributes of one card
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OracleRecord {
    #[serde(rename = "manaCost", default)]
    pub mana_cost: Option<String>,
    #[serde(rename = "type", default)]
    pub type_line: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub power: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub toughness: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl OracleRecord {
    /// "p/t" when both halves are present
    pub fn power_toughness(&self) -> Option<String> {
        match (&self.power, &self.toughness) {
            (Some(power), Some(toughness)) => Some(format!("{}/{}", power, toughness)),
            _ => None,
        }
    }
}

/// Some catalog releases encode loyalty and stats as numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepted document shapes: the legacy flat object keyed by card name, and
/// the wrapped `{"meta": .., "data": {name: [faces]}}` shape.
///
/// A top-level `data` key selects the wrapped shape before any record is
/// read, so a malformed record in either shape surfaces as a parse error.
enum CatalogDocument {
    Wrapped(HashMap<String, Vec<OracleRecord>>),
    Flat(HashMap<String, OracleRecord>),
}

impl CatalogDocument {
    fn parse(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        let wrapped = value.as_object_mut().and_then(|root| root.remove("data"));

        Ok(match wrapped {
            Some(data) => CatalogDocument::Wrapped(serde_json::from_value(data)?),
            None => CatalogDocument::Flat(serde_json::from_value(value)?),
        })
    }

    fn into_records(self) -> HashMap<String, OracleRecord> {
        match self {
            CatalogDocument::Flat(cards) => cards,
            CatalogDocument::Wrapped(data) => data
                .into_iter()
                .filter_map(|(name, faces)| faces.into_iter().next().map(|face| (name, face)))
                .collect(),
        }
    }
}

/// Oracle lookup by card name
#[derive(Debug, Clone, Default)]
pub struct OracleCatalog {
    cards: HashMap<String, OracleRecord>,
}

impl OracleCatalog {
    /// Build a catalog from name/record pairs, re-keying special names
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, OracleRecord)>,
    {
        let mut catalog = Self {
            cards: records.into_iter().collect(),
        };
        let rekeyed = catalog.rekey();
        log::info!("Normalizing {} names", rekeyed);
        catalog
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let document = CatalogDocument::parse(json)?;
        Ok(Self::from_records(document.into_records()))
    }

    /// Load the catalog from `cache_path`, downloading it from `url` first
    /// when the cache file does not exist.
    ///
    /// The raw response body is written to the cache before it is parsed.
    pub fn load_or_fetch(cache_path: &Path, url: &str) -> Result<Self> {
        log::info!("Initializing Oracle text");
        let json = if cache_path.exists() {
            log::debug!("Reading oracle cache: {}", cache_path.display());
            std::fs::read_to_string(cache_path)?
        } else {
            log::info!("Need to download oracle catalog from {}", url);
            let body = fetch_catalog(url)?;
            if let Some(parent) = cache_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(cache_path, &body)?;
            log::info!("Saved oracle catalog to {}", cache_path.display());
            body
        };

        let catalog = Self::from_json(&json)?;
        log::info!("Found Oracle text for {} cards", catalog.len());
        Ok(catalog)
    }

    /// Move every entry whose key contains a re-keyed character to its
    /// normalized key. Returns the number of moved entries.
    fn rekey(&mut self) -> usize {
        let keys: Vec<String> = self
            .cards
            .keys()
            .filter(|k| needs_rekey(k))
            .cloned()
            .collect();

        for key in &keys {
            if let Some(record) = self.cards.remove(key) {
                self.cards.insert(normalize_oracle(key), record);
            }
        }
        keys.len()
    }

    pub fn get(&self, name: &str) -> Option<&OracleRecord> {
        self.cards.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Look up a card, reporting absence as an error
    pub fn lookup(&self, name: &str) -> Result<&OracleRecord> {
        self.get(name)
            .ok_or_else(|| CommonError::NotInCatalog(name.to_string()))
    }

    /// Normalized rules text of a card
    pub fn oracle_text(&self, name: &str) -> Result<String> {
        let record = self.lookup(name)?;
        record
            .text
            .as_deref()
            .map(normalize_oracle)
            .ok_or_else(|| CommonError::MissingOracleText(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Download the catalog document body
fn fetch_catalog(url: &str) -> Result<String> {
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", "edition_tracking/1.0")
        .send()?;

    if !response.status().is_success() {
        return Err(CommonError::HttpStatus(response.status()));
    }

    Ok(response.text()?)
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod tests;
