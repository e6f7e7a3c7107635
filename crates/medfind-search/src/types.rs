//! Raw candidate shapes as they arrive from each source, before normalization.
//!
//! ## Table rows
//! CSV exports differ in header casing between dataset revisions
//! (`Name`/`Address` in the enriched pharmacy export, `name`/`address` in
//! others). Every field is kept as a string keyed by its header; the
//! normalizer decides which keys to read.
//!
//! ## Overpass elements
//! `node` elements carry `lat`/`lon` directly. `way` and `relation` elements
//! only carry a `center` when the query ends in `out center;`. Tags are always
//! string-valued; addresses live under `addr:*` keys.

use std::collections::HashMap;

use medfind_core::{AmenityKind, Coordinate};
use serde::Deserialize;

/// One record from a candidate source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCandidate {
    TableRow(TableRow),
    ApiNode(ApiNode),
}

impl RawCandidate {
    /// Short label for logs, e.g. `row "Apollo Pharmacy"` or `node/1234`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            RawCandidate::TableRow(row) => match row.first_of(&["name", "Name"]) {
                Some(name) => format!("row \"{name}\""),
                None => "row <unnamed>".to_string(),
            },
            RawCandidate::ApiNode(node) => {
                let kind = if node.element_type.is_empty() {
                    "element"
                } else {
                    node.element_type.as_str()
                };
                format!("{kind}/{}", node.id)
            }
        }
    }
}

/// A CSV record keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub fields: HashMap<String, String>,
}

impl TableRow {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// First field among `keys` that is present and not blank, trimmed.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        first_non_blank(keys.iter().filter_map(|k| self.get(k)))
    }
}

/// An element of an Overpass `[out:json]` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiNode {
    #[serde(rename = "type", default)]
    pub element_type: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<ApiCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl ApiNode {
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// First tag among `keys` that is present and not blank, trimmed.
    #[must_use]
    pub fn first_tag(&self, keys: &[&str]) -> Option<&str> {
        first_non_blank(keys.iter().filter_map(|k| self.tag(k)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ApiCenter {
    pub lat: f64,
    pub lon: f64,
}

/// What a candidate source is asked for on one search.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub origin: Coordinate,
    pub radius_km: f64,
    pub kinds: Vec<AmenityKind>,
}

fn first_non_blank<'a>(values: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    values.map(str::trim).find(|v| !v.is_empty())
}
