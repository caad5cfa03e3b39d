/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Wire and in-memory shapes of catalog data.

use serde::Deserialize;
use serde::Serialize;

/// Minimal list-row representation of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Entry name. Identity is case-insensitive upstream.
    pub name: String,
    /// Detail URL of the entry.
    pub url: String,
}

/// One page of the upstream list endpoint.
///
/// `next` / `previous` are opaque, fully-qualified cursor URLs; `None`
/// means there is no page in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEnvelope {
    /// Total number of entries in the listing (stable across pages).
    pub count: u64,
    /// Cursor URL of the following page.
    pub next: Option<String>,
    /// Cursor URL of the preceding page.
    pub previous: Option<String>,
    /// Items on this page, in upstream order.
    pub results: Vec<CatalogItem>,
}

impl CatalogEnvelope {
    /// The empty-result sentinel adopted when a lookup fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single-result wrapper, the shape the lookup proxy answers with.
    pub fn single(item: CatalogItem) -> Self {
        Self {
            count: 1,
            next: None,
            previous: None,
            results: vec![item],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A `{name}` reference inside a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// Extended single-entry view fetched in detail mode.
///
/// (De)serializes as the upstream shape
/// `{name, abilities: [{ability: {name}}], stats: [{stat: {name}}]}`
/// and keeps only the ordered names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DetailRecordWire", into = "DetailRecordWire")]
pub struct DetailRecord {
    pub name: String,
    pub abilities: Vec<NamedResource>,
    pub stats: Vec<NamedResource>,
}

impl DetailRecord {
    /// Ability names in upstream order.
    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.abilities.iter().map(|a| a.name.as_str())
    }

    /// Stat names in upstream order.
    pub fn stat_names(&self) -> impl Iterator<Item = &str> {
        self.stats.iter().map(|s| s.name.as_str())
    }
}

#[derive(Serialize, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Serialize, Deserialize)]
struct StatSlot {
    stat: NamedResource,
}

#[derive(Serialize, Deserialize)]
struct DetailRecordWire {
    name: String,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

impl From<DetailRecordWire> for DetailRecord {
    fn from(wire: DetailRecordWire) -> Self {
        Self {
            name: wire.name,
            abilities: wire.abilities.into_iter().map(|s| s.ability).collect(),
            stats: wire.stats.into_iter().map(|s| s.stat).collect(),
        }
    }
}

impl From<DetailRecord> for DetailRecordWire {
    fn from(record: DetailRecord) -> Self {
        Self {
            name: record.name,
            abilities: record
                .abilities
                .into_iter()
                .map(|ability| AbilitySlot { ability })
                .collect(),
            stats: record
                .stats
                .into_iter()
                .map(|stat| StatSlot { stat })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_parses_null_cursors() {
        let envelope: CatalogEnvelope = serde_json::from_value(json!({
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"},
            ],
        }))
        .unwrap();
        assert_eq!(envelope.count, 1302);
        assert!(envelope.previous.is_none());
        assert_eq!(envelope.results[1].name, "ivysaur");
    }

    #[test]
    fn detail_record_flattens_upstream_shape() {
        let record: DetailRecord = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "abilities": [
                {"ability": {"name": "overgrow", "url": "x"}, "is_hidden": false, "slot": 1},
                {"ability": {"name": "chlorophyll", "url": "y"}, "is_hidden": true, "slot": 3},
            ],
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "z"}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": "w"}},
            ],
        }))
        .unwrap();
        assert_eq!(record.name, "bulbasaur");
        assert_eq!(
            record.ability_names().collect::<Vec<_>>(),
            vec!["overgrow", "chlorophyll"]
        );
        assert_eq!(record.stat_names().collect::<Vec<_>>(), vec!["hp", "attack"]);
    }

    #[test]
    fn detail_record_serializes_back_to_upstream_shape() {
        let record = DetailRecord {
            name: "pikachu".into(),
            abilities: vec![NamedResource {
                name: "static".into(),
            }],
            stats: vec![NamedResource { name: "hp".into() }],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "pikachu",
                "abilities": [{"ability": {"name": "static"}}],
                "stats": [{"stat": {"name": "hp"}}],
            })
        );
        let parsed: DetailRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn detail_record_tolerates_missing_lists() {
        let record: DetailRecord = serde_json::from_value(json!({"name": "ditto"})).unwrap();
        assert!(record.abilities.is_empty());
        assert!(record.stats.is_empty());
    }

    #[test]
    fn single_wraps_one_item() {
        let envelope = CatalogEnvelope::single(CatalogItem {
            name: "pikachu".into(),
            url: "https://pokeapi.co/api/v2/pokemon/pikachu".into(),
        });
        assert_eq!(envelope.count, 1);
        assert!(envelope.next.is_none() && envelope.previous.is_none());
        assert_eq!(envelope.results.len(), 1);
        assert!(CatalogEnvelope::empty().is_empty());
    }
}
