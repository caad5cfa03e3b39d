/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! In-memory catalog for tests.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::CatalogClient;
use crate::config::PAGE_SIZE;
use crate::error::CatalogError;
use crate::model::CatalogEnvelope;
use crate::model::CatalogItem;
use crate::model::DetailRecord;
use crate::model::NamedResource;

/// Base URL used by the helpers below.
pub const FAKE_BASE_URL: &str = "https://pokeapi.test/api/v2/pokemon";

/// A request observed by [`FakeCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Page(String),
    Lookup(String),
    Detail(String),
}

/// [`CatalogClient`] answering from in-memory pages and detail
/// records, recording every call it receives.
///
/// Unknown page URLs answer `HTTP 404`; unknown names answer
/// [`CatalogError::NotFound`]. URLs or names marked with
/// [`FakeCatalog::fail`] answer `HTTP 500`.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<HashMap<String, CatalogEnvelope>>,
    details: Mutex<HashMap<String, DetailRecord>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    /// URL served by `initial_page`.
    initial_url: Mutex<Option<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding `names` split into pages of `page_size` under
    /// [`FAKE_BASE_URL`], with a detail record for every name.
    pub fn with_listing(names: &[&str], page_size: usize) -> Self {
        let catalog = Self::new();
        let mut offset = 0;
        loop {
            let page = listing_page(names, offset, page_size);
            catalog.insert_page(&page_url(offset, page_size), page.clone());
            if offset == 0 {
                let url = first_page_request_url(page_size);
                catalog.insert_page(&url, page);
                *catalog.initial_url.lock().unwrap() = Some(url);
            }
            offset += page_size;
            if offset >= names.len() {
                break;
            }
        }
        for name in names {
            catalog.insert_detail(detail_record(name));
        }
        catalog
    }

    pub fn insert_page(&self, url: &str, envelope: CatalogEnvelope) {
        self.pages.lock().unwrap().insert(url.to_string(), envelope);
    }

    pub fn insert_detail(&self, record: DetailRecord) {
        self.details
            .lock()
            .unwrap()
            .insert(record.name.to_lowercase(), record);
    }

    /// Make every request for `url_or_name` fail with `HTTP 500`.
    pub fn fail(&self, url_or_name: &str) {
        self.failing.lock().unwrap().insert(url_or_name.to_string());
    }

    /// Let requests for `url_or_name` succeed again.
    pub fn heal(&self, url_or_name: &str) {
        self.failing.lock().unwrap().remove(url_or_name);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self, key: &str) -> Result<(), CatalogError> {
        if self.failing.lock().unwrap().contains(key) {
            Err(CatalogError::Status { status: 500 })
        } else {
            Ok(())
        }
    }

    fn find_detail(&self, name: &str) -> Result<DetailRecord, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::missing_name());
        }
        self.check_failing(name)?;
        self.details
            .lock()
            .unwrap()
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_page(&self, url: &str) -> Result<CatalogEnvelope, CatalogError> {
        self.record(Call::Page(url.to_string()));
        self.check_failing(url)?;
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(CatalogError::Status { status: 404 })
    }

    async fn lookup(&self, name: &str) -> Result<CatalogEnvelope, CatalogError> {
        self.record(Call::Lookup(name.to_string()));
        let record = self.find_detail(name)?;
        Ok(CatalogEnvelope::single(item(&record.name)))
    }

    async fn fetch_detail(&self, name: &str) -> Result<DetailRecord, CatalogError> {
        self.record(Call::Detail(name.to_string()));
        self.find_detail(name)
    }

    async fn initial_page(&self) -> Result<CatalogEnvelope, CatalogError> {
        let url = self
            .initial_url
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| first_page_request_url(PAGE_SIZE));
        self.fetch_page(&url).await
    }
}

/// Cursor-form URL of the page at `offset` (`?offset=M&limit=N`).
pub fn page_url(offset: usize, limit: usize) -> String {
    format!("{}?offset={}&limit={}", FAKE_BASE_URL, offset, limit)
}

/// Request-form URL of the first page (`?limit=N&offset=0`).
pub fn first_page_request_url(limit: usize) -> String {
    format!("{}?limit={}&offset=0", FAKE_BASE_URL, limit)
}

pub fn item(name: &str) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        url: format!("{}/{}", FAKE_BASE_URL, name),
    }
}

/// The page of `names` starting at `offset`, with cursors pointing at
/// its neighbours.
pub fn listing_page(names: &[&str], offset: usize, limit: usize) -> CatalogEnvelope {
    let end = (offset + limit).min(names.len());
    let start = offset.min(end);
    CatalogEnvelope {
        count: names.len() as u64,
        next: (end < names.len()).then(|| page_url(offset + limit, limit)),
        previous: (offset > 0).then(|| page_url(offset.saturating_sub(limit), limit)),
        results: names[start..end].iter().map(|n| item(n)).collect(),
    }
}

/// A detail record with two abilities and two stats derived from
/// `name`.
pub fn detail_record(name: &str) -> DetailRecord {
    let named = |s: String| NamedResource { name: s };
    DetailRecord {
        name: name.to_string(),
        abilities: vec![
            named(format!("{}-ability-1", name)),
            named(format!("{}-ability-2", name)),
        ],
        stats: vec![named("hp".to_string()), named("speed".to_string())],
    }
}

/// `count` generated names (`mon-0000`, `mon-0001`, ...).
pub fn generated_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("mon-{:04}", i)).collect()
}
