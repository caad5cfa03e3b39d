/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! On-demand single-name lookup.
//!
//! A lookup runs in one of two modes: [`LookupMode::List`] answers a
//! one-item list envelope (rendered as a table row), and
//! [`LookupMode::Detail`] answers a [`DetailRecord`] (rendered in the
//! detail overlay). Results are cached per `(name, mode)` for the
//! lifetime of the owning view; clearing the filter keeps the cache.

use crate::cache::SessionCache;
use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::model::CatalogEnvelope;
use crate::model::CatalogItem;
use crate::model::DetailRecord;
use crate::token::RequestToken;
use crate::token::TokenIssuer;

/// Which shape a lookup resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupMode {
    List,
    Detail,
}

/// Filter cache key: the name exactly as typed, plus the mode.
///
/// Names are not normalized, so `Pikachu` and `pikachu` are distinct
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub name: String,
    pub mode: LookupMode,
}

impl FilterKey {
    pub fn new(name: impl Into<String>, mode: LookupMode) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

/// A resolved lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    List(CatalogEnvelope),
    Detail(DetailRecord),
}

impl FilterResult {
    /// Table rows contributed by this result. Detail records
    /// contribute none.
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            FilterResult::List(envelope) => envelope.results.as_slice(),
            FilterResult::Detail(_) => &[],
        }
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        match self {
            FilterResult::Detail(record) => Some(record),
            FilterResult::List(_) => None,
        }
    }
}

/// Resolved lookups keyed by `(name, mode)`.
pub type FilterCache = SessionCache<FilterKey, FilterResult>;

/// An outstanding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub token: RequestToken,
    pub key: FilterKey,
}

/// Outcome of applying a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Empty name; the result was cleared.
    Cleared,
    /// Served from the filter cache; already adopted.
    Settled,
    /// Must be fetched; complete with [`FilterController::complete`].
    Fetch(LookupRequest),
}

/// Issue the network call for `key` in its mode.
pub async fn fetch_lookup(
    client: &dyn CatalogClient,
    key: &FilterKey,
) -> Result<FilterResult, CatalogError> {
    match key.mode {
        LookupMode::List => client.lookup(&key.name).await.map(FilterResult::List),
        LookupMode::Detail => client.fetch_detail(&key.name).await.map(FilterResult::Detail),
    }
}

/// Orchestrates single-name lookups and holds the adopted result.
#[derive(Debug)]
pub struct FilterController {
    cache: FilterCache,
    result: Option<FilterResult>,
    loading: bool,
    error: Option<String>,
    tokens: TokenIssuer,
}

impl FilterController {
    pub fn new(cache: FilterCache) -> Self {
        Self {
            cache,
            result: None,
            loading: false,
            error: None,
            tokens: TokenIssuer::new(),
        }
    }

    /// Continue token issuance from `previous`, so nothing still in
    /// flight for it can be adopted here.
    pub(crate) fn succeed(&mut self, previous: &Self) {
        self.tokens = previous.tokens.successor();
    }

    /// The adopted result, if any.
    pub fn result(&self) -> Option<&FilterResult> {
        self.result.as_ref()
    }

    /// Rows of the adopted result (empty if none).
    pub fn items(&self) -> &[CatalogItem] {
        match &self.result {
            Some(result) => result.items(),
            None => &[],
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cache(&self) -> &FilterCache {
        &self.cache
    }

    /// Start a lookup of `name` in `mode`.
    ///
    /// An empty name clears the result. A cached name is adopted
    /// synchronously. Anything else enters the loading state and
    /// returns the request to fetch.
    pub fn apply_filter(&mut self, name: &str, mode: LookupMode) -> Lookup {
        self.error = None;

        if name.is_empty() {
            self.tokens.invalidate();
            self.result = None;
            self.loading = false;
            return Lookup::Cleared;
        }

        let key = FilterKey::new(name, mode);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(name, ?mode, "filter cache hit");
            self.result = Some(cached.clone());
            self.tokens.invalidate();
            self.loading = false;
            return Lookup::Settled;
        }

        tracing::debug!(name, ?mode, "filter cache miss");
        self.loading = true;
        Lookup::Fetch(LookupRequest {
            token: self.tokens.issue(),
            key,
        })
    }

    /// Apply the outcome of `request`. Returns true if displayed state
    /// changed.
    ///
    /// On failure the result becomes an explicit empty value rather
    /// than keeping stale data: the empty list envelope in list mode,
    /// no record in detail mode.
    pub fn complete(
        &mut self,
        request: LookupRequest,
        result: Result<FilterResult, CatalogError>,
    ) -> bool {
        if !self.tokens.issued_here(request.token) {
            tracing::debug!(token = ?request.token, "dropping lookup issued before restart");
            return false;
        }
        let current = self.tokens.is_current(request.token);
        match result {
            Ok(value) => {
                self.cache.put(request.key, value.clone());
                if !current {
                    return false;
                }
                self.result = Some(value);
            }
            Err(err) => {
                if !current {
                    return false;
                }
                tracing::warn!(name = %request.key.name, error = %err, "lookup failed");
                self.error = Some(err.to_string());
                self.result = match request.key.mode {
                    LookupMode::List => Some(FilterResult::List(CatalogEnvelope::empty())),
                    LookupMode::Detail => None,
                };
            }
        }
        self.loading = false;
        true
    }

    /// Fetch `request` and apply the outcome.
    pub async fn fetch(&mut self, client: &dyn CatalogClient, request: LookupRequest) -> bool {
        let result = fetch_lookup(client, &request.key).await;
        self.complete(request, result)
    }

    /// Look up `name` in `mode`, fetching if needed.
    pub async fn apply(&mut self, client: &dyn CatalogClient, name: &str, mode: LookupMode) {
        if let Lookup::Fetch(request) = self.apply_filter(name, mode) {
            self.fetch(client, request).await;
        }
    }

    /// Drop the adopted result and error. The cache is kept, and any
    /// lookup still in flight will not be adopted.
    pub fn clear_filter(&mut self) {
        self.tokens.invalidate();
        self.result = None;
        self.error = None;
        self.loading = false;
    }
}
