/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Next/previous navigation over cursor URLs.
//!
//! Invariants:
//! - **Lock-step**: the page index and the displayed envelope live in
//!   one [`Page`] value and are only ever replaced together, on a
//!   successful adoption. A failed fetch changes neither.
//! - **Cache first**: a cursor URL already in the [`PageCache`] is
//!   adopted synchronously, without a loading state and without a
//!   network call.
//! - **Last issued wins**: resolutions carrying a superseded
//!   [`RequestToken`] are cached but never displayed.

use crate::cache::PageCache;
use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::CatalogEnvelope;
use crate::model::CatalogItem;
use crate::token::RequestToken;
use crate::token::TokenIssuer;

/// A displayed page: its zero-based index and its envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Page {
    index: usize,
    envelope: CatalogEnvelope,
}

/// An outstanding page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    /// Cursor URL to fetch verbatim.
    pub url: String,
    /// Page index adopted if the fetch succeeds.
    pub target_index: usize,
}

/// Outcome of starting a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// No page in that direction; nothing changed.
    Ignored,
    /// Served from the page cache; already adopted.
    Settled,
    /// Must be fetched; complete with [`PaginationController::complete`].
    Fetch(PageRequest),
}

/// Orchestrates next/previous navigation for one listing.
#[derive(Debug)]
pub struct PaginationController {
    cache: PageCache,
    page: Page,
    page_count: usize,
    loading: bool,
    error: Option<String>,
    tokens: TokenIssuer,
}

impl PaginationController {
    /// Start at `initial` (page 0). The page cache is seeded with it
    /// under the canonical first-page URL so returning to the first
    /// page never re-fetches.
    pub fn new(initial: CatalogEnvelope, config: &CatalogConfig, mut cache: PageCache) -> Self {
        cache.put(config.canonical_first_page_url(), initial.clone());
        let page_size = config.page_size.max(1) as u64;
        let page_count = initial.count.div_ceil(page_size) as usize;
        Self {
            cache,
            page: Page {
                index: 0,
                envelope: initial,
            },
            page_count,
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

    /// Items of the displayed page.
    pub fn results(&self) -> &[CatalogItem] {
        &self.page.envelope.results
    }

    pub fn current(&self) -> &CatalogEnvelope {
        &self.page.envelope
    }

    /// Zero-based index of the displayed page.
    pub fn page_index(&self) -> usize {
        self.page.index
    }

    /// Total pages, from the initial envelope's `count`.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn has_next(&self) -> bool {
        self.page.envelope.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.page.envelope.previous.is_some()
    }

    /// True only while a genuine network fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn begin_next(&mut self) -> Navigation {
        let cursor = self.page.envelope.next.clone();
        self.begin(cursor, self.page.index + 1)
    }

    pub fn begin_previous(&mut self) -> Navigation {
        let cursor = self.page.envelope.previous.clone();
        self.begin(cursor, self.page.index.saturating_sub(1))
    }

    fn begin(&mut self, cursor: Option<String>, target_index: usize) -> Navigation {
        let Some(url) = cursor else {
            return Navigation::Ignored;
        };

        if let Some(envelope) = self.cache.get(url.as_str()) {
            tracing::debug!(%url, page = target_index, "page cache hit");
            self.page = Page {
                index: target_index,
                envelope: envelope.clone(),
            };
            // A cache hit supersedes anything still in flight.
            self.tokens.invalidate();
            self.loading = false;
            self.error = None;
            return Navigation::Settled;
        }

        tracing::debug!(%url, page = target_index, "page cache miss");
        self.loading = true;
        Navigation::Fetch(PageRequest {
            token: self.tokens.issue(),
            url,
            target_index,
        })
    }

    /// Apply the outcome of `request`. Returns true if displayed state
    /// changed.
    ///
    /// Successful envelopes are always cached under the request URL;
    /// they are only adopted if `request` is still the latest.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<CatalogEnvelope, CatalogError>,
    ) -> bool {
        if !self.tokens.issued_here(request.token) {
            tracing::debug!(token = ?request.token, "dropping page issued before restart");
            return false;
        }
        let current = self.tokens.is_current(request.token);
        match result {
            Ok(envelope) => {
                self.cache.put(request.url.clone(), envelope.clone());
                if !current {
                    tracing::debug!(url = %request.url, "discarding stale page");
                    return false;
                }
                self.page = Page {
                    index: request.target_index,
                    envelope,
                };
                self.error = None;
            }
            Err(err) => {
                if !current {
                    return false;
                }
                tracing::warn!(url = %request.url, error = %err, "failed to fetch page");
                self.error = Some(format!("Failed to fetch page: {}", err));
            }
        }
        self.loading = false;
        true
    }

    /// Fetch `request` and apply the outcome.
    pub async fn fetch(&mut self, client: &dyn CatalogClient, request: PageRequest) -> bool {
        let result = client.fetch_page(&request.url).await;
        self.complete(request, result)
    }

    /// Navigate forward, fetching if needed. A no-op on the last page.
    pub async fn go_to_next(&mut self, client: &dyn CatalogClient) {
        if let Navigation::Fetch(request) = self.begin_next() {
            self.fetch(client, request).await;
        }
    }

    /// Navigate backward, fetching if needed. A no-op on the first page.
    pub async fn go_to_previous(&mut self, client: &dyn CatalogClient) {
        if let Navigation::Fetch(request) = self.begin_previous() {
            self.fetch(client, request).await;
        }
    }
}
