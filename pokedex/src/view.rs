/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! View composition: one row set out of pagination and filter state.
//!
//! Reconciliation policy:
//! - The filter is *active* iff the filter input is non-empty and the
//!   list lookup result holds at least one item.
//! - Active filter: rows are the lookup's items and the pagination
//!   chrome is hidden.
//! - Otherwise rows are the current page and the chrome is shown.
//! - Selecting a row opens the detail overlay and looks the row up in
//!   detail mode. Closing the overlay only flips the open flag; the
//!   record stays adopted and cached, so re-opening is free.
//!
//! List lookups and detail lookups go through separate controllers
//! (and so separate caches). Opening a row's details never displaces
//! the filtered table underneath.

use crate::cache::PageCache;
use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::filter::FilterCache;
use crate::filter::FilterController;
use crate::filter::FilterResult;
use crate::filter::Lookup;
use crate::filter::LookupMode;
use crate::filter::LookupRequest;
use crate::filter::fetch_lookup;
use crate::model::CatalogEnvelope;
use crate::model::CatalogItem;
use crate::model::DetailRecord;
use crate::pagination::Navigation;
use crate::pagination::PageRequest;
use crate::pagination::PaginationController;

/// Network work requested by a user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    /// Page navigation.
    Page(PageRequest),
    /// Table filter (list mode).
    Filter(LookupRequest),
    /// Row details (detail mode).
    Inspect(LookupRequest),
}

/// A finished [`ViewRequest`], ready for [`CatalogView::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(PageRequest, Result<CatalogEnvelope, CatalogError>),
    Filter(LookupRequest, Result<FilterResult, CatalogError>),
    Inspect(LookupRequest, Result<FilterResult, CatalogError>),
}

/// Perform the network call behind `request`.
pub async fn execute(client: &dyn CatalogClient, request: ViewRequest) -> Resolution {
    match request {
        ViewRequest::Page(request) => {
            let result = client.fetch_page(&request.url).await;
            Resolution::Page(request, result)
        }
        ViewRequest::Filter(request) => {
            let result = fetch_lookup(client, &request.key).await;
            Resolution::Filter(request, result)
        }
        ViewRequest::Inspect(request) => {
            let result = fetch_lookup(client, &request.key).await;
            Resolution::Inspect(request, result)
        }
    }
}

/// Where the user is: page index and the name whose lookup replaces
/// the table, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub page_index: usize,
    pub active_filter: Option<String>,
}

/// Loading flags and last errors of each controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStatus<'a> {
    pub page_loading: bool,
    pub filter_loading: bool,
    pub detail_loading: bool,
    pub page_error: Option<&'a str>,
    pub filter_error: Option<&'a str>,
    pub detail_error: Option<&'a str>,
}

/// What the detail overlay should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayView<'a> {
    Closed,
    Loading { name: &'a str },
    Ready(&'a DetailRecord),
    Failed { name: &'a str, message: &'a str },
}

/// The session root: owns both controllers, their caches, the filter
/// input text and the overlay flag.
#[derive(Debug)]
pub struct CatalogView {
    config: CatalogConfig,
    pagination: PaginationController,
    filter: FilterController,
    inspector: FilterController,
    filter_input: String,
    overlay_open: bool,
    inspected: Option<String>,
}

impl CatalogView {
    /// A fresh session starting at `initial`, with empty caches.
    pub fn new(initial: CatalogEnvelope, config: CatalogConfig) -> Self {
        Self::with_caches(
            initial,
            config,
            PageCache::new(),
            FilterCache::new(),
            FilterCache::new(),
        )
    }

    /// A session over caller-provided caches.
    pub fn with_caches(
        initial: CatalogEnvelope,
        config: CatalogConfig,
        pages: PageCache,
        lookups: FilterCache,
        details: FilterCache,
    ) -> Self {
        Self {
            pagination: PaginationController::new(initial, &config, pages),
            filter: FilterController::new(lookups),
            inspector: FilterController::new(details),
            config,
            filter_input: String::new(),
            overlay_open: false,
            inspected: None,
        }
    }

    /// Start over from `initial`, dropping every cache and all state.
    /// Requests issued before the reset stay superseded.
    pub fn reset(&mut self, initial: CatalogEnvelope) {
        let mut fresh = Self::new(initial, self.config.clone());
        fresh.pagination.succeed(&self.pagination);
        fresh.filter.succeed(&self.filter);
        fresh.inspector.succeed(&self.inspector);
        *self = fresh;
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn filter(&self) -> &FilterController {
        &self.filter
    }

    pub fn inspector(&self) -> &FilterController {
        &self.inspector
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    /// True when a lookup result replaces the paginated table.
    pub fn filter_active(&self) -> bool {
        !self.filter_input.is_empty() && !self.filter.items().is_empty()
    }

    /// Rows to display.
    pub fn rows(&self) -> &[CatalogItem] {
        if self.filter_active() {
            self.filter.items()
        } else {
            self.pagination.results()
        }
    }

    /// Whether Previous/Next and the page indicator are shown.
    pub fn show_pagination(&self) -> bool {
        !self.filter_active()
    }

    /// "Page i of n", one-based.
    pub fn page_label(&self) -> String {
        format!(
            "Page {} of {}",
            self.pagination.page_index() + 1,
            self.pagination.page_count()
        )
    }

    pub fn navigation(&self) -> NavigationState {
        NavigationState {
            page_index: self.pagination.page_index(),
            active_filter: self
                .filter_active()
                .then(|| self.filter_input.clone()),
        }
    }

    pub fn status(&self) -> ViewStatus<'_> {
        ViewStatus {
            page_loading: self.pagination.loading(),
            filter_loading: self.filter.loading(),
            detail_loading: self.inspector.loading(),
            page_error: self.pagination.error(),
            filter_error: self.filter.error(),
            detail_error: self.inspector.error(),
        }
    }

    /// True while any fetch that affects the table is outstanding.
    pub fn table_loading(&self) -> bool {
        self.pagination.loading() || self.filter.loading()
    }

    /// Most relevant table error: the filter's, then pagination's.
    pub fn table_error(&self) -> Option<&str> {
        self.filter.error().or(self.pagination.error())
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn overlay(&self) -> OverlayView<'_> {
        let (true, Some(name)) = (self.overlay_open, self.inspected.as_deref()) else {
            return OverlayView::Closed;
        };
        if self.inspector.loading() {
            return OverlayView::Loading { name };
        }
        if let Some(record) = self.inspector.result().and_then(FilterResult::detail) {
            return OverlayView::Ready(record);
        }
        match self.inspector.error() {
            Some(message) => OverlayView::Failed { name, message },
            None => OverlayView::Loading { name },
        }
    }

    /// Replace the filter input text. Does not submit.
    pub fn edit_filter(&mut self, text: impl Into<String>) {
        self.filter_input = text.into();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_input.push(c);
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_input.pop();
    }

    /// Look up the current filter input in list mode.
    pub fn submit_filter(&mut self) -> Option<ViewRequest> {
        match self.filter.apply_filter(&self.filter_input, LookupMode::List) {
            Lookup::Fetch(request) => Some(ViewRequest::Filter(request)),
            Lookup::Cleared | Lookup::Settled => None,
        }
    }

    /// Drop the filter result and the input text. The cache is kept.
    pub fn clear_filter(&mut self) {
        self.filter.clear_filter();
        self.filter_input.clear();
    }

    pub fn next_page(&mut self) -> Option<ViewRequest> {
        Self::page_request(self.pagination.begin_next())
    }

    pub fn previous_page(&mut self) -> Option<ViewRequest> {
        Self::page_request(self.pagination.begin_previous())
    }

    fn page_request(navigation: Navigation) -> Option<ViewRequest> {
        match navigation {
            Navigation::Fetch(request) => Some(ViewRequest::Page(request)),
            Navigation::Ignored | Navigation::Settled => None,
        }
    }

    /// Open the detail overlay for the row at `index`.
    pub fn select_row(&mut self, index: usize) -> Option<ViewRequest> {
        let name = self.rows().get(index)?.name.clone();
        self.overlay_open = true;
        let lookup = self.inspector.apply_filter(&name, LookupMode::Detail);
        self.inspected = Some(name);
        match lookup {
            Lookup::Fetch(request) => Some(ViewRequest::Inspect(request)),
            Lookup::Cleared | Lookup::Settled => None,
        }
    }

    /// Hide the overlay. The inspected record stays adopted.
    pub fn close_overlay(&mut self) {
        self.overlay_open = false;
    }

    /// Feed a finished request back. Returns true if displayed state
    /// changed.
    pub fn resolve(&mut self, resolution: Resolution) -> bool {
        match resolution {
            Resolution::Page(request, result) => self.pagination.complete(request, result),
            Resolution::Filter(request, result) => self.filter.complete(request, result),
            Resolution::Inspect(request, result) => self.inspector.complete(request, result),
        }
    }

    /// Execute `request` inline and resolve it.
    pub async fn dispatch(
        &mut self,
        client: &dyn CatalogClient,
        request: Option<ViewRequest>,
    ) -> bool {
        match request {
            Some(request) => {
                let resolution = execute(client, request).await;
                self.resolve(resolution)
            }
            None => false,
        }
    }
}
