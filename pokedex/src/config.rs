/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Catalog endpoints and paging constants.
//!
//! Defaults target the public PokeAPI. Each endpoint can be overridden
//! from the environment (see [`CatalogConfig::from_env`]); the TUI's
//! command-line flags take precedence over both.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

/// Number of entries per list page.
pub const PAGE_SIZE: usize = 20;

/// Upstream list endpoint. Detail records live at `<base>/<name>`.
pub const POKE_API_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// How long the initial page stays fresh before it is re-fetched.
pub const DEFAULT_CACHE_REVALIDATION: Duration = Duration::from_secs(60);

/// Per-request timeout for all upstream calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LIST_URL_ENV: &str = "POKEDEX_LIST_URL";
const DETAIL_URL_ENV: &str = "POKEDEX_DETAIL_URL";
const LOOKUP_URL_ENV: &str = "POKEDEX_LOOKUP_URL";
const PAGE_SIZE_ENV: &str = "POKEDEX_PAGE_SIZE";

/// Endpoint and paging configuration for a catalog session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Paginated list endpoint (`GET <list_url>?limit=N&offset=M`).
    pub list_url: String,
    /// Base of the per-name detail endpoint (`GET <detail_url>/<name>`).
    pub detail_url: String,
    /// Optional lookup proxy (`GET <lookup_url>?name=<name>`). When
    /// unset, lookups are translated in-process from the detail
    /// endpoint.
    pub lookup_url: Option<String>,
    /// Entries per page.
    pub page_size: usize,
    /// Freshness window of the initial page.
    pub revalidate: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_url: POKE_API_BASE_URL.to_string(),
            detail_url: POKE_API_BASE_URL.to_string(),
            lookup_url: None,
            page_size: PAGE_SIZE,
            revalidate: DEFAULT_CACHE_REVALIDATION,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `POKEDEX_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `var` yields for each
    /// `POKEDEX_*` key. Empty values are ignored.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(url) = var(LIST_URL_ENV) {
            config.list_url = url;
        }
        if let Some(url) = var(DETAIL_URL_ENV) {
            config.detail_url = url;
        }
        if let Some(url) = var(LOOKUP_URL_ENV) {
            config.lookup_url = Some(url);
        }
        if let Some(raw) = var(PAGE_SIZE_ENV) {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {}; keeping page size {}",
                    PAGE_SIZE_ENV,
                    config.page_size
                ),
            }
        }
        config
    }

    /// URL of a list page in request form (`?limit=N&offset=M`).
    pub fn list_page_url(&self, limit: usize, offset: usize) -> String {
        format!("{}?limit={}&offset={}", self.list_url, limit, offset)
    }

    /// Page cache key of the first page (`?offset=0&limit=N`), the form
    /// in which upstream `previous` cursors point back to it.
    pub fn canonical_first_page_url(&self) -> String {
        format!("{}?offset=0&limit={}", self.list_url, self.page_size)
    }

    /// Detail URL for `name`. Upstream names are lower-case.
    pub fn detail_url_for(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.detail_url.trim_end_matches('/'),
            urlencoding::encode(&name.to_lowercase())
        )
    }

    /// Proxy lookup URL for `name`, if a proxy is configured. The
    /// name is passed through as typed.
    pub fn lookup_url_for(&self, name: &str) -> Option<String> {
        self.lookup_url
            .as_ref()
            .map(|base| format!("{}?name={}", base, urlencoding::encode(name)))
    }
}
