/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Remote catalog client.
//!
//! [`CatalogClient`] is the seam between the controllers and the
//! network. [`HttpCatalogClient`] implements it over `reqwest`:
//!
//! - `fetch_page` GETs a list URL verbatim. Cursor URLs returned by
//!   the API are fetched as-is, never rebuilt from offset/limit.
//! - `fetch_detail` GETs `<detail_url>/<name-lowercased>`; `404` maps
//!   to [`CatalogError::NotFound`].
//! - `lookup` answers a single name as a one-item list envelope,
//!   either through the configured lookup proxy or by performing the
//!   proxy's translation in-process from the detail endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use crate::cache::Revalidating;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::CatalogEnvelope;
use crate::model::CatalogItem;
use crate::model::DetailRecord;

/// Network access to the catalog API.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one list page from a fully-resolved URL.
    async fn fetch_page(&self, url: &str) -> Result<CatalogEnvelope, CatalogError>;

    /// Look up one entry by exact name, wrapped as a single-item list
    /// envelope.
    async fn lookup(&self, name: &str) -> Result<CatalogEnvelope, CatalogError>;

    /// Fetch the extended detail record for one entry.
    async fn fetch_detail(&self, name: &str) -> Result<DetailRecord, CatalogError>;

    /// The first list page a fresh session starts from.
    async fn initial_page(&self) -> Result<CatalogEnvelope, CatalogError>;
}

/// Error body returned by the lookup proxy for non-2xx answers.
#[derive(Deserialize)]
struct ProxyError {
    error: String,
}

/// [`CatalogClient`] backed by a shared `reqwest::Client`.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
    /// First list page, reused for `config.revalidate`.
    initial: Revalidating<CatalogEnvelope>,
}

impl HttpCatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Use a pre-built `reqwest::Client` (custom TLS, proxies, ...).
    pub fn with_client(client: reqwest::Client, config: CatalogConfig) -> Self {
        Self {
            client,
            initial: Revalidating::new(config.revalidate),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Age of the memoized initial page, if any.
    pub async fn initial_page_age(&self) -> Option<Duration> {
        self.initial.age().await
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        tracing::debug!(%url, "GET");
        self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            CatalogError::Transport {
                reason: e.to_string(),
            }
        })
    }

    async fn decode<T: DeserializeOwned>(
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T, CatalogError> {
        resp.json::<T>().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "undecodable response body");
            CatalogError::Transport {
                reason: format!("parse error: {}", e),
            }
        })
    }

    async fn lookup_via_proxy(
        &self,
        url: &str,
        name: &str,
    ) -> Result<CatalogEnvelope, CatalogError> {
        let resp = self.get(url).await?;
        match resp.status() {
            status if status.is_success() => Self::decode(url, resp).await,
            StatusCode::BAD_REQUEST => {
                let reason = match resp.json::<ProxyError>().await {
                    Ok(body) => body.error,
                    Err(_) => CatalogError::missing_name().to_string(),
                };
                Err(CatalogError::Validation { reason })
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound {
                name: name.to_string(),
            }),
            status => {
                tracing::warn!(%url, %status, "lookup proxy failed");
                Err(CatalogError::Status {
                    status: status.as_u16(),
                })
            }
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, url: &str) -> Result<CatalogEnvelope, CatalogError> {
        let resp = self.get(url).await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "page fetch failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        Self::decode(url, resp).await
    }

    async fn lookup(&self, name: &str) -> Result<CatalogEnvelope, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::missing_name());
        }
        if let Some(url) = self.config.lookup_url_for(name) {
            return self.lookup_via_proxy(&url, name).await;
        }
        let record = self.fetch_detail(name).await?;
        let url = self.config.detail_url_for(&record.name);
        Ok(CatalogEnvelope::single(CatalogItem {
            name: record.name,
            url,
        }))
    }

    async fn fetch_detail(&self, name: &str) -> Result<DetailRecord, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::missing_name());
        }
        let url = self.config.detail_url_for(name);
        let resp = self.get(&url).await?;
        match resp.status() {
            status if status.is_success() => Self::decode(&url, resp).await,
            StatusCode::NOT_FOUND => {
                tracing::debug!(%url, "no such entry");
                Err(CatalogError::NotFound {
                    name: name.to_string(),
                })
            }
            status => {
                tracing::warn!(%url, %status, "detail fetch failed");
                Err(CatalogError::Status {
                    status: status.as_u16(),
                })
            }
        }
    }

    /// The first list page, reused while younger than the
    /// revalidation window.
    async fn initial_page(&self) -> Result<CatalogEnvelope, CatalogError> {
        self.initial
            .get_or_try_refresh(|| {
                let url = self.config.list_page_url(self.config.page_size, 0);
                tracing::debug!(%url, "revalidating initial page");
                async move { self.fetch_page(&url).await }
            })
            .await
    }
}
