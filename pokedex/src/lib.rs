/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Client-side pagination, caching and lookup for the PokeAPI
//! catalog.
//!
//! The crate mediates between an interactive front-end and the
//! remote catalog API:
//!
//! - [`client`]: the remote catalog client (`GET` list pages, single
//!   name lookups and detail records).
//! - [`cache`]: session-lifetime keyed stores for pages and lookups.
//! - [`pagination`]: next/previous navigation over cursor URLs.
//! - [`filter`]: on-demand single-name lookup in list or detail mode.
//! - [`view`]: the reconciliation policy that merges both into one
//!   row set and decides which chrome is shown.
//!
//! Every fetch is split into a synchronous *begin* step (cache
//! lookup, state transition) and an asynchronous network step whose
//! result is fed back with a [`token::RequestToken`]. Resolutions
//! carrying a superseded token are discarded, so a slow response can
//! never overwrite newer state.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod test_utils;
pub mod token;
pub mod view;

pub use cache::PageCache;
pub use cache::SessionCache;
pub use client::CatalogClient;
pub use client::HttpCatalogClient;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use error::ErrorKind;
pub use filter::FilterCache;
pub use filter::FilterController;
pub use filter::FilterKey;
pub use filter::FilterResult;
pub use filter::LookupMode;
pub use model::CatalogEnvelope;
pub use model::CatalogItem;
pub use model::DetailRecord;
pub use model::NamedResource;
pub use pagination::PaginationController;
pub use token::RequestToken;
pub use view::CatalogView;
pub use view::OverlayView;
pub use view::Resolution;
pub use view::ViewRequest;
pub use view::ViewStatus;
