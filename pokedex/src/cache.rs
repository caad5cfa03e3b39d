/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::model::CatalogEnvelope;

/// Session-lifetime key/value store.
///
/// Entries are never evicted and never expire; the cache lives as
/// long as the view that owns it. Keys are compared exactly, with no
/// normalization.
#[derive(Debug, Clone)]
pub struct SessionCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for SessionCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> SessionCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Insert or replace the entry for `key`.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetched list pages keyed by the exact URL they were fetched from.
pub type PageCache = SessionCache<String, CatalogEnvelope>;

/// A single value reused for `window` after it was produced, then
/// produced again on the next request.
///
/// Concurrent callers wait on one refresh. A failed refresh leaves
/// the previous value (stale or not) untouched for the next caller.
#[derive(Debug)]
pub struct Revalidating<T> {
    window: Duration,
    slot: Mutex<Option<(Instant, T)>>,
}

impl<T: Clone> Revalidating<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: Mutex::new(None),
        }
    }

    /// Time since the held value was produced.
    pub async fn age(&self) -> Option<Duration> {
        self.slot
            .lock()
            .await
            .as_ref()
            .map(|(produced_at, _)| produced_at.elapsed())
    }

    /// The held value while it is younger than the window, otherwise
    /// the result of `refresh`, which is kept on success.
    pub async fn get_or_try_refresh<E, F, Fut>(&self, refresh: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some((produced_at, value)) = slot.as_ref()
            && produced_at.elapsed() < self.window
        {
            return Ok(value.clone());
        }
        let value = refresh().await?;
        *slot = Some((Instant::now(), value.clone()));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::config::DEFAULT_CACHE_REVALIDATION;

    async fn produce(calls: &AtomicUsize) -> Result<usize, String> {
        Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[test]
    fn put_then_get() {
        let mut cache = PageCache::new();
        assert!(cache.is_empty());
        cache.put("u1".to_string(), CatalogEnvelope::empty());
        assert!(cache.contains("u1"));
        assert_eq!(cache.get("u1"), Some(&CatalogEnvelope::empty()));
        assert!(cache.get("u2").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_not_normalized() {
        let mut cache: SessionCache<String, u32> = SessionCache::new();
        cache.put("Pikachu".to_string(), 1);
        assert!(cache.get("pikachu").is_none());
        cache.put("pikachu".to_string(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn put_replaces() {
        let mut cache: SessionCache<String, u32> = SessionCache::new();
        cache.put("k".to_string(), 1);
        cache.put("k".to_string(), 2);
        assert_eq!(cache.get("k"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn revalidating_reuses_value_within_window() {
        let memo = Revalidating::new(DEFAULT_CACHE_REVALIDATION);
        let calls = AtomicUsize::new(0);
        assert_eq!(memo.get_or_try_refresh(|| produce(&calls)).await, Ok(1));

        tokio::time::advance(DEFAULT_CACHE_REVALIDATION - Duration::from_secs(1)).await;
        assert_eq!(memo.get_or_try_refresh(|| produce(&calls)).await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            memo.age().await,
            Some(DEFAULT_CACHE_REVALIDATION - Duration::from_secs(1))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn revalidating_refreshes_once_window_elapses() {
        let memo = Revalidating::new(DEFAULT_CACHE_REVALIDATION);
        let calls = AtomicUsize::new(0);
        assert!(memo.age().await.is_none());
        assert_eq!(memo.get_or_try_refresh(|| produce(&calls)).await, Ok(1));

        tokio::time::advance(DEFAULT_CACHE_REVALIDATION).await;
        assert_eq!(memo.get_or_try_refresh(|| produce(&calls)).await, Ok(2));
        assert_eq!(memo.age().await, Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_value() {
        let memo = Revalidating::new(DEFAULT_CACHE_REVALIDATION);
        let calls = AtomicUsize::new(0);
        memo.get_or_try_refresh(|| produce(&calls)).await.unwrap();

        tokio::time::advance(DEFAULT_CACHE_REVALIDATION * 2).await;
        let err = memo
            .get_or_try_refresh(|| async { Err::<usize, _>("offline".to_string()) })
            .await;
        assert_eq!(err, Err("offline".to_string()));
        assert_eq!(memo.age().await, Some(DEFAULT_CACHE_REVALIDATION * 2));
        assert_eq!(memo.get_or_try_refresh(|| produce(&calls)).await, Ok(2));
    }
}
