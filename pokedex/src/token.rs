/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Request generation tokens.
//!
//! In-flight fetches are never cancelled. Instead every fetch carries
//! the token that was current when it was issued, and its resolution
//! is applied only if no newer token has been issued since. This
//! gives last-issued-wins semantics regardless of the order in which
//! responses arrive.

/// Identifies one issued request. Later tokens compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Monotonic source of [`RequestToken`]s for a single controller.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    latest: u64,
    /// Tokens at or below this were issued before a restart.
    floor: u64,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every token issued before it.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Supersede all outstanding tokens without issuing a request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// An issuer for a restarted controller. Its tokens are all newer
    /// than anything `self` issued, so resolutions from before the
    /// restart are never current.
    pub fn successor(&self) -> Self {
        Self {
            latest: self.latest + 1,
            floor: self.latest,
        }
    }

    /// True iff `token` was issued by this issuer rather than by the
    /// one it succeeded.
    pub fn issued_here(&self, token: RequestToken) -> bool {
        token.0 > self.floor
    }

    /// True iff `token` is the most recently issued one and nothing
    /// has invalidated it since.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut issuer = TokenIssuer::new();
        let a = issuer.issue();
        let b = issuer.issue();
        assert!(a < b);
        assert!(!issuer.is_current(a));
        assert!(issuer.is_current(b));
    }

    #[test]
    fn invalidate_supersedes_outstanding() {
        let mut issuer = TokenIssuer::new();
        let a = issuer.issue();
        issuer.invalidate();
        assert!(!issuer.is_current(a));
        let b = issuer.issue();
        assert!(issuer.is_current(b));
    }

    #[test]
    fn successor_never_reissues_old_tokens() {
        let mut old = TokenIssuer::new();
        let stale = old.issue();
        let mut fresh = old.successor();
        assert!(!fresh.is_current(stale));
        assert!(!fresh.issued_here(stale));
        let next = fresh.issue();
        assert!(fresh.issued_here(next));
        assert!(next > stale);
        assert!(!fresh.is_current(stale));
        assert!(fresh.is_current(next));
    }
}
