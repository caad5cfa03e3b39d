/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The queried name has no match. User-correctable.
    NotFound,
    /// Network failure or a non-2xx status. Retryable by re-submitting.
    Transport,
    /// A required parameter was missing. Caller bug.
    Validation,
}

/// The type of error that can occur talking to the catalog.
///
/// Errors are `Clone` so that a failed resolution can be carried
/// back through the event loop and recorded as controller state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No entry with the queried name.
    #[error("Pokémon not found")]
    NotFound {
        /// The name as it was queried.
        name: String,
    },

    /// The request could not be sent or the body could not be decoded.
    #[error("request failed: {reason}")]
    Transport { reason: String },

    /// The server answered with a non-2xx status not classified as
    /// not-found.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// A required query parameter was missing or empty.
    #[error("{reason}")]
    Validation { reason: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::Transport { .. } | CatalogError::Status { .. } => ErrorKind::Transport,
            CatalogError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub(crate) fn missing_name() -> Self {
        CatalogError::Validation {
            reason: r#"Missing "name" query parameter"#.to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CatalogError::Status {
                status: status.as_u16(),
            },
            None => CatalogError::Transport {
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_user_facing() {
        let err = CatalogError::NotFound {
            name: "missingno".into(),
        };
        assert_eq!(err.to_string(), "Pokémon not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn status_is_classified_as_transport() {
        assert_eq!(CatalogError::Status { status: 503 }.kind(), ErrorKind::Transport);
        assert_eq!(CatalogError::Status { status: 503 }.to_string(), "HTTP 503");
    }

    #[test]
    fn missing_name_is_validation() {
        let err = CatalogError::missing_name();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), r#"Missing "name" query parameter"#);
    }
}
