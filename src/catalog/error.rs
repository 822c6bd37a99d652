//! Error taxonomy for catalog operations.
//!
//! Failures fall into four classes: configuration (missing or rejected API
//! key), transient network faults (the only retryable class), upstream
//! semantic responses ("no results"), and malformed payloads. None of them
//! terminate the process; callers surface them as user-visible notices.

use thiserror::Error;

use super::transport::FetchError;

/// Error returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No API key configured for the provider. Surfaced per operation; other
    /// operations backed by the other provider may still work.
    #[error("{provider} API key is missing; set it in the config file or environment")]
    NotConfigured { provider: &'static str },

    /// The provider rejected the configured API key (HTTP 401).
    #[error("{provider} API key is invalid or unauthorized; regenerate it at the provider")]
    Unauthorized { provider: &'static str },

    /// Connection-level failure or upstream server fault.
    #[error("network error talking to {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    /// The provider answered but carried no result set.
    #[error("{provider} returned no results")]
    NoResults { provider: &'static str },

    /// The response decoded to something other than the documented shape.
    #[error("unexpected response from {provider}: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },
}

impl CatalogError {
    /// Whether the retry policy may re-attempt the operation.
    ///
    /// Only network-level faults qualify; authorization failures and semantic
    /// "no results" responses are terminal and surfaced immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Network { .. })
    }

    /// Whether this is a configuration-class failure (spec'd to be surfaced
    /// once per affected operation, without any retry).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CatalogError::NotConfigured { .. } | CatalogError::Unauthorized { .. }
        )
    }

    /// Attach a provider name to a transport-level failure.
    pub(crate) fn from_fetch(provider: &'static str, err: FetchError) -> Self {
        match err {
            FetchError::Network(message) => CatalogError::Network { provider, message },
            FetchError::Unauthorized => CatalogError::Unauthorized { provider },
            FetchError::Status(code) => CatalogError::Malformed {
                provider,
                message: format!("unexpected status {code}"),
            },
            FetchError::Decode(message) => CatalogError::Malformed { provider, message },
        }
    }
}
