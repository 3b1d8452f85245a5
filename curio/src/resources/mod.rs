//! External learning resources.
//!
//! Resource providers (video sites, encyclopedias, standards bodies) are
//! collaborators behind the [`ResourceProvider`] trait. The
//! [`ResourceAggregator`] queries every applicable provider concurrently
//! and caps how much each one contributes.

pub mod aggregator;
pub mod models;
pub mod provider;

pub use aggregator::{ProviderScope, ResourceAggregator};
pub use models::{ResourceRecord, ResourceRequest};
pub use provider::{ResourceProvider, StaticResourceProvider};

#[cfg(test)]
pub use provider::MockResourceProvider;

/// Error type for resource providers
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The provider could not be reached or answered with an error
    #[error("Provider {provider} failed: {message}")]
    Fetch { provider: String, message: String },

    /// The provider refused the request because of rate limiting
    #[error("Provider {0} is rate limited")]
    RateLimited(String),

    /// The provider answered with data that could not be read
    #[error("Invalid resource data: {0}")]
    InvalidData(String),
}

impl ResourceError {
    /// Create a fetch error for a provider
    pub fn fetch(provider: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            provider: provider.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        ResourceError::InvalidData(err.to_string())
    }
}
