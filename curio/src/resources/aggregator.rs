//! Concurrent fan-out over resource providers

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ResourceConfig;

use super::models::{ResourceRecord, ResourceRequest};
use super::provider::ResourceProvider;

/// Which subjects a provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    /// Every subject
    All,
    /// Only the configured science subjects
    ScienceOnly,
}

struct RegisteredProvider {
    provider: Arc<dyn ResourceProvider>,
    scope: ProviderScope,
}

/// Collects resources from every applicable provider.
pub struct ResourceAggregator {
    providers: Vec<RegisteredProvider>,
    config: ResourceConfig,
}

impl ResourceAggregator {
    /// Create an aggregator with no providers
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            providers: Vec::new(),
            config,
        }
    }

    /// Register a provider serving every subject
    pub fn with_provider(self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.with_scoped_provider(provider, ProviderScope::All)
    }

    /// Register a provider serving only science subjects
    pub fn with_science_provider(self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.with_scoped_provider(provider, ProviderScope::ScienceOnly)
    }

    /// Register a provider with an explicit scope
    pub fn with_scoped_provider(
        mut self,
        provider: Arc<dyn ResourceProvider>,
        scope: ProviderScope,
    ) -> Self {
        self.providers.push(RegisteredProvider { provider, scope });
        self
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Fetch from every provider that serves `subject`.
    ///
    /// Providers run concurrently. Records are taken in registration order,
    /// at most `max_per_source` from each provider and `max_total` overall.
    /// A failing provider is logged and contributes nothing.
    pub async fn fetch_all(&self, subject: &str, grade: &str, topic: &str) -> Vec<ResourceRecord> {
        let request = ResourceRequest::new(subject, grade, topic);
        let science = self.config.is_science(subject);
        let applicable: Vec<&RegisteredProvider> = self
            .providers
            .iter()
            .filter(|p| p.scope == ProviderScope::All || science)
            .collect();

        let responses = join_all(applicable.iter().map(|p| p.provider.fetch(&request))).await;

        let mut records = Vec::new();
        for (registered, response) in applicable.iter().zip(responses) {
            if records.len() >= self.config.max_total {
                break;
            }
            match response {
                Ok(fetched) => {
                    let remaining = self.config.max_total - records.len();
                    let take = self.config.max_per_source.min(remaining);
                    records.extend(fetched.into_iter().take(take));
                }
                Err(e) => {
                    warn!(provider = %registered.provider.name(), error = %e, "Resource provider failed");
                }
            }
        }

        debug!(subject, count = records.len(), "Fetched external resources");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{MockResourceProvider, ResourceError, StaticResourceProvider};

    fn records(source: &str, count: usize) -> Vec<ResourceRecord> {
        (0..count)
            .map(|i| ResourceRecord::new(format!("{} {}", source, i), "description", source))
            .collect()
    }

    fn fixed(source: &str, count: usize) -> Arc<dyn ResourceProvider> {
        Arc::new(StaticResourceProvider::new(source, records(source, count)))
    }

    #[tokio::test]
    async fn test_per_source_and_total_caps() {
        let aggregator = ResourceAggregator::new(ResourceConfig::default())
            .with_provider(fixed("YouTube", 5))
            .with_provider(fixed("Wikipedia", 5))
            .with_provider(fixed("Common Core", 5))
            .with_provider(fixed("Khan Academy", 5));

        let fetched = aggregator.fetch_all("Mathematics", "5", "fractions").await;
        assert_eq!(fetched.len(), 10);
        assert_eq!(fetched.iter().filter(|r| r.source == "YouTube").count(), 3);
        assert_eq!(fetched.iter().filter(|r| r.source == "Khan Academy").count(), 1);
        assert_eq!(fetched[0].title, "YouTube 0");
    }

    #[tokio::test]
    async fn test_science_only_providers() {
        let aggregator = ResourceAggregator::new(ResourceConfig::default())
            .with_provider(fixed("Wikipedia", 2))
            .with_science_provider(fixed("NGSS", 2));

        let math = aggregator.fetch_all("Mathematics", "5", "fractions").await;
        assert!(math.iter().all(|r| r.source != "NGSS"));

        let biology = aggregator.fetch_all("Biology", "7", "cells").await;
        assert_eq!(biology.iter().filter(|r| r.source == "NGSS").count(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider_is_isolated() {
        let mut failing = MockResourceProvider::new();
        failing.expect_name().return_const("YouTube".to_string());
        failing
            .expect_fetch()
            .times(1)
            .returning(|_| Err(ResourceError::fetch("YouTube", "quota exceeded")));

        let mut working = MockResourceProvider::new();
        working.expect_name().return_const("Wikipedia".to_string());
        working
            .expect_fetch()
            .withf(|request| request.subject == "Science" && request.topic == "volcanoes")
            .times(1)
            .returning(|_| Ok(records("Wikipedia", 2)));

        let aggregator = ResourceAggregator::new(ResourceConfig::default())
            .with_provider(Arc::new(failing))
            .with_provider(Arc::new(working));

        let fetched = aggregator.fetch_all("Science", "5", "volcanoes").await;
        assert_eq!(fetched.len(), 2);
        assert!(fetched.iter().all(|r| r.source == "Wikipedia"));
    }

    #[tokio::test]
    async fn test_no_providers() {
        let aggregator = ResourceAggregator::new(ResourceConfig::default());
        assert!(aggregator.is_empty());
        assert!(aggregator.fetch_all("Art", "1", "color").await.is_empty());
    }
}
