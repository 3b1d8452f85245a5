//! Resource provider interface

use async_trait::async_trait;

use super::ResourceError;
use super::models::{ResourceRecord, ResourceRequest};

/// A source of external learning resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceProvider: Send + Sync + 'static {
    /// Provider name used in logs
    fn name(&self) -> String;

    /// Fetch resources for the request, most relevant first
    async fn fetch(&self, request: &ResourceRequest) -> Result<Vec<ResourceRecord>, ResourceError>;
}

/// Provider that always returns the same records.
///
/// Backs the CLI's `--resources` file and offline tests.
#[derive(Debug, Clone)]
pub struct StaticResourceProvider {
    name: String,
    records: Vec<ResourceRecord>,
}

impl StaticResourceProvider {
    pub fn new(name: impl Into<String>, records: Vec<ResourceRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self, _request: &ResourceRequest) -> Result<Vec<ResourceRecord>, ResourceError> {
        Ok(self.records.clone())
    }
}
