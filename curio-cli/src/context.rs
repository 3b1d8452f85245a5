use std::sync::Arc;

use curio::config::CurioConfig;
use curio::ml::{HashingEmbedder, TermOverlapCrossEncoder};
use curio::prelude::*;
use curio::resources::StaticResourceProvider;
use curio::storage::InMemoryIndex;

use crate::args::CorpusArgs;
use crate::utils::{load_corpus, load_resources};

/// Name of the provider backed by the `--resources` file
pub const RESOURCES_PROVIDER: &str = "resources-file";

/// Everything a retrieval command needs: the loaded corpus indexed twice
/// (one index per embedder), a cross-encoder and the cached resources.
pub struct CurioCliContext {
    pub config: CurioConfig,
    pub service: RetrievalService,
    pub documents: usize,
}

impl CurioCliContext {
    /// Load and index the corpus for a request on `subject` and `grade`.
    ///
    /// Cached resources are indexed under the request's subject and grade
    /// so that resource-focused strategies can rank them, and are also
    /// served to baseline retrieval.
    pub async fn new(
        config: CurioConfig,
        corpus: &CorpusArgs,
        subject: &str,
        grade: &str,
    ) -> curio::Result<Self> {
        let mut documents = load_corpus(&corpus.corpus)?;
        let resources = match &corpus.resources {
            Some(path) => load_resources(path)?,
            None => Vec::new(),
        };
        for record in &resources {
            let document = record.clone().into_document(subject, grade);
            if document.text.trim().is_empty() {
                tracing::warn!(
                    "Skipping resource from {} with no title or description",
                    record.source
                );
                continue;
            }
            documents.push(document);
        }

        let primary_embedder = Arc::new(HashingEmbedder::default());
        let secondary_embedder =
            Arc::new(HashingEmbedder::default().with_salt("hashing-alt", "curio-alt"));
        let primary_index = Arc::new(InMemoryIndex::new());
        let secondary_index = Arc::new(InMemoryIndex::new());

        primary_index
            .index_documents(primary_embedder.as_ref(), documents.clone())
            .await?;
        secondary_index
            .index_documents(secondary_embedder.as_ref(), documents.iter().cloned())
            .await?;
        tracing::debug!(
            "Indexed {} documents from {} cached resources",
            documents.len(),
            resources.len()
        );

        let retriever = AdvancedRetriever::builder(primary_embedder, primary_index.clone())
            .secondary_source(secondary_embedder, secondary_index)
            .keyword_search(primary_index)
            .cross_encoder(Arc::new(TermOverlapCrossEncoder::new()))
            .config(config.retrieval.clone())
            .build();

        let mut service = RetrievalService::new(Arc::new(retriever));
        if !resources.is_empty() {
            let provider = StaticResourceProvider::new(RESOURCES_PROVIDER, resources);
            let aggregator =
                ResourceAggregator::new(config.resources.clone()).with_provider(Arc::new(provider));
            service = service.with_resources(Arc::new(aggregator));
        }

        Ok(Self {
            config,
            service,
            documents: documents.len(),
        })
    }

    pub fn retriever(&self) -> &AdvancedRetriever {
        self.service.retriever()
    }
}
