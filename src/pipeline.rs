//! Pipeline orchestrator.
//!
//! The [`RagPipeline`] sequences the five-stage flow (index, retrieve,
//! build prompt, generate, strip) over an injected [`Embedder`],
//! [`VectorStore`], and [`Generator`]. Its one non-obvious invariant is that
//! corpus and query embeddings come from the same embedder handle, so the
//! collection dimension, the document vectors, and the query vector all live
//! in one embedding space.
//!
//! # Example
//!
//! ```rust,ignore
//! use rag_pipeline::{RagPipeline, PipelineConfig, InMemoryVectorStore};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(PipelineConfig::default())
//!     .embedder(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! pipeline.index(&documents).await?;
//! let answer = pipeline.ask("What is RAG?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::generator::{GenerationOptions, Generator, strip_echoed_prompt};
use crate::prompt::build_prompt;
use crate::vectorstore::VectorStore;

/// The retrieval-augmented generation pipeline.
///
/// Stateless across runs; within one run the stages execute strictly in
/// sequence with no retry or rollback; any stage failure terminates the
/// run. Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: PipelineConfig,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline").field("config", &self.config).finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Index the corpus: batch-encode, recreate the collection, upload.
    ///
    /// The collection is recreated with the dimensionality reported by the
    /// configured [`Embedder`], destroying any prior contents under the same
    /// name. An empty corpus still recreates (and thus empties) the
    /// collection; the upload is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if encoding or any store operation
    /// fails. Failures are wrapped with stage context, never retried.
    pub async fn index(&self, documents: &[Document]) -> Result<()> {
        let collection = &self.config.collection;

        let embeddings = if documents.is_empty() {
            Vec::new()
        } else {
            let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
            self.embedder.encode_batch(&texts).await.map_err(|e| {
                error!(error = %e, "corpus encoding failed during indexing");
                RagError::Pipeline(format!("corpus encoding failed: {e}"))
            })?
        };

        let dimensions = self.embedder.dimensions();
        self.vector_store.recreate_collection(collection, dimensions).await.map_err(|e| {
            error!(collection, error = %e, "failed to recreate collection");
            RagError::Pipeline(format!("failed to recreate collection '{collection}': {e}"))
        })?;

        if !documents.is_empty() {
            self.vector_store.upload(collection, documents, &embeddings).await.map_err(|e| {
                error!(collection, error = %e, "upload failed during indexing");
                RagError::Pipeline(format!("upload to collection '{collection}' failed: {e}"))
            })?;
        }

        info!(collection, document_count = documents.len(), "indexed corpus");
        Ok(())
    }

    /// Retrieve top-k context for a question.
    ///
    /// The question is encoded with the same embedder used for indexing,
    /// then the store is searched bounded to the configured `top_k`. Texts
    /// come back in the store's rank order with no re-ranking and no
    /// relevance threshold; a collection smaller than `top_k` yields fewer
    /// results.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if encoding or search fails.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<String>> {
        let query_embedding = self.embedder.encode(question).await.map_err(|e| {
            error!(error = %e, "query encoding failed");
            RagError::Pipeline(format!("query encoding failed: {e}"))
        })?;

        let collection = &self.config.collection;
        let results = self
            .vector_store
            .search(collection, &query_embedding, self.config.top_k)
            .await
            .map_err(|e| {
                error!(collection, error = %e, "vector store search failed");
                RagError::Pipeline(format!("search in collection '{collection}' failed: {e}"))
            })?;

        info!(result_count = results.len(), "retrieved context");
        Ok(results.into_iter().map(|r| r.text).collect())
    }

    /// Generate an answer for a prompt.
    ///
    /// Invokes the generator with the configured sampling options, strips a
    /// verbatim echoed prompt prefix if the backend produced one, and trims
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Pipeline`] if generation fails.
    pub async fn answer(&self, prompt: &str) -> Result<String> {
        let options = GenerationOptions {
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let raw = self.generator.generate(prompt, &options).await.map_err(|e| {
            error!(error = %e, "generation failed");
            RagError::Pipeline(format!("generation failed: {e}"))
        })?;

        let answer = strip_echoed_prompt(prompt, &raw).trim().to_string();
        info!(answer_len = answer.len(), "generated answer");
        Ok(answer)
    }

    /// Answer a question end to end: retrieve → build prompt → generate.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let context = self.retrieve(question).await?;
        let prompt = build_prompt(&context, question);
        self.answer(&prompt).await
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<PipelineConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedder used for both corpus and query encoding.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the text generator.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::Config("config is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::Config("vector_store is required".to_string()))?;
        let generator =
            self.generator.ok_or_else(|| RagError::Config("generator is required".to_string()))?;

        Ok(RagPipeline { config, embedder, vector_store, generator })
    }
}
