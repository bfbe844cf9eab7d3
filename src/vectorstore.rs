//! Vector store trait for storing and searching document embeddings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;

/// A document retrieved from the store, paired with a similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The stored document id.
    pub id: u64,
    /// The stored text payload.
    pub text: String,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

/// A storage backend for document embeddings with similarity search.
///
/// Implementations manage named collections of (id, vector, text) triples.
/// Collections carry overwrite semantics: recreating one under an existing
/// name discards all prior contents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection, destroying any prior collection under the
    /// same name. The collection accepts vectors of exactly `dimensions`.
    async fn recreate_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Upload documents and their embeddings into a collection.
    ///
    /// `documents` and `embeddings` are parallel slices; a length mismatch
    /// is a [`RagError::VectorStore`](crate::error::RagError::VectorStore).
    async fn upload(
        &self,
        collection: &str,
        documents: &[Document],
        embeddings: &[Vec<f32>],
    ) -> Result<()>;

    /// Search for the `top_k` stored documents most similar to the embedding.
    ///
    /// Returns results ordered by descending similarity score. A collection
    /// holding fewer than `top_k` entries returns fewer results, not an error.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
