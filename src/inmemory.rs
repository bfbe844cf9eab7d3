//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency vector
//! store backed by a `HashMap` protected by a `tokio::sync::RwLock`. It is
//! suitable for development, testing, and small corpora.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::Document;
use crate::error::{RagError, Result};
use crate::vectorstore::{SearchResult, VectorStore};

#[derive(Debug, Clone)]
struct StoredPoint {
    text: String,
    embedding: Vec<f32>,
}

/// An in-memory vector store using cosine similarity for search.
///
/// Collections are stored as nested `HashMap`s: collection name → document
/// id → stored point. All operations are async-safe via `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, HashMap<u64, StoredPoint>>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn recreate_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        // Overwrite semantics: any prior contents under this name are dropped.
        collections.insert(name.to_string(), HashMap::new());
        Ok(())
    }

    async fn upload(
        &self,
        collection: &str,
        documents: &[Document],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if documents.len() != embeddings.len() {
            return Err(RagError::VectorStore {
                backend: "InMemory".to_string(),
                message: format!(
                    "document count ({}) does not match embedding count ({})",
                    documents.len(),
                    embeddings.len()
                ),
            });
        }

        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| RagError::VectorStore {
            backend: "InMemory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;

        for (document, embedding) in documents.iter().zip(embeddings) {
            store.insert(
                document.id,
                StoredPoint { text: document.text.clone(), embedding: embedding.clone() },
            );
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| RagError::VectorStore {
            backend: "InMemory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;

        let mut scored: Vec<SearchResult> = store
            .iter()
            .map(|(id, point)| SearchResult {
                id: *id,
                text: point.text.clone(),
                score: cosine_similarity(&point.embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}
