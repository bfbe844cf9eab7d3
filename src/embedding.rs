//! Embedder trait for turning text into fixed-length vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that encodes text into fixed-dimension embedding vectors.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. Similarity search is only meaningful when corpus and query are
/// encoded by the same embedder, so the pipeline holds exactly one
/// `Embedder` handle and uses it for both.
///
/// The default [`encode_batch`](Embedder::encode_batch) implementation calls
/// [`encode`](Embedder::encode) sequentially; backends with native batching
/// should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode a single text into an embedding vector.
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Encode a batch of texts into embedding vectors, one per input.
    ///
    /// The default implementation calls [`encode`](Embedder::encode)
    /// sequentially for each input. Override this method if the backend
    /// supports native batch encoding for better throughput.
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.encode(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this embedder.
    ///
    /// Collections are created with this dimension; every vector inserted
    /// into them must match it.
    fn dimensions(&self) -> usize;
}
