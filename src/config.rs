//! Configuration for the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for the pipeline.
///
/// Defaults mirror the demo constants: collection `knowledge_base`, four
/// context documents, 150 new tokens at temperature 0.7.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Name of the vector store collection (recreated on every run).
    pub collection: String,
    /// Number of top results to retrieve as context.
    pub top_k: usize,
    /// Maximum number of new tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature for generation.
    pub temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { collection: "knowledge_base".to_string(), top_k: 4, max_tokens: 150, temperature: 0.7 }
    }
}

impl PipelineConfig {
    /// Create a new builder for constructing a [`PipelineConfig`].
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the vector store collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Set the number of top results to retrieve as context.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the maximum number of new tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature for generation.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Build the [`PipelineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `collection` is empty
    /// - `top_k == 0`
    /// - `max_tokens == 0`
    /// - `temperature` is outside `[0.0, 2.0]`
    pub fn build(self) -> Result<PipelineConfig> {
        if self.config.collection.is_empty() {
            return Err(RagError::Config("collection name must not be empty".to_string()));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.max_tokens == 0 {
            return Err(RagError::Config("max_tokens must be greater than zero".to_string()));
        }
        if !(0.0..=2.0).contains(&self.config.temperature) {
            return Err(RagError::Config(format!(
                "temperature ({}) must be within [0.0, 2.0]",
                self.config.temperature
            )));
        }
        Ok(self.config)
    }
}
