//! Generator trait for producing continuation text from a prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling parameters for text generation.
///
/// These are fixed per pipeline run and carried in the
/// [`PipelineConfig`](crate::config::PipelineConfig), not tuned dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum number of new tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { max_tokens: 150, temperature: 0.7 }
    }
}

/// A provider that generates continuation text from a prompt.
///
/// The contract is that implementations return only the continuation, never
/// a copy of the prompt followed by the continuation. Backends that echo the
/// prompt verbatim (some completion-style APIs do) are handled defensively by
/// the pipeline via [`strip_echoed_prompt`]. Output is non-deterministic
/// under sampling.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate continuation text for the given prompt.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// Remove a verbatim echo of the prompt from the start of raw generator
/// output.
///
/// Returns the suffix after the prompt when `raw` begins with `prompt`
/// byte-for-byte, and `raw` unchanged otherwise. Backends that paraphrase or
/// re-tokenize the prompt are left alone rather than sliced at a wrong
/// boundary.
pub fn strip_echoed_prompt<'a>(prompt: &str, raw: &'a str) -> &'a str {
    raw.strip_prefix(prompt).unwrap_or(raw)
}
