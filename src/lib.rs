//! # rag-pipeline
//!
//! A minimal retrieval-augmented generation (RAG) pipeline: load a
//! line-delimited document corpus, embed it, populate a vector store
//! collection, retrieve top-k context for a question, and generate an answer
//! conditioned on that context.
//!
//! ## Overview
//!
//! Embedding, similarity search, and generation are external capabilities
//! reached through narrow async trait seams:
//!
//! - [`Embedder`] – text to fixed-dimension vectors
//! - [`VectorStore`] – collections of (id, vector, text) triples with
//!   similarity search
//! - [`Generator`] – prompt to continuation text
//!
//! The in-scope logic is [`RagPipeline`], which sequences index → retrieve →
//! prompt → generate, and [`build_prompt`], the deterministic prompt
//! template. All three collaborators are dependency-injected, so tests run
//! against [`InMemoryVectorStore`] and deterministic doubles without loading
//! models.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rag_pipeline::openai::{OpenAIEmbedder, OpenAIGenerator};
//! use rag_pipeline::qdrant::QdrantVectorStore;
//! use rag_pipeline::{PipelineConfig, RagPipeline, load_documents};
//!
//! let documents = load_documents("data/documents.txt")?;
//!
//! let pipeline = RagPipeline::builder()
//!     .config(PipelineConfig::default())
//!     .embedder(Arc::new(
//!         OpenAIEmbedder::compatible("http://localhost:11434/v1", "")
//!             .with_model("all-minilm")
//!             .with_dimensions(384),
//!     ))
//!     .vector_store(Arc::new(QdrantVectorStore::default_url()?))
//!     .generator(Arc::new(
//!         OpenAIGenerator::compatible("http://localhost:11434/v1", "")
//!             .with_model("tinyllama"),
//!     ))
//!     .build()?;
//!
//! pipeline.index(&documents).await?;
//! let answer = pipeline.ask("What is RAG?").await?;
//! ```
//!
//! ## Backends
//!
//! - `openai` feature – [`openai::OpenAIEmbedder`] and
//!   [`openai::OpenAIGenerator`] for OpenAI-compatible HTTP APIs (OpenAI,
//!   Ollama, vLLM).
//! - `qdrant` feature – [`qdrant::QdrantVectorStore`] over gRPC.
//! - always available – [`InMemoryVectorStore`] with cosine similarity.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generator;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod prompt;
#[cfg(feature = "qdrant")]
pub mod qdrant;
pub mod vectorstore;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use document::{Document, load_documents, write_answer};
pub use embedding::Embedder;
pub use error::{RagError, Result};
pub use generator::{GenerationOptions, Generator, strip_echoed_prompt};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::{OpenAIEmbedder, OpenAIGenerator};
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use prompt::build_prompt;
#[cfg(feature = "qdrant")]
pub use qdrant::QdrantVectorStore;
pub use vectorstore::{SearchResult, VectorStore};
