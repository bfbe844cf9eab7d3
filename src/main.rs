//! Demo runner: one question against a line-delimited corpus.
//!
//! All knobs are environment variables with local-serving defaults (Ollama
//! for models, Qdrant for storage); the run itself takes no arguments.

use std::sync::Arc;

use anyhow::Context;
use rag_pipeline::openai::{OpenAIEmbedder, OpenAIGenerator};
use rag_pipeline::qdrant::QdrantVectorStore;
use rag_pipeline::{PipelineConfig, RagPipeline, build_prompt, load_documents, write_answer};
use tracing::info;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let documents_path = env_or("RAG_DOCUMENTS_PATH", "data/documents.txt");
    let output_path = env_or("RAG_OUTPUT_PATH", "answer.txt");
    let question = env_or("RAG_QUESTION", "How does RAG work?");
    let qdrant_url = env_or("RAG_QDRANT_URL", "http://localhost:6334");
    let base_url = env_or("RAG_OPENAI_BASE_URL", "http://localhost:11434/v1");
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let embedding_model = env_or("RAG_EMBEDDING_MODEL", "all-minilm");
    let embedding_dimensions: usize = env_or("RAG_EMBEDDING_DIMENSIONS", "384")
        .parse()
        .context("RAG_EMBEDDING_DIMENSIONS must be an integer")?;
    let generation_model = env_or("RAG_GENERATION_MODEL", "tinyllama");

    let documents = load_documents(&documents_path)?;
    info!(path = %documents_path, count = documents.len(), "loaded corpus");

    let embedder = Arc::new(
        OpenAIEmbedder::compatible(&base_url, &api_key)
            .with_model(&embedding_model)
            .with_dimensions(embedding_dimensions),
    );
    let vector_store = Arc::new(QdrantVectorStore::new(&qdrant_url)?);
    let generator =
        Arc::new(OpenAIGenerator::compatible(&base_url, &api_key).with_model(&generation_model));

    let pipeline = RagPipeline::builder()
        .config(PipelineConfig::default())
        .embedder(embedder)
        .vector_store(vector_store)
        .generator(generator)
        .build()?;

    pipeline.index(&documents).await?;

    let context = pipeline.retrieve(&question).await?;
    let prompt = build_prompt(&context, &question);
    let answer = pipeline.answer(&prompt).await?;

    write_answer(&output_path, &question, &answer)?;
    info!(path = %output_path, "wrote answer");

    println!("\nQuestion: {question}");
    println!("\nAnswer:\n{answer}");

    Ok(())
}
