//! End-to-end pipeline tests against deterministic doubles.
//!
//! The embedder counts occurrences of a fixed vocabulary, so similarity is
//! exact word overlap and retrieval order is fully predictable. Generators
//! are scripted; one echoes the prompt verbatim to exercise the strip path.

use std::sync::Arc;

use async_trait::async_trait;
use rag_pipeline::document::Document;
use rag_pipeline::embedding::Embedder;
use rag_pipeline::error::Result;
use rag_pipeline::generator::{GenerationOptions, Generator};
use rag_pipeline::inmemory::InMemoryVectorStore;
use rag_pipeline::prompt::build_prompt;
use rag_pipeline::{PipelineConfig, RagPipeline, write_answer};

const VOCAB: &[&str] = &[
    "rag",
    "retrieval",
    "generation",
    "combines",
    "vector",
    "databases",
    "store",
    "embeddings",
];

/// Deterministic bag-of-words embedder over a fixed vocabulary.
///
/// Each dimension counts occurrences of one vocabulary word; words outside
/// the vocabulary are ignored. Identical texts produce identical vectors.
struct VocabEmbedder;

#[async_trait]
impl Embedder for VocabEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; VOCAB.len()];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
        {
            if let Some(index) = VOCAB.iter().position(|v| *v == word) {
                vector[index] += 1.0;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        VOCAB.len()
    }
}

/// A generator that echoes the prompt verbatim before its scripted answer.
struct EchoingGenerator {
    completion: &'static str,
}

#[async_trait]
impl Generator for EchoingGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        Ok(format!("{prompt}{}", self.completion))
    }
}

/// A generator that returns only the continuation, as the trait contract asks.
struct ContinuationGenerator {
    completion: &'static str,
}

#[async_trait]
impl Generator for ContinuationGenerator {
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
        Ok(self.completion.to_string())
    }
}

fn corpus() -> Vec<Document> {
    vec![
        Document { id: 0, text: "RAG combines retrieval with generation.".to_string() },
        Document { id: 1, text: "Vector databases store embeddings.".to_string() },
    ]
}

fn pipeline_with(generator: Arc<dyn Generator>, top_k: usize) -> RagPipeline {
    let config = PipelineConfig::builder().collection("test").top_k(top_k).build().unwrap();
    RagPipeline::builder()
        .config(config)
        .embedder(Arc::new(VocabEmbedder))
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .generator(generator)
        .build()
        .unwrap()
}

#[tokio::test]
async fn indexed_document_is_its_own_best_match() {
    let pipeline = pipeline_with(Arc::new(ContinuationGenerator { completion: "ok" }), 1);
    pipeline.index(&corpus()).await.unwrap();

    let context = pipeline.retrieve("Vector databases store embeddings.").await.unwrap();
    assert_eq!(context, vec!["Vector databases store embeddings.".to_string()]);
}

#[tokio::test]
async fn retrieval_returns_at_most_k_in_rank_order() {
    let pipeline = pipeline_with(Arc::new(ContinuationGenerator { completion: "ok" }), 1);
    pipeline.index(&corpus()).await.unwrap();

    let context = pipeline.retrieve("What is RAG?").await.unwrap();
    assert_eq!(context, vec!["RAG combines retrieval with generation.".to_string()]);
}

#[tokio::test]
async fn k_beyond_corpus_size_returns_whole_corpus() {
    let pipeline = pipeline_with(Arc::new(ContinuationGenerator { completion: "ok" }), 10);
    pipeline.index(&corpus()).await.unwrap();

    let context = pipeline.retrieve("What is RAG?").await.unwrap();
    assert_eq!(context.len(), 2);
}

#[tokio::test]
async fn reindexing_overwrites_the_collection() {
    let pipeline = pipeline_with(Arc::new(ContinuationGenerator { completion: "ok" }), 10);

    pipeline.index(&corpus()).await.unwrap();
    let replacement =
        vec![Document { id: 0, text: "Generation conditions on retrieval.".to_string() }];
    pipeline.index(&replacement).await.unwrap();

    let context = pipeline.retrieve("vector databases").await.unwrap();
    assert_eq!(context, vec!["Generation conditions on retrieval.".to_string()]);
}

#[tokio::test]
async fn empty_corpus_yields_empty_context() {
    let pipeline = pipeline_with(Arc::new(ContinuationGenerator { completion: "ok" }), 4);
    pipeline.index(&[]).await.unwrap();

    let context = pipeline.retrieve("What is RAG?").await.unwrap();
    assert!(context.is_empty());

    // The prompt is still well-formed with an empty context block.
    let prompt = build_prompt(&context, "What is RAG?");
    assert!(prompt.contains("Question: What is RAG?"));
}

#[tokio::test]
async fn echoed_prompt_is_stripped_from_the_answer() {
    let pipeline =
        pipeline_with(Arc::new(EchoingGenerator { completion: " Retrieval feeds generation." }), 1);
    pipeline.index(&corpus()).await.unwrap();

    let context = pipeline.retrieve("What is RAG?").await.unwrap();
    let prompt = build_prompt(&context, "What is RAG?");
    let answer = pipeline.answer(&prompt).await.unwrap();

    assert_eq!(answer, "Retrieval feeds generation.");
    assert!(!answer.starts_with(&prompt));
}

#[tokio::test]
async fn end_to_end_scenario_writes_question_and_answer() {
    let pipeline = pipeline_with(
        Arc::new(EchoingGenerator { completion: " RAG retrieves context before generating." }),
        1,
    );
    pipeline.index(&corpus()).await.unwrap();

    let question = "What is RAG?";
    let context = pipeline.retrieve(question).await.unwrap();
    assert_eq!(context, vec!["RAG combines retrieval with generation.".to_string()]);

    let prompt = build_prompt(&context, question);
    let answer = pipeline.answer(&prompt).await.unwrap();
    assert!(!answer.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answer.txt");
    write_answer(&path, question, &answer).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(question));
    assert!(written.contains(&answer));
}

#[tokio::test]
async fn ask_composes_retrieve_prompt_and_answer() {
    let pipeline = pipeline_with(
        Arc::new(ContinuationGenerator { completion: "Retrieval plus generation." }),
        1,
    );
    pipeline.index(&corpus()).await.unwrap();

    let answer = pipeline.ask("What is RAG?").await.unwrap();
    assert_eq!(answer, "Retrieval plus generation.");
}

#[tokio::test]
async fn builder_rejects_missing_collaborators() {
    let err = RagPipeline::builder().config(PipelineConfig::default()).build().unwrap_err();
    assert!(matches!(err, rag_pipeline::RagError::Config(_)));
}
