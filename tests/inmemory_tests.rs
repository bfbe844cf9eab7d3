//! Property and behavior tests for the in-memory vector store.

use proptest::prelude::*;
use rag_pipeline::document::Document;
use rag_pipeline::error::RagError;
use rag_pipeline::inmemory::InMemoryVectorStore;
use rag_pipeline::vectorstore::VectorStore;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            embeddings in proptest::collection::vec(arb_normalized_embedding(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, stored) = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.recreate_collection("test", DIM).await.unwrap();

                let documents: Vec<Document> = embeddings
                    .iter()
                    .enumerate()
                    .map(|(id, _)| Document { id: id as u64, text: format!("document {id}") })
                    .collect();

                store.upload("test", &documents, &embeddings).await.unwrap();
                let results = store.search("test", &query, top_k).await.unwrap();
                (results, documents.len())
            });

            // Result count is at most top_k and at most the number of stored documents
            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= stored);

            // Results are ordered by descending score
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}

#[tokio::test]
async fn recreating_a_collection_discards_prior_contents() {
    let store = InMemoryVectorStore::new();

    store.recreate_collection("docs", 2).await.unwrap();
    let first = vec![Document { id: 0, text: "first corpus".to_string() }];
    store.upload("docs", &first, &[vec![1.0, 0.0]]).await.unwrap();

    store.recreate_collection("docs", 2).await.unwrap();
    let second = vec![Document { id: 0, text: "second corpus".to_string() }];
    store.upload("docs", &second, &[vec![0.0, 1.0]]).await.unwrap();

    let results = store.search("docs", &[0.5, 0.5], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "second corpus");
}

#[tokio::test]
async fn search_on_smaller_collection_returns_fewer_than_top_k() {
    let store = InMemoryVectorStore::new();
    store.recreate_collection("docs", 2).await.unwrap();

    let documents = vec![
        Document { id: 0, text: "a".to_string() },
        Document { id: 1, text: "b".to_string() },
    ];
    store.upload("docs", &documents, &[vec![1.0, 0.0], vec![0.0, 1.0]]).await.unwrap();

    let results = store.search("docs", &[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn upload_length_mismatch_is_rejected() {
    let store = InMemoryVectorStore::new();
    store.recreate_collection("docs", 2).await.unwrap();

    let documents = vec![Document { id: 0, text: "a".to_string() }];
    let err = store.upload("docs", &documents, &[]).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStore { .. }));
}

#[tokio::test]
async fn operations_on_missing_collection_fail() {
    let store = InMemoryVectorStore::new();

    let err = store.search("missing", &[1.0], 1).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStore { .. }));

    let documents = vec![Document { id: 0, text: "a".to_string() }];
    let err = store.upload("missing", &documents, &[vec![1.0]]).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStore { .. }));
}
