//! Retrieval integration: the full normalize → build → search pipeline on a
//! deterministic stub provider, plus one real-model test behind --ignored.

mod common;

use common::StubProvider;
use patseek::corpus::{self, extract_title, RawRecord};
use patseek::embedding::{EmbeddingProvider, FastEmbedProvider};
use patseek::index::{IndexError, VectorIndex};
use patseek::retrieval::{SearchError, SearchQuery, SemanticSearcher};
use std::sync::Arc;

fn record(number: &str, title: &str, abstract_text: &str, date: &str) -> RawRecord {
    RawRecord {
        patent_number: Some(number.to_string()),
        patent_title: Some(title.to_string()),
        patent_abstract: Some(abstract_text.to_string()),
        patent_date: Some(date.to_string()),
    }
}

/// The two-record corpus from the retrieval scenario: a neural net patent
/// and a photonic sensor patent.
fn scenario_corpus() -> Vec<RawRecord> {
    vec![
        record("1", "Neural Net Widget", "A device.", "2020-01-01"),
        record("2", "Photonic Sensor", "A sensor.", "2019-05-01"),
    ]
}

fn scenario_searcher() -> SemanticSearcher {
    let normalized = corpus::normalize(&scenario_corpus(), None);
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(
        StubProvider::new(3)
            .with_vector(normalized.documents[0].text.clone(), vec![1.0, 0.0, 0.0])
            .with_vector(normalized.documents[1].text.clone(), vec![0.0, 1.0, 0.0])
            .with_vector("neural network device", vec![0.9, 0.1, 0.0]),
    );
    let index = VectorIndex::build(provider.as_ref(), &normalized.documents, 32).unwrap();
    SemanticSearcher::new(provider, index)
}

#[test]
fn top_result_matches_the_query_topic() {
    let searcher = scenario_searcher();

    let results = searcher
        .search(&SearchQuery::new("neural network device", 1))
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(
        extract_title(&results[0].document.text).unwrap(),
        "neural net widget"
    );
}

#[test]
fn repeated_queries_are_deterministic() {
    let first: Vec<(String, f32)> = scenario_searcher()
        .search(&SearchQuery::new("neural network device", 2))
        .unwrap()
        .into_iter()
        .map(|r| (r.document.id, r.score))
        .collect();

    // a freshly built pipeline must produce the identical ranking
    let second: Vec<(String, f32)> = scenario_searcher()
        .search(&SearchQuery::new("neural network device", 2))
        .unwrap()
        .into_iter()
        .map(|r| (r.document.id, r.score))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn scores_are_monotonically_decreasing() {
    let searcher = scenario_searcher();
    let results = searcher
        .search(&SearchQuery::new("neural network device", 2))
        .unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn limit_is_bounded_by_corpus_size() {
    let searcher = scenario_searcher();

    let results = searcher
        .search(&SearchQuery::new("neural network device", 100))
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn empty_query_is_rejected() {
    let searcher = scenario_searcher();

    let result = searcher.search(&SearchQuery::new("   ", 5));
    assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
}

#[test]
fn zero_limit_is_rejected() {
    let searcher = scenario_searcher();

    let result = searcher.search(&SearchQuery::new("neural network device", 0));
    assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
}

#[test]
fn embedding_failure_is_surfaced_not_swallowed() {
    let searcher = scenario_searcher();

    // no stub vector registered for this query text
    let result = searcher.search(&SearchQuery::new("unregistered query", 5));
    assert!(matches!(result, Err(SearchError::Embedding(_))));
}

#[test]
fn empty_corpus_never_reaches_query() {
    let provider = StubProvider::new(3);
    let result = VectorIndex::build(&provider, &[], 32);
    assert!(matches!(result, Err(IndexError::EmptyCorpus)));
}

#[test]
#[ignore] // Requires model download (~90MB) - run with: cargo test -- --ignored
fn real_model_ranks_the_neural_patent_first() {
    let normalized = corpus::normalize(&scenario_corpus(), None);
    let provider: Arc<dyn EmbeddingProvider> =
        Arc::new(FastEmbedProvider::with_default_model().unwrap());
    let index = VectorIndex::build(provider.as_ref(), &normalized.documents, 32).unwrap();
    let searcher = SemanticSearcher::new(provider, index);

    let results = searcher
        .search(&SearchQuery::new("neural network device", 1))
        .unwrap();

    assert_eq!(
        extract_title(&results[0].document.text).unwrap(),
        "neural net widget"
    );
}
