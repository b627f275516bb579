// Concept extraction: corpus preparation and the four-tier matching cascade.

pub mod cascade;
pub mod corpus;
pub mod embeddings;
pub mod fuzzy;
pub mod observer;
pub mod tfidf;

pub use cascade::{
    extract_concepts, CascadeThresholds, ConceptExtractor, MatchResult, MatchTier,
    MANUAL_REVIEW_SENTINEL,
};
pub use corpus::PreparedCorpus;
pub use embeddings::Embedder;
pub use observer::{CascadeObserver, NoopObserver, TierEvent, TracingObserver};
