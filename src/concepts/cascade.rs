// The concept-extraction cascade.
//
// Four tiers, tried in order, most precise first:
//   1. keyword: a dictionary keyword appears verbatim in the question
//   2. fuzzy: a keyword nearly appears (partial ratio above threshold)
//   3. semantic: a concept tag is close to the question in embedding space
//   4. term_weight: the question's heaviest TF-IDF terms from the tag vocabulary
// The first tier that finds anything wins. If none do, the result is the
// manual-review sentinel. Extraction never fails: an embedding error on the
// question just means tier 3 finds nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::corpus::PreparedCorpus;
use super::embeddings::{top_k_similar, Embedder};
use super::fuzzy::partial_ratio;
use super::observer::{CascadeObserver, TierEvent};

/// Returned alone when no tier finds a confident match.
pub const MANUAL_REVIEW_SENTINEL: &str = "[Manual Review Needed]";

/// Which tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Keyword,
    Fuzzy,
    Semantic,
    /// Word-level suggestions from the tag vocabulary, not concept tags
    TermWeight,
    ManualReview,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Keyword => "keyword",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::Semantic => "semantic",
            MatchTier::TermWeight => "term_weight",
            MatchTier::ManualReview => "manual_review",
        }
    }

    /// True for tiers whose output is drawn from the dictionary's tags.
    pub fn yields_concept_tags(&self) -> bool {
        matches!(
            self,
            MatchTier::Keyword | MatchTier::Fuzzy | MatchTier::Semantic
        )
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of running the cascade on one question.
///
/// `concepts` is never empty. For `ManualReview` it holds exactly the
/// sentinel; for every other tier it never contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub tier: MatchTier,
    pub concepts: BTreeSet<String>,
}

impl MatchResult {
    fn from_tier(tier: MatchTier, concepts: BTreeSet<String>) -> Self {
        debug_assert!(!concepts.is_empty());
        Self { tier, concepts }
    }

    pub fn manual_review() -> Self {
        Self {
            tier: MatchTier::ManualReview,
            concepts: BTreeSet::from([MANUAL_REVIEW_SENTINEL.to_string()]),
        }
    }

    pub fn needs_review(&self) -> bool {
        self.tier == MatchTier::ManualReview
    }

    /// Concepts in sorted order, comma-joined.
    pub fn joined(&self) -> String {
        self.concepts
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Tunable cut-offs for each tier.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeThresholds {
    /// Fuzzy partial ratio must be strictly above this (0-100)
    pub fuzzy_min_ratio: u8,
    /// How many nearest tags to consider in the semantic tier
    pub semantic_top_k: usize,
    /// Minimum cosine similarity for a semantic match
    pub semantic_min_similarity: f64,
    /// How many heaviest terms to consider in the term-weight tier
    pub term_top_n: usize,
    /// Minimum TF-IDF weight for a term suggestion
    pub term_min_weight: f64,
}

impl Default for CascadeThresholds {
    fn default() -> Self {
        Self {
            fuzzy_min_ratio: 85,
            semantic_top_k: 3,
            semantic_min_similarity: 0.75,
            term_top_n: 5,
            term_min_weight: 0.4,
        }
    }
}

/// Run the cascade for one question against a prepared corpus.
pub fn extract_concepts(
    question: &str,
    corpus: &PreparedCorpus,
    embedder: &dyn Embedder,
    thresholds: &CascadeThresholds,
    observer: &dyn CascadeObserver,
) -> MatchResult {
    let q_lower = question.to_lowercase();

    let keyword = keyword_matches(&q_lower, corpus);
    if let Some(result) = settle(question, observer, MatchTier::Keyword, keyword) {
        return result;
    }

    let fuzzy = fuzzy_matches(&q_lower, corpus, thresholds.fuzzy_min_ratio);
    if let Some(result) = settle(question, observer, MatchTier::Fuzzy, fuzzy) {
        return result;
    }

    let semantic = semantic_matches(question, corpus, embedder, thresholds);
    if let Some(result) = settle(question, observer, MatchTier::Semantic, semantic) {
        return result;
    }

    // Transform only: the vocabulary was fixed when the corpus was prepared.
    let terms = corpus
        .vectorizer()
        .top_terms(question, thresholds.term_top_n, thresholds.term_min_weight);
    if let Some(result) = settle(question, observer, MatchTier::TermWeight, terms) {
        return result;
    }

    observer.on_tier(
        question,
        &TierEvent {
            tier: MatchTier::ManualReview,
            matches: Vec::new(),
        },
    );
    MatchResult::manual_review()
}

/// Report a tier attempt and turn a non-empty one into the final result.
fn settle(
    question: &str,
    observer: &dyn CascadeObserver,
    tier: MatchTier,
    matches: Vec<(String, f64)>,
) -> Option<MatchResult> {
    let event = TierEvent { tier, matches };
    observer.on_tier(question, &event);

    if !event.matched() {
        return None;
    }
    let concepts = event.matches.into_iter().map(|(label, _)| label).collect();
    Some(MatchResult::from_tier(tier, concepts))
}

/// Tier 1: tags of every keyword contained in the lower-cased question.
fn keyword_matches(q_lower: &str, corpus: &PreparedCorpus) -> Vec<(String, f64)> {
    let mut found = BTreeSet::new();
    for (keyword, tags) in corpus.dictionary().iter() {
        if q_lower.contains(keyword) {
            found.extend(tags.iter().cloned());
        }
    }
    found.into_iter().map(|tag| (tag, 1.0)).collect()
}

/// Tier 2: tags of every keyword whose partial ratio beats the threshold.
///
/// A tag reached through several keywords keeps its best ratio.
fn fuzzy_matches(q_lower: &str, corpus: &PreparedCorpus, min_ratio: u8) -> Vec<(String, f64)> {
    let mut found: BTreeMap<String, f64> = BTreeMap::new();
    for (keyword, tags) in corpus.dictionary().iter() {
        let ratio = partial_ratio(keyword, q_lower);
        if ratio > min_ratio {
            for tag in tags {
                let best = found.entry(tag.clone()).or_insert(0.0);
                *best = best.max(ratio as f64);
            }
        }
    }
    found.into_iter().collect()
}

/// Tier 3: the nearest tags in embedding space above the similarity floor.
fn semantic_matches(
    question: &str,
    corpus: &PreparedCorpus,
    embedder: &dyn Embedder,
    thresholds: &CascadeThresholds,
) -> Vec<(String, f64)> {
    if corpus.tags().is_empty() {
        return Vec::new();
    }

    let q_embedding = match embedder.embed(question) {
        Ok(v) => v,
        Err(e) => {
            warn!(question, error = %e, "Failed to embed question, skipping semantic tier");
            return Vec::new();
        }
    };

    top_k_similar(&q_embedding, corpus.tag_embeddings(), thresholds.semantic_top_k)
        .into_iter()
        .filter(|(_, score)| *score >= thresholds.semantic_min_similarity)
        .map(|(i, score)| (corpus.tags()[i].clone(), score))
        .collect()
}

/// Everything the cascade needs, bundled for sharing across workers.
#[derive(Clone)]
pub struct ConceptExtractor {
    corpus: Arc<PreparedCorpus>,
    embedder: Arc<dyn Embedder>,
    thresholds: CascadeThresholds,
    observer: Arc<dyn CascadeObserver>,
}

impl ConceptExtractor {
    pub fn new(
        corpus: Arc<PreparedCorpus>,
        embedder: Arc<dyn Embedder>,
        thresholds: CascadeThresholds,
        observer: Arc<dyn CascadeObserver>,
    ) -> Self {
        Self {
            corpus,
            embedder,
            thresholds,
            observer,
        }
    }

    pub fn extract(&self, question: &str) -> MatchResult {
        extract_concepts(
            question,
            &self.corpus,
            self.embedder.as_ref(),
            &self.thresholds,
            self.observer.as_ref(),
        )
    }
}
