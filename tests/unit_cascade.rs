// Unit tests for the extraction cascade.
//
// Each tier is driven in isolation with a deterministic embedder, and a
// recording observer checks that later tiers never run once an earlier one
// has matched.

mod common;

use std::collections::BTreeSet;

use concept_mapper::concepts::{
    extract_concepts, CascadeThresholds, MatchTier, NoopObserver, MANUAL_REVIEW_SENTINEL,
};

use common::{prepare, QuestionFailingEmbedder, RecordingObserver, TableEmbedder};

const PHYSICS: &str = r#"{
    "newton": ["physics.mechanics"],
    "force": ["physics.mechanics"],
    "snell": ["physics.optics"]
}"#;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Tier 1: exact keyword
// ============================================================

#[test]
fn keyword_matches_union_without_duplicates() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        "What is Newton's second law of motion involving force?",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert_eq!(result.tier, MatchTier::Keyword);
    assert_eq!(result.concepts, set(&["physics.mechanics"]));
    assert_eq!(observer.tiers(), vec![MatchTier::Keyword]);
}

#[test]
fn keyword_match_skips_embedding() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);
    let calls_after_prepare = embedder.calls();

    extract_concepts(
        "Apply a FORCE to the block",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &NoopObserver,
    );

    assert_eq!(
        embedder.calls(),
        calls_after_prepare,
        "Tier 1 hit must not embed the question"
    );
}

#[test]
fn keyword_matches_across_different_tags() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);

    let result = extract_concepts(
        "Use Snell's law and Newton's laws together",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &NoopObserver,
    );

    assert_eq!(result.tier, MatchTier::Keyword);
    assert_eq!(result.concepts, set(&["physics.mechanics", "physics.optics"]));
    assert_eq!(result.joined(), "physics.mechanics, physics.optics");
}

#[test]
fn keyword_match_is_case_insensitive() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(r#"{"Pythagoras": ["math.geometry"]}"#, &embedder);

    let result = extract_concepts(
        "State the PYTHAGORAS theorem",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &NoopObserver,
    );

    assert_eq!(result.tier, MatchTier::Keyword);
    assert_eq!(result.concepts, set(&["math.geometry"]));
}

// ============================================================
// Tier 2: fuzzy
// ============================================================

#[test]
fn misspelled_keyword_matches_fuzzily() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(r#"{"photosynthesis": ["biology.plants"]}"#, &embedder);
    let calls_after_prepare = embedder.calls();
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        "Explain photosintesis in plants",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert_eq!(result.tier, MatchTier::Fuzzy);
    assert_eq!(result.concepts, set(&["biology.plants"]));
    assert_eq!(observer.tiers(), vec![MatchTier::Keyword, MatchTier::Fuzzy]);
    assert_eq!(embedder.calls(), calls_after_prepare);

    let fuzzy_event = &observer.events()[1];
    assert!(fuzzy_event.matches[0].1 > 85.0);
}

#[test]
fn fuzzy_threshold_is_strict() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(r#"{"photosynthesis": ["biology.plants"]}"#, &embedder);
    let thresholds = CascadeThresholds {
        fuzzy_min_ratio: 100,
        ..CascadeThresholds::default()
    };

    let result = extract_concepts(
        "Explain photosintesis in plants",
        &corpus,
        &embedder,
        &thresholds,
        &NoopObserver,
    );

    assert_ne!(result.tier, MatchTier::Fuzzy);
}

// ============================================================
// Tier 3: semantic
// ============================================================

#[test]
fn semantic_match_returns_close_tags_only() {
    let question = "Why does the moon stay in orbit?";
    let embedder = TableEmbedder::new(
        &[
            ("physics.mechanics", vec![1.0, 0.0, 0.0]),
            ("physics.optics", vec![0.0, 1.0, 0.0]),
            (question, vec![0.9, 0.1, 0.0]),
        ],
        vec![0.0, 0.0, 1.0],
    );
    let corpus = prepare(PHYSICS, &embedder);
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        question,
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert_eq!(result.tier, MatchTier::Semantic);
    assert_eq!(result.concepts, set(&["physics.mechanics"]));
    assert_eq!(
        observer.tiers(),
        vec![MatchTier::Keyword, MatchTier::Fuzzy, MatchTier::Semantic]
    );
}

#[test]
fn semantic_match_keeps_at_most_top_three() {
    let question = "Something about the ancient world";
    let same = vec![1.0, 0.0];
    let embedder = TableEmbedder::new(&[], same);
    let corpus = prepare(
        r#"{
            "pharaoh": ["history.egypt"],
            "senate": ["history.rome"],
            "polis": ["history.greece"],
            "ziggurat": ["history.mesopotamia"],
            "dynasty": ["history.china"]
        }"#,
        &embedder,
    );

    let result = extract_concepts(
        question,
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &NoopObserver,
    );

    assert_eq!(result.tier, MatchTier::Semantic);
    // All five tie at 1.0; corpus order decides.
    assert_eq!(
        result.concepts,
        set(&["history.china", "history.egypt", "history.greece"])
    );
}

#[test]
fn similarity_below_floor_falls_through() {
    let question = "Describe mirrors and images";
    let embedder = TableEmbedder::new(
        &[
            ("physics.mechanics", vec![1.0, 0.0]),
            ("physics.optics", vec![0.0, 1.0]),
            // cos = 0.7 against optics
            (question, vec![0.714_142_842_854_285, 0.7]),
        ],
        vec![0.0, 0.0],
    );
    let corpus = prepare(PHYSICS, &embedder);

    let result = extract_concepts(
        question,
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &NoopObserver,
    );

    assert_ne!(result.tier, MatchTier::Semantic);
}

#[test]
fn question_embedding_failure_is_not_fatal() {
    let corpus = prepare(PHYSICS, &QuestionFailingEmbedder);
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        "Who painted the Mona Lisa?",
        &corpus,
        &QuestionFailingEmbedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert!(result.needs_review());
    assert!(observer.tiers().contains(&MatchTier::Semantic));
}

// ============================================================
// Tier 4: term weighting
// ============================================================

#[test]
fn term_weight_suggests_vocabulary_words() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);
    let vocabulary_before = corpus.vectorizer().vocabulary_len();
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        "What do optics tell us about mirrors?",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert_eq!(result.tier, MatchTier::TermWeight);
    assert_eq!(result.concepts, set(&["optics"]));
    assert!(!result.tier.yields_concept_tags());
    assert_eq!(
        observer.tiers(),
        vec![
            MatchTier::Keyword,
            MatchTier::Fuzzy,
            MatchTier::Semantic,
            MatchTier::TermWeight
        ]
    );
    assert_eq!(corpus.vectorizer().vocabulary_len(), vocabulary_before);
}

#[test]
fn term_weight_caps_at_five_terms() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(
        r#"{
            "supply": ["economics.supply demand", "economics.market equilibrium"],
            "gdp": ["economics.national income", "economics.fiscal policy"],
            "inflation": ["economics.monetary policy"]
        }"#,
        &embedder,
    );
    let thresholds = CascadeThresholds {
        term_min_weight: 0.0,
        ..CascadeThresholds::default()
    };

    let result = extract_concepts(
        "Relate demand, equilibrium, income, fiscal and monetary choices",
        &corpus,
        &embedder,
        &thresholds,
        &NoopObserver,
    );

    assert_eq!(result.tier, MatchTier::TermWeight);
    assert!(result.concepts.len() <= 5, "got {:?}", result.concepts);
}

// ============================================================
// Sentinel
// ============================================================

#[test]
fn unrelated_question_needs_manual_review() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);
    let observer = RecordingObserver::default();

    let result = extract_concepts(
        "Who painted the Mona Lisa?",
        &corpus,
        &embedder,
        &CascadeThresholds::default(),
        &observer,
    );

    assert!(result.needs_review());
    assert_eq!(result.concepts, set(&[MANUAL_REVIEW_SENTINEL]));
    assert_eq!(observer.tiers().last(), Some(&MatchTier::ManualReview));
    assert_eq!(observer.tiers().len(), 5);
}

#[test]
fn results_are_never_empty() {
    let embedder = TableEmbedder::blank();
    let corpus = prepare(PHYSICS, &embedder);

    for question in [
        "",
        "   ",
        "Newton",
        "optics",
        "????",
        "Ünïcödé qüestion about nothing",
        "Explain snel's law",
    ] {
        let result = extract_concepts(
            question,
            &corpus,
            &embedder,
            &CascadeThresholds::default(),
            &NoopObserver,
        );
        assert!(!result.concepts.is_empty(), "empty result for {question:?}");
        if !result.needs_review() {
            assert!(!result.concepts.contains(MANUAL_REVIEW_SENTINEL));
        }
    }
}
