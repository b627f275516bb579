// Shared test doubles: deterministic embedders and a recording observer.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use concept_mapper::concepts::{CascadeObserver, Embedder, MatchTier, PreparedCorpus, TierEvent};
use concept_mapper::dictionary::ConceptDictionary;

/// Returns fixed vectors for known texts and `fallback` for anything else.
/// Counts every text it embeds.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f64>>,
    fallback: Vec<f64>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    pub fn new(entries: &[(&str, Vec<f64>)], fallback: Vec<f64>) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Zero vectors for everything: the semantic tier can never match.
    pub fn blank() -> Self {
        Self::new(&[], vec![0.0, 0.0, 0.0])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for TableEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| self.table.get(t).cloned().unwrap_or_else(|| self.fallback.clone()))
            .collect())
    }
}

/// Embeds tag batches fine but fails on single questions.
pub struct QuestionFailingEmbedder;

impl Embedder for QuestionFailingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn embed(&self, _text: &str) -> Result<Vec<f64>> {
        anyhow::bail!("model unavailable")
    }
}

/// Records which tiers the cascade attempted, in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TierEvent>>,
}

impl RecordingObserver {
    pub fn tiers(&self) -> Vec<MatchTier> {
        self.events.lock().unwrap().iter().map(|e| e.tier).collect()
    }

    pub fn events(&self) -> Vec<TierEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CascadeObserver for RecordingObserver {
    fn on_tier(&self, _question: &str, event: &TierEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn dictionary(json: &str) -> ConceptDictionary {
    ConceptDictionary::from_json_str("test", json).unwrap()
}

pub fn prepare(json: &str, embedder: &dyn Embedder) -> PreparedCorpus {
    PreparedCorpus::prepare(dictionary(json), embedder).unwrap()
}
