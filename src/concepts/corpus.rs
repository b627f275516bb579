// Per-subject artifacts shared by every extraction call.
//
// Built once, before any question is processed, and never mutated after.
// The tag corpus is sorted so that every index-based tie-break downstream
// (semantic top-k, TF-IDF vocabulary) is deterministic.

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::embeddings::Embedder;
use super::tfidf::TfIdfVectorizer;
use crate::dictionary::ConceptDictionary;

/// The dictionary plus everything derived from it for one run.
#[derive(Debug, Clone)]
pub struct PreparedCorpus {
    dictionary: ConceptDictionary,
    /// Sorted, deduplicated concept tags
    tags: Vec<String>,
    /// One embedding per tag, same order as `tags`
    tag_embeddings: Vec<Vec<f64>>,
    /// TF-IDF model fitted on `tags`
    vectorizer: TfIdfVectorizer,
}

impl PreparedCorpus {
    /// Derive the tag corpus, embed it, and fit the term-weighting model.
    pub fn prepare(dictionary: ConceptDictionary, embedder: &dyn Embedder) -> Result<Self> {
        let tags = dictionary.all_tags();

        let tag_embeddings = embedder
            .embed_batch(&tags)
            .context("Failed to embed concept tags")?;
        if tag_embeddings.len() != tags.len() {
            anyhow::bail!(
                "Embedder returned {} vectors for {} concept tags",
                tag_embeddings.len(),
                tags.len()
            );
        }

        let vectorizer = TfIdfVectorizer::fit(&tags)?;
        if vectorizer.vocabulary_len() == 0 {
            warn!("Concept tags produced an empty TF-IDF vocabulary; term-weight fallback disabled");
        }

        info!(
            keywords = dictionary.len(),
            tags = tags.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "Prepared concept corpus"
        );

        Ok(Self {
            dictionary,
            tags,
            tag_embeddings,
            vectorizer,
        })
    }

    pub fn dictionary(&self) -> &ConceptDictionary {
        &self.dictionary
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn tag_embeddings(&self) -> &[Vec<f64>] {
        &self.tag_embeddings
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }
}
