// TF-IDF term weighting fitted on the concept tag corpus.
//
// Each tag is treated as a tiny document. Tokens are lower-cased runs of two
// or more Unicode word characters, NLTK's English stop words are dropped,
// and both single words and adjacent word pairs become features. IDF is smoothed
// (ln((1 + n) / (1 + df)) + 1) and each transformed row is L2-normalised, so
// a question that hits a single vocabulary term gets weight 1.0 for it.
//
// The vocabulary is fixed at fit time. `transform` only scores a question
// against it, so terms the corpus never used contribute nothing.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;
use stop_words::{get, LANGUAGE};

/// Matches runs of at least two word characters. `\w` is Unicode-aware.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// A fitted TF-IDF model over unigram and bigram features.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// term -> column index, in lexical order
    vocabulary: BTreeMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f64>,
    stop_words: HashSet<String>,
    token_re: Regex,
}

impl TfIdfVectorizer {
    /// Learn the vocabulary and IDF weights from `documents`.
    pub fn fit(documents: &[String]) -> Result<Self> {
        let token_re = Regex::new(TOKEN_PATTERN).context("Invalid token pattern")?;
        let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();

        let mut vectorizer = Self {
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
            stop_words,
            token_re,
        };

        // Document frequency: how many documents contain each term at least once
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let terms: HashSet<String> = vectorizer.analyze(doc).into_iter().collect();
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vectorizer.vocabulary.insert(term, index);
            vectorizer
                .idf
                .push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        Ok(vectorizer)
    }

    /// Number of features learned at fit time.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// The learned feature names in column order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(|k| k.as_str())
    }

    /// Split `text` into the unigram and bigram features the model uses.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let mut features: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        features.extend(tokens.windows(2).map(|pair| pair.join(" ")));
        features
    }

    /// Score `text` against the fitted vocabulary.
    ///
    /// Returns the non-zero weights as `(term, weight)` in vocabulary order.
    /// Out-of-vocabulary terms are ignored; the row is L2-normalised.
    pub fn transform(&self, text: &str) -> Vec<(String, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for feature in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&feature) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let norm: f64 = counts
            .iter()
            .map(|(&i, &tf)| (tf * self.idf[i]).powi(2))
            .sum::<f64>()
            .sqrt();
        if norm == 0.0 {
            return Vec::new();
        }

        self.vocabulary
            .iter()
            .filter_map(|(term, &i)| {
                counts
                    .get(&i)
                    .map(|&tf| (term.clone(), tf * self.idf[i] / norm))
            })
            .collect()
    }

    /// The `top_n` heaviest terms of `text` whose weight is at least `min_weight`.
    ///
    /// Ties are broken lexically so the output is stable.
    pub fn top_terms(&self, text: &str, top_n: usize, min_weight: f64) -> Vec<(String, f64)> {
        let mut weighted = self.transform(text);
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        weighted
            .into_iter()
            .take(top_n)
            .filter(|(_, w)| *w >= min_weight)
            .collect()
    }
}
