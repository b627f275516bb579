// Concept dictionaries: per-subject keyword -> concept tag mappings.

pub mod loader;

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::concepts::MANUAL_REVIEW_SENTINEL;

pub use loader::{dictionary_path, load_concept_dictionary};

/// Errors raised while loading or validating a concept dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// No dictionary resource exists for the subject
    #[error("Concept dictionary not found for subject: {subject} (looked in {path})")]
    NotFound { subject: String, path: String },

    /// The resource exists but is not a `{keyword: [tag, ...]}` object
    #[error("Malformed concept dictionary {source_name}: {message}")]
    Malformed {
        source_name: String,
        message: String,
    },

    /// The resource could not be read
    #[error("Failed to read concept dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A subject's keyword -> tag mapping.
///
/// Keywords are stored lower-cased so containment checks against a
/// lower-cased question are case-insensitive. Every keyword maps to a
/// non-empty set of tags. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptDictionary {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ConceptDictionary {
    /// Build a dictionary from `(keyword, tags)` pairs.
    ///
    /// `source_name` only labels error messages. Keywords that collide after
    /// lower-casing have their tag sets merged.
    pub fn from_entries<K, I, T>(
        source_name: &str,
        entries: impl IntoIterator<Item = (K, I)>,
    ) -> Result<Self, DictionaryError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let malformed = |message: String| DictionaryError::Malformed {
            source_name: source_name.to_string(),
            message,
        };

        let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (keyword, tags) in entries {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(malformed("empty keyword".to_string()));
            }

            let tags: BTreeSet<String> = tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .collect();
            if tags.is_empty() {
                return Err(malformed(format!("keyword '{keyword}' has no tags")));
            }
            if tags.iter().any(|t| t.is_empty()) {
                return Err(malformed(format!("keyword '{keyword}' has an empty tag")));
            }
            if tags.contains(MANUAL_REVIEW_SENTINEL) {
                return Err(malformed(format!(
                    "keyword '{keyword}' uses the reserved tag {MANUAL_REVIEW_SENTINEL}"
                )));
            }

            map.entry(keyword).or_default().extend(tags);
        }

        if map.is_empty() {
            return Err(malformed("dictionary has no entries".to_string()));
        }

        Ok(Self { entries: map })
    }

    /// Parse a dictionary from its JSON text.
    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self, DictionaryError> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| DictionaryError::Malformed {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        Self::from_entries(source_name, raw)
    }

    /// Iterate `(keyword, tags)` in keyword order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sorted, deduplicated union of every tag in the dictionary.
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&String> = self.entries.values().flatten().collect();
        tags.into_iter().cloned().collect()
    }
}
