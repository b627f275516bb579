use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default number of questions extracted in parallel.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual values after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<subject>.json` concept dictionaries
    pub dictionary_dir: PathBuf,
    /// Directory holding `<subject>.csv` question files
    pub data_dir: PathBuf,
    /// Directory containing the embedding model files
    pub model_dir: PathBuf,
    /// How many questions to extract in parallel
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables. Every value has a default.
    pub fn load() -> Result<Self> {
        let concurrency = match env::var("CONCEPT_MAPPER_CONCURRENCY") {
            Ok(raw) => parse_concurrency(&raw)?,
            Err(_) => DEFAULT_CONCURRENCY,
        };

        Ok(Self {
            dictionary_dir: env::var("CONCEPT_MAPPER_DICTIONARY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("concept_dictionaries")),
            data_dir: env::var("CONCEPT_MAPPER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            model_dir: env::var("CONCEPT_MAPPER_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate::models::download::default_model_dir()),
            concurrency,
        })
    }

    /// Check that the embedding model has been downloaded.
    /// Call this before loading the embedder.
    pub fn require_embedding_model(&self) -> Result<()> {
        if !crate::models::download::embedding_files_present(&self.model_dir) {
            anyhow::bail!(
                "Embedding model files not found in {}\n\
                 Run `concept-mapper --download-model --subject <subject>` to fetch them,\n\
                 or set CONCEPT_MAPPER_MODEL_DIR to an existing model directory.",
                crate::models::download::embedding_model_dir(&self.model_dir).display()
            );
        }
        Ok(())
    }
}

/// Parse a worker count; zero is rejected.
fn parse_concurrency(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("CONCEPT_MAPPER_CONCURRENCY must be a number, got '{raw}'"))?;
    if value == 0 {
        anyhow::bail!("CONCEPT_MAPPER_CONCURRENCY must be at least 1");
    }
    Ok(value)
}
