// Run setup: everything that has to succeed before the first question is
// extracted.
//
// Order is fixed: dictionary, questions, embedder, corpus. Nothing here
// writes to the run's output, so a failure at any step leaves stdout empty.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::concepts::{
    CascadeObserver, CascadeThresholds, ConceptExtractor, Embedder, PreparedCorpus,
};
use crate::config::Config;
use crate::dictionary::load_concept_dictionary;
use crate::questions::{QuestionRecord, QuestionSource};
use crate::subject::Subject;

/// The inputs of a run once setup has finished.
pub struct PreparedRun {
    pub questions: Vec<QuestionRecord>,
    pub extractor: ConceptExtractor,
}

/// Load the dictionary and questions, then build the extractor.
///
/// `load_embedder` runs on the blocking pool together with the tag
/// embedding pass, since both are CPU-bound ONNX work. It is only called
/// once the dictionary and the questions have been read.
pub async fn prepare<L>(
    config: &Config,
    subject: Subject,
    source: &dyn QuestionSource,
    observer: Arc<dyn CascadeObserver>,
    load_embedder: L,
) -> Result<PreparedRun>
where
    L: FnOnce() -> Result<Arc<dyn Embedder>> + Send + 'static,
{
    let dictionary = load_concept_dictionary(&config.dictionary_dir, subject)?;
    let questions = source.read_questions()?;

    let (embedder, corpus) = tokio::task::spawn_blocking(move || -> Result<_> {
        let embedder = load_embedder()?;
        let corpus = PreparedCorpus::prepare(dictionary, embedder.as_ref())?;
        Ok((embedder, corpus))
    })
    .await
    .context("Corpus preparation task panicked")?
    .with_context(|| format!("Failed to prepare concept corpus for subject: {subject}"))?;

    info!(
        %subject,
        questions = questions.len(),
        tags = corpus.tags().len(),
        "Setup complete"
    );

    Ok(PreparedRun {
        questions,
        extractor: ConceptExtractor::new(
            Arc::new(corpus),
            embedder,
            CascadeThresholds::default(),
            observer,
        ),
    })
}
