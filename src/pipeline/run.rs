// The per-subject batch run.
//
// Callers finish setup (dictionary, corpus preparation, question reading)
// before calling `run`, so a setup failure never leaves partial output
// behind. Extraction fans out over a bounded pool of blocking
// tasks; results are buffered back into input order and written as soon as
// each one is next in line, so already-printed lines are final.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::info;

use crate::concepts::{ConceptExtractor, MatchResult, MatchTier};
use crate::output::{self, OutputFormat};
use crate::questions::QuestionRecord;
use crate::subject::Subject;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub subject: Subject,
    /// Questions extracted in parallel (at least 1)
    pub concurrency: usize,
    pub format: OutputFormat,
}

/// What a finished run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub questions: usize,
    pub by_tier: BTreeMap<MatchTier, usize>,
}

impl RunSummary {
    fn record(&mut self, result: &MatchResult) {
        self.questions += 1;
        *self.by_tier.entry(result.tier).or_insert(0) += 1;
    }

    pub fn count(&self, tier: MatchTier) -> usize {
        self.by_tier.get(&tier).copied().unwrap_or(0)
    }
}

/// Extract concepts for every question and write one line per question.
///
/// `questions` must already be fully read. Output goes to `out` in input
/// order regardless of `concurrency`.
pub async fn run<W: Write>(
    options: &RunOptions,
    questions: Vec<QuestionRecord>,
    extractor: &ConceptExtractor,
    out: &mut W,
) -> Result<RunSummary> {
    output::write_header(out, options.format, questions.len(), options.subject)?;

    info!(
        subject = %options.subject,
        questions = questions.len(),
        concurrency = options.concurrency,
        "Extracting concepts"
    );

    let mut results = stream::iter(questions.into_iter().map(|record| {
        let extractor = extractor.clone();
        async move {
            let result = tokio::task::spawn_blocking({
                let question = record.question_text.clone();
                move || extractor.extract(&question)
            })
            .await
            .context("Concept extraction task panicked")?;
            Ok::<_, anyhow::Error>((record, result))
        }
    }))
    .buffered(options.concurrency.max(1));

    let mut summary = RunSummary::default();
    let mut index = 0;
    while let Some(item) = results.next().await {
        let (record, result) = item?;
        index += 1;
        summary.record(&result);
        output::write_result(out, options.format, index, &record, &result)?;
    }

    out.flush().context("Failed to flush output")?;

    info!(
        questions = summary.questions,
        manual_review = summary.count(MatchTier::ManualReview),
        "Run complete"
    );

    Ok(summary)
}
