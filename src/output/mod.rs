// Output formatting: result lines on stdout, summaries in the terminal.

pub mod terminal;

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::concepts::{MatchResult, MatchTier};
use crate::questions::QuestionRecord;
use crate::subject::Subject;

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `QuestionK: tag1, tag2`
    #[default]
    Text,
    /// One JSON object per line, with the producing tier
    Json,
}

/// One JSON output line.
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    index: usize,
    question: &'a str,
    tier: MatchTier,
    concepts: Vec<&'a str>,
}

/// The plain-text line for question `index` (1-based).
pub fn format_result_line(index: usize, result: &MatchResult) -> String {
    format!("Question{index}: {}", result.joined())
}

/// Write the run header. In JSON mode stdout only carries result objects,
/// so the header goes to stderr instead.
pub fn write_header<W: Write>(
    out: &mut W,
    format: OutputFormat,
    question_count: usize,
    subject: Subject,
) -> Result<()> {
    let line = format!("Loaded {question_count} questions for subject: {subject}");
    match format {
        OutputFormat::Text => writeln!(out, "{line}").context("Failed to write output"),
        OutputFormat::Json => {
            eprintln!("{line}");
            Ok(())
        }
    }
}

/// Write the result for one question.
pub fn write_result<W: Write>(
    out: &mut W,
    format: OutputFormat,
    index: usize,
    record: &QuestionRecord,
    result: &MatchResult,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_result_line(index, result))
            .context("Failed to write output"),
        OutputFormat::Json => {
            let line = JsonLine {
                index,
                question: &record.question_text,
                tier: result.tier,
                concepts: result.concepts.iter().map(|s| s.as_str()).collect(),
            };
            serde_json::to_writer(&mut *out, &line).context("Failed to serialize result")?;
            writeln!(out).context("Failed to write output")
        }
    }
}
