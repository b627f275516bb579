// Question sources: ordered exam questions for a subject.

pub mod csv;

use serde::Deserialize;
use thiserror::Error;

pub use self::csv::{questions_path, CsvQuestionSource};

/// One exam question. Only the question text is used; other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "Question")]
    pub question_text: String,
}

impl QuestionRecord {
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum QuestionSourceError {
    /// The question file does not exist or cannot be opened
    #[error("Failed to open question source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be read as a question record
    #[error("Malformed question source {path} (row {row}): {message}")]
    Malformed {
        path: String,
        row: usize,
        message: String,
    },
}

/// Anything that can supply the questions for a run, in a stable order.
///
/// The whole sequence is read up front so that a bad row aborts the run
/// before any result is printed.
pub trait QuestionSource {
    fn read_questions(&self) -> Result<Vec<QuestionRecord>, QuestionSourceError>;
}
