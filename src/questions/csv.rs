// CSV question files: `<data_dir>/<subject>.csv` with a `Question` column.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{QuestionRecord, QuestionSource, QuestionSourceError};
use crate::subject::Subject;

/// Where the question file for `subject` lives under `dir`.
pub fn questions_path(dir: &Path, subject: Subject) -> PathBuf {
    dir.join(format!("{}.csv", subject.as_str()))
}

/// Reads questions from a headed CSV file, preserving row order.
pub struct CsvQuestionSource {
    path: PathBuf,
}

impl CsvQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default source for a subject under `data_dir`.
    pub fn for_subject(data_dir: &Path, subject: Subject) -> Self {
        Self::new(questions_path(data_dir, subject))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for CsvQuestionSource {
    fn read_questions(&self) -> Result<Vec<QuestionRecord>, QuestionSourceError> {
        let path = self.path.display().to_string();
        let file = File::open(&self.path).map_err(|e| QuestionSourceError::Io {
            path: path.clone(),
            source: e,
        })?;

        let records = read_records(file, &path)?;
        info!(path = %path, questions = records.len(), "Read question source");
        Ok(records)
    }
}

/// Parse every row of `reader` into a `QuestionRecord`.
///
/// `label` names the source in errors. Row numbers count data rows from 1.
pub fn read_records<R: Read>(
    reader: R,
    label: &str,
) -> Result<Vec<QuestionRecord>, QuestionSourceError> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in csv_reader.deserialize::<QuestionRecord>().enumerate() {
        let record = row.map_err(|e| QuestionSourceError::Malformed {
            path: label.to_string(),
            row: i + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    debug!(source = label, rows = records.len(), "Parsed question rows");
    Ok(records)
}
