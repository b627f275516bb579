// Loads a subject's concept dictionary from `<dir>/<subject>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{ConceptDictionary, DictionaryError};
use crate::subject::Subject;

/// Where the dictionary for `subject` lives under `dir`.
pub fn dictionary_path(dir: &Path, subject: Subject) -> PathBuf {
    dir.join(format!("{}.json", subject.as_str()))
}

/// Read and validate the concept dictionary for `subject`.
///
/// A missing file is `NotFound`; anything that isn't an object of
/// string arrays is `Malformed`.
pub fn load_concept_dictionary(
    dir: &Path,
    subject: Subject,
) -> Result<ConceptDictionary, DictionaryError> {
    let path = dictionary_path(dir, subject);

    let json = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DictionaryError::NotFound {
            subject: subject.to_string(),
            path: path.display().to_string(),
        },
        _ => DictionaryError::Io {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    let dictionary = ConceptDictionary::from_json_str(&path.display().to_string(), &json)?;

    info!(
        subject = %subject,
        keywords = dictionary.len(),
        path = %path.display(),
        "Loaded concept dictionary"
    );

    Ok(dictionary)
}
