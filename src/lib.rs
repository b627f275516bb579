// concept-mapper: map exam questions to curriculum concept tags.
//
// This is the library root. Each module corresponds to one stage of a run:
// load a subject's dictionary, prepare its corpus, read questions, run the
// extraction cascade on each, and report.

pub mod concepts;
pub mod config;
pub mod dictionary;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod questions;
pub mod subject;
