// Local model files: where they live and how to fetch them.

pub mod download;
