// Run pipeline: load -> prepare -> extract per question -> report.

pub mod run;
pub mod setup;

pub use run::{run, RunOptions, RunSummary};
pub use setup::{prepare, PreparedRun};
