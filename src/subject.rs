// Supported subjects: the closed set the CLI accepts.
//
// Each subject names both its concept dictionary (`<subject>.json`) and its
// question file (`<subject>.csv`), so the snake_case name is load-bearing.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// A subject with a concept dictionary and a question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    #[value(name = "ancient_history")]
    AncientHistory,
    #[value(name = "math")]
    Math,
    #[value(name = "physics")]
    Physics,
    #[value(name = "economics")]
    Economics,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::AncientHistory,
        Subject::Math,
        Subject::Physics,
        Subject::Economics,
    ];

    /// The resource name used for this subject's files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::AncientHistory => "ancient_history",
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Economics => "economics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
