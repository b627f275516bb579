// Colored terminal summary shown after a text-mode run.

use colored::Colorize;

use crate::concepts::MatchTier;
use crate::pipeline::RunSummary;

/// Print how many questions each tier resolved.
///
/// Goes to stderr: stdout holds only the result lines.
pub fn display_tier_summary(summary: &RunSummary) {
    if summary.questions == 0 {
        return;
    }

    eprintln!();
    eprintln!("{}", "=== Tier breakdown ===".bold());

    for tier in [
        MatchTier::Keyword,
        MatchTier::Fuzzy,
        MatchTier::Semantic,
        MatchTier::TermWeight,
        MatchTier::ManualReview,
    ] {
        let count = summary.count(tier);
        let line = format!("  {:<14} {:>5}", tier.as_str(), count);
        let colored_line = match tier {
            MatchTier::Keyword | MatchTier::Fuzzy => line.bright_green(),
            MatchTier::Semantic => line.bright_blue(),
            MatchTier::TermWeight => line.bright_yellow(),
            MatchTier::ManualReview if count > 0 => line.red(),
            MatchTier::ManualReview => line.dimmed(),
        };
        eprintln!("{colored_line}");
    }

    let review = summary.count(MatchTier::ManualReview);
    if review > 0 {
        eprintln!(
            "  {} {} of {} questions need manual review",
            "!".red().bold(),
            review,
            summary.questions
        );
    }
}
