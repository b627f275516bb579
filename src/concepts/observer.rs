// Cascade observability: one event per tier attempt.
//
// The cascade reports what each tier tried and what it found, with scores,
// to a `CascadeObserver`. The default observer turns these into tracing
// events; tests plug in a recorder to check which tiers actually ran.

use tracing::{debug, warn};

use super::cascade::MatchTier;

/// What a single tier attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TierEvent {
    pub tier: MatchTier,
    /// Matched labels with their tier-specific score: 1.0 for keyword hits,
    /// 0-100 for fuzzy ratios, cosine similarity for semantic matches,
    /// TF-IDF weight for term guesses. Empty when the tier found nothing.
    pub matches: Vec<(String, f64)>,
}

impl TierEvent {
    pub fn matched(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Receives an event for every tier the cascade attempts, in order.
pub trait CascadeObserver: Send + Sync {
    fn on_tier(&self, question: &str, event: &TierEvent);
}

/// Discards every event.
pub struct NoopObserver;

impl CascadeObserver for NoopObserver {
    fn on_tier(&self, _question: &str, _event: &TierEvent) {}
}

/// Logs tier outcomes through `tracing`.
///
/// Confident matches go to debug; term-weight guesses and manual-review
/// results go to warn since a human should look at them.
pub struct TracingObserver;

impl CascadeObserver for TracingObserver {
    fn on_tier(&self, question: &str, event: &TierEvent) {
        match event.tier {
            MatchTier::TermWeight if event.matched() => {
                for (term, weight) in &event.matches {
                    warn!(question, term = %term, weight = *weight, "TF-IDF guess");
                }
            }
            MatchTier::ManualReview => {
                warn!(question, "Manual review needed");
            }
            tier if event.matched() => {
                for (label, score) in &event.matches {
                    debug!(question, tier = %tier, label = %label, score = *score, "Tier matched");
                }
            }
            tier => {
                debug!(question, tier = %tier, "Tier found nothing");
            }
        }
    }
}
