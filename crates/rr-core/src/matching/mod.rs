//! The two interchangeable matchers and the seam they share.

pub mod cluster;
pub mod scoring;
pub mod weights;

use serde::Serialize;

pub use cluster::{ClusterConfig, EmbeddingClusterMatcher};
pub use scoring::{ScoreBreakdown, WeightedScorer};
pub use weights::SCORING_WEIGHTS;

use crate::{CandidateProfile, JobPosting};

/// One entry of a ranked job list, highest score first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RankedJob {
    pub title: String,
    pub score: f64,
}

/// Polymorphic scorer seam: both matchers rank a read-only catalog against
/// one profile, and neither mutates its inputs.
pub trait JobMatcher: Send + Sync {
    /// Implementation name recorded alongside results ("weighted", "cluster").
    fn name(&self) -> &'static str;

    fn rank(&self, profile: &CandidateProfile, catalog: &[JobPosting]) -> Vec<RankedJob>;
}

impl JobMatcher for WeightedScorer {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn rank(&self, profile: &CandidateProfile, catalog: &[JobPosting]) -> Vec<RankedJob> {
        WeightedScorer::rank(self, profile, catalog)
            .into_iter()
            .map(|breakdown| RankedJob {
                title: breakdown.job_title,
                score: breakdown.total,
            })
            .collect()
    }
}

impl JobMatcher for EmbeddingClusterMatcher {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn rank(&self, profile: &CandidateProfile, catalog: &[JobPosting]) -> Vec<RankedJob> {
        EmbeddingClusterMatcher::rank(self, profile, catalog)
    }
}

/// Explicit matcher selection; no free-form string branching in the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatcherKind {
    #[default]
    Weighted,
    Cluster,
}

impl MatcherKind {
    /// Selection from the `RR_MATCHER` environment variable; anything other
    /// than "cluster" falls back to the weighted matcher.
    pub fn from_env() -> Self {
        match std::env::var("RR_MATCHER").as_deref() {
            Ok("cluster") => MatcherKind::Cluster,
            _ => MatcherKind::Weighted,
        }
    }
}

/// Matcher factory.
pub fn create_matcher(kind: MatcherKind) -> Box<dyn JobMatcher> {
    match kind {
        MatcherKind::Weighted => Box::new(WeightedScorer::new()),
        MatcherKind::Cluster => Box::new(EmbeddingClusterMatcher::from_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_the_requested_variant() {
        assert_eq!(create_matcher(MatcherKind::Weighted).name(), "weighted");
        assert_eq!(create_matcher(MatcherKind::Cluster).name(), "cluster");
    }
}
