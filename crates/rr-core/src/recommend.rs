//! Recommendation assembly: ranked job list → fixed five-slot record.

use serde::{Deserialize, Serialize};

use crate::matching::{create_matcher, MatcherKind, RankedJob};
use crate::{CandidateProfile, JobPosting};

/// The fixed-shape record handed to the persistence collaborator: candidate
/// name plus up to five ranked job titles, first through fifth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecommendationRecord {
    pub name: String,
    pub first_recommendation: Option<String>,
    pub second_recommendation: Option<String>,
    pub third_recommendation: Option<String>,
    pub fourth_recommendation: Option<String>,
    pub fifth_recommendation: Option<String>,
}

/// Pure, deterministic slot filling: slot `i` holds the i-th ranked title
/// when `i < min(k, ranked.len())`, otherwise `None`.
pub fn assemble(candidate_name: &str, ranked: &[RankedJob], k: usize) -> RecommendationRecord {
    let mut titles = ranked.iter().take(k).map(|job| job.title.clone());

    RecommendationRecord {
        name: candidate_name.to_string(),
        first_recommendation: titles.next(),
        second_recommendation: titles.next(),
        third_recommendation: titles.next(),
        fourth_recommendation: titles.next(),
        fifth_recommendation: titles.next(),
    }
}

/// Convenience wrapper over the whole scoring half: rank the catalog with
/// the selected matcher and assemble the top-k record.
pub fn recommend_jobs(
    profile: &CandidateProfile,
    catalog: &[JobPosting],
    kind: MatcherKind,
    k: usize,
) -> RecommendationRecord {
    let matcher = create_matcher(kind);
    let ranked = matcher.rank(profile, catalog);
    assemble(&profile.name, &ranked, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(titles: &[&str]) -> Vec<RankedJob> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| RankedJob {
                title: t.to_string(),
                score: 1.0 - i as f64 * 0.1,
            })
            .collect()
    }

    #[test]
    fn slots_follow_ranked_order() {
        let record = assemble("Jane", &ranked(&["A", "B", "C", "D", "E"]), 5);

        assert_eq!(record.first_recommendation.as_deref(), Some("A"));
        assert_eq!(record.second_recommendation.as_deref(), Some("B"));
        assert_eq!(record.third_recommendation.as_deref(), Some("C"));
        assert_eq!(record.fourth_recommendation.as_deref(), Some("D"));
        assert_eq!(record.fifth_recommendation.as_deref(), Some("E"));
    }

    #[test]
    fn missing_results_leave_trailing_slots_null() {
        let record = assemble("Jane", &ranked(&["A", "B"]), 5);

        assert_eq!(record.first_recommendation.as_deref(), Some("A"));
        assert_eq!(record.second_recommendation.as_deref(), Some("B"));
        assert_eq!(record.third_recommendation, None);
        assert_eq!(record.fourth_recommendation, None);
        assert_eq!(record.fifth_recommendation, None);
    }

    #[test]
    fn k_zero_yields_all_null_slots() {
        let record = assemble("Jane", &ranked(&["A", "B", "C"]), 0);

        assert_eq!(record.name, "Jane");
        assert_eq!(record.first_recommendation, None);
        assert_eq!(record.fifth_recommendation, None);
    }

    #[test]
    fn k_caps_the_filled_slots() {
        let record = assemble("Jane", &ranked(&["A", "B", "C", "D", "E"]), 2);

        assert_eq!(record.second_recommendation.as_deref(), Some("B"));
        assert_eq!(record.third_recommendation, None);
    }
}
