//! Deterministic multi-factor scoring of (profile, job) pairs.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use super::weights::{Weights, SCORING_WEIGHTS};
use crate::embedding::{self, Embedding, TextEmbedder};
use crate::{CandidateProfile, JobPosting};

/// Per-factor scores for one (profile, job) pair. All values sit in [0, 1];
/// the total is the weighted sum under [`SCORING_WEIGHTS`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreBreakdown {
    pub job_title: String,
    pub total: f64,
    pub education: f64,
    pub degree: f64,
    pub experience: f64,
    pub hard_skill: f64,
    pub soft_skill: f64,
}

impl ScoreBreakdown {
    /// Copy with every score rounded to 3 decimals, the shape handed to
    /// persistence/reporting collaborators.
    pub fn rounded(&self) -> ScoreBreakdown {
        let r3 = |v: f64| (v * 1000.0).round() / 1000.0;
        ScoreBreakdown {
            job_title: self.job_title.clone(),
            total: r3(self.total),
            education: r3(self.education),
            degree: r3(self.degree),
            experience: r3(self.experience),
            hard_skill: r3(self.hard_skill),
            soft_skill: r3(self.soft_skill),
        }
    }
}

/// Logistic experience score: 0.5 at an exact match, saturating toward 1
/// for surplus experience and 0 for a shortfall.
pub fn experience_score(candidate_years: f64, required_years: f64) -> f64 {
    let diff = candidate_years - required_years;
    1.0 / (1.0 + (-0.5 * diff).exp())
}

/// Weighted multi-factor scorer.
pub struct WeightedScorer {
    weights: Weights,
    embedder: &'static dyn TextEmbedder,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedScorer {
    pub fn new() -> Self {
        Self {
            weights: SCORING_WEIGHTS,
            embedder: embedding::global(),
        }
    }

    /// Score a single job against the profile.
    pub fn score_job(&self, profile: &CandidateProfile, job: &JobPosting) -> ScoreBreakdown {
        let education = if profile.education_level.satisfies(job.required_education) {
            1.0
        } else {
            0.0
        };

        let degree = self.text_similarity(&job.required_degree_field, &profile.degree_field);
        let experience =
            experience_score(profile.work_experience_years, job.years_experience_required);
        let hard_skill = self.skill_set_similarity(&job.hard_skills, &profile.hard_skills);
        let soft_skill = self.skill_set_similarity(&job.soft_skills, &profile.soft_skills);

        let w = self.weights;
        let total = w.education * education
            + w.degree * degree
            + w.experience * experience
            + w.hard_skill * hard_skill
            + w.soft_skill * soft_skill;

        ScoreBreakdown {
            job_title: job.title.clone(),
            total,
            education,
            degree,
            experience,
            hard_skill,
            soft_skill,
        }
    }

    /// Score every job and rank by total score, descending. The sort is
    /// stable: ties keep catalog order.
    pub fn rank(&self, profile: &CandidateProfile, catalog: &[JobPosting]) -> Vec<ScoreBreakdown> {
        let mut scored: Vec<ScoreBreakdown> = catalog
            .iter()
            .map(|job| self.score_job(profile, job))
            .collect();

        scored.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        scored
    }

    fn text_similarity(&self, a: &str, b: &str) -> f64 {
        let emb_a = self.embedder.embed_text(a);
        let emb_b = self.embedder.embed_text(b);
        self.embedder.similarity(&emb_a, &emb_b) as f64
    }

    /// Mean-pooled skill-set similarity; 0.0 when either set is empty (no
    /// embedding is computed in that case).
    fn skill_set_similarity(&self, job_skills: &BTreeSet<String>, profile_skills: &BTreeSet<String>) -> f64 {
        let (Some(job_emb), Some(profile_emb)) =
            (self.embed_set(job_skills), self.embed_set(profile_skills))
        else {
            return 0.0;
        };
        self.embedder.similarity(&job_emb, &profile_emb) as f64
    }

    fn embed_set(&self, skills: &BTreeSet<String>) -> Option<Embedding> {
        let phrases: Vec<&str> = skills.iter().map(String::as_str).collect();
        self.embedder.embed_phrase_set(&phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EducationLevel;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jane Doe".into(),
            education_level: EducationLevel::Bachelor,
            degree_field: "Data Science".into(),
            work_experience_years: 2.0,
            hard_skills: ["python".to_string(), "sql".to_string()].into_iter().collect(),
            soft_skills: ["teamwork".to_string()].into_iter().collect(),
            ..Default::default()
        }
    }

    fn job(title: &str, required: EducationLevel, years: f64) -> JobPosting {
        JobPosting {
            title: title.into(),
            industry: "Tech".into(),
            hard_skills: ["python".to_string(), "sql".to_string()].into_iter().collect(),
            soft_skills: ["teamwork".to_string()].into_iter().collect(),
            required_degree_field: "Data Science".into(),
            required_education: required,
            years_experience_required: years,
        }
    }

    #[test]
    fn education_score_is_binary_on_ordinals() {
        let scorer = WeightedScorer::new();
        let p = profile();

        let met = scorer.score_job(&p, &job("A", EducationLevel::Diploma, 0.0));
        let unmet = scorer.score_job(&p, &job("B", EducationLevel::Phd, 0.0));

        assert_eq!(met.education, 1.0);
        assert_eq!(unmet.education, 0.0);
    }

    #[test]
    fn experience_score_is_half_at_exact_match() {
        assert!((experience_score(3.0, 3.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn experience_score_is_strictly_increasing_in_surplus() {
        let mut last = experience_score(0.0, 10.0);
        for years in 1..=20 {
            let next = experience_score(years as f64, 10.0);
            assert!(next > last);
            last = next;
        }
        assert!(experience_score(100.0, 0.0) > 0.999);
        assert!(experience_score(0.0, 100.0) < 0.001);
    }

    #[test]
    fn empty_skill_set_scores_zero_similarity() {
        let scorer = WeightedScorer::new();
        let mut p = profile();
        p.hard_skills.clear();

        let breakdown = scorer.score_job(&p, &job("A", EducationLevel::Bachelor, 0.0));

        assert_eq!(breakdown.hard_skill, 0.0);
    }

    #[test]
    fn identical_skill_sets_score_full_similarity() {
        let scorer = WeightedScorer::new();
        let breakdown = scorer.score_job(&profile(), &job("A", EducationLevel::Bachelor, 2.0));

        assert!((breakdown.hard_skill - 1.0).abs() < 1e-5);
        assert!((breakdown.soft_skill - 1.0).abs() < 1e-5);
    }

    #[test]
    fn total_is_a_convex_combination() {
        let scorer = WeightedScorer::new();
        let breakdown = scorer.score_job(&profile(), &job("A", EducationLevel::Bachelor, 2.0));

        assert!(breakdown.total >= 0.0 && breakdown.total <= 1.0);
        for sub in [
            breakdown.education,
            breakdown.degree,
            breakdown.experience,
            breakdown.hard_skill,
            breakdown.soft_skill,
        ] {
            assert!((0.0..=1.0).contains(&sub));
        }
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let scorer = WeightedScorer::new();
        let p = profile();
        let jobs = vec![
            job("Weak Fit", EducationLevel::Phd, 10.0),
            job("Tie One", EducationLevel::Bachelor, 2.0),
            job("Tie Two", EducationLevel::Bachelor, 2.0),
        ];

        let ranked = scorer.rank(&p, &jobs);

        assert_eq!(ranked[0].job_title, "Tie One");
        assert_eq!(ranked[1].job_title, "Tie Two");
        assert_eq!(ranked[2].job_title, "Weak Fit");
        assert!(ranked[0].total >= ranked[1].total);
    }

    #[test]
    fn rounded_breakdown_has_three_decimals() {
        let b = ScoreBreakdown {
            job_title: "A".into(),
            total: 0.123456,
            education: 1.0,
            degree: 0.98765,
            experience: 0.5,
            hard_skill: 0.0,
            soft_skill: 0.33333,
        };

        let r = b.rounded();
        assert_eq!(r.total, 0.123);
        assert_eq!(r.degree, 0.988);
        assert_eq!(r.soft_skill, 0.333);
    }
}
