use crate::{CandidateProfile, JobPosting};

/// Weighted token fed to the feature-hashing embedder.
#[derive(Debug, Clone)]
pub struct WeightedToken {
    pub token: String,
    pub weight: f32,
}

impl WeightedToken {
    pub fn new(token: impl Into<String>, weight: f32) -> Self {
        Self {
            token: token.into(),
            weight,
        }
    }
}

/// Split free text into lowercase word tokens, weight 1.0 each.
///
/// Surrounding punctuation is stripped but inner characters survive, so
/// "node.js", "c++" and "ci/cd" stay intact while "(Python)," becomes
/// "python".
pub fn tokenize_text(text: &str) -> Vec<WeightedToken> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && !matches!(c, '+' | '#'))
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .map(|token| WeightedToken::new(token, 1.0))
        .collect()
}

/// Composite description of a job posting, in the fixed field order the
/// cluster matcher embeds: title, industry, skills, degree field, education
/// level, years of experience.
pub fn describe_job(job: &JobPosting) -> String {
    format!(
        "Job Title: {}. Industry: {}. Hard Skills required: {}. \
         Soft Skills required: {}. Required degree field: {}. \
         Required education level: {}. Years of experience required: {}.",
        job.title,
        job.industry,
        join(&job.hard_skills),
        join(&job.soft_skills),
        job.required_degree_field,
        job.required_education.label(),
        job.years_experience_required,
    )
}

/// Candidate-side composite analogous to [`describe_job`].
pub fn describe_profile(profile: &CandidateProfile) -> String {
    format!(
        "Candidate profile. Hard Skills: {}. Soft Skills: {}. \
         Degree field: {}. Education level: {}. Work experience: {} years.",
        join(&profile.hard_skills),
        join(&profile.soft_skills),
        profile.degree_field,
        profile.education_level.label(),
        profile.work_experience_years,
    )
}

fn join(set: &std::collections::BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}
