//! Field extraction pipeline: raw resume text → [`CandidateProfile`].
//!
//! Every extractor is a pure function of `(text, fixed reference data)`
//! returning an `Option`; a miss populates the profile with a default value.
//! Only a panic somewhere inside the run is terminal, surfaced as
//! [`ExtractError::Aborted`] by the outer guard.

pub mod experience;
pub mod skills;

use std::panic::{self, AssertUnwindSafe};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, error};

use crate::embedding::{self, TextEmbedder};
use crate::lexicon::SkillLexicon;
use crate::{CandidateProfile, EducationLevel};

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The pipeline hit an unexpected error; no information could be
    /// extracted. Terminal for this resume.
    #[error("resume extraction aborted: {0}")]
    Aborted(String),
}

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    // International-ish: optional country code, 2-3 digit groups, separators.
    static ref CONTACT_RE: Regex =
        Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\d{3,4}[-.\s]?){2,3}\d{2,4}").unwrap();
    static ref DEGREE_FIELD_RE: Regex = Regex::new(
        r"(?i)(?:Bachelor|Bachelors|Bachelor's|Master|Masters|Master's|PhD|Higher Diploma|Advanced Diploma|Diploma|Polytechnic)[^.\n]*? in ([A-Za-z &\-/]+)"
    )
    .unwrap();
    static ref GPA_RE: Regex = Regex::new(r"(?i)GPA\s*[:\-]?\s*(\d\.\d{1,2})").unwrap();
    // Ordered most → least specific; the plain "Honours" arm catches last.
    static ref HONOURS_RE: Regex = Regex::new(
        r"(?i)(Honours with Highest Distinction|Honors with Highest Distinction|Honours with Distinction|Honors with Distinction|Honours with Merit|Honors with Merit|Honours|Honors|Graduated with Merit|with Merit)"
    )
    .unwrap();
    static ref NO_HONOURS_RE: Regex =
        Regex::new(r"(?i)(without Honours|without Honors|non-honours|non-honors)").unwrap();
}

/// First non-blank line, accepted as a name only when it has at least two
/// whitespace tokens and every token starting with a letter is capitalized.
pub fn extract_name(text: &str) -> Option<String> {
    let first_line = text.lines().map(str::trim).find(|line| !line.is_empty())?;

    let tokens: Vec<&str> = first_line.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let capitalized = tokens.iter().all(|token| {
        let first = token.chars().next().unwrap_or(' ');
        !first.is_alphabetic() || first.is_uppercase()
    });

    if capitalized {
        Some(first_line.to_string())
    } else {
        None
    }
}

/// All `local@domain.tld` substrings, in document order.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First phone-like digit-group substring.
pub fn extract_contact(text: &str) -> Option<String> {
    CONTACT_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Case-insensitive substring ladder, evaluated top-down; first rung wins.
pub fn extract_education_level(text: &str) -> Option<EducationLevel> {
    let lower = text.to_lowercase();
    let contains_any = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    if contains_any(&["phd", "doctor of philosophy"]) {
        Some(EducationLevel::Phd)
    } else if contains_any(&["master", "msc"]) {
        Some(EducationLevel::Master)
    } else if contains_any(&["bachelor", "bsc"]) {
        Some(EducationLevel::Bachelor)
    } else if contains_any(&["polytechnic", "poly"]) {
        Some(EducationLevel::Polytechnic)
    } else if lower.contains("diploma") {
        Some(EducationLevel::Diploma)
    } else if contains_any(&["high school", "junior college", "jc"]) {
        Some(EducationLevel::HighSchool)
    } else {
        None
    }
}

/// Noun phrase after a degree keyword and "in", e.g.
/// "Bachelor of Science in Data Science" → "Data Science".
pub fn extract_degree_field(text: &str) -> Option<String> {
    DEGREE_FIELD_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Three-tier cascade: numeric GPA, then honours/merit classification, then
/// graduation without honours. First matching tier returns immediately.
pub fn extract_gpa_or_classification(text: &str) -> Option<String> {
    if let Some(caps) = GPA_RE.captures(text) {
        return Some(caps[1].to_string());
    }

    if let Some(caps) = HONOURS_RE.captures(text) {
        return Some(caps[1].to_string());
    }

    if NO_HONOURS_RE.is_match(text) {
        return Some("Graduated without Honours".to_string());
    }

    None
}

/// Best fuzzy match of the text against the curated institution list,
/// returned only when the partial ratio clears 80/100.
pub fn extract_university(text: &str, lexicon: &SkillLexicon) -> Option<String> {
    const SCORE_CUTOFF: f64 = 80.0;

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for choice in lexicon.universities() {
        let score = partial_ratio(text, &words, choice);
        let beats = best.map(|(_, s)| score > s).unwrap_or(true);
        if score >= SCORE_CUTOFF && beats {
            best = Some((choice, score));
        }
    }

    best.map(|(name, _)| name.to_string())
}

/// Partial-ratio fuzzy score in [0, 100]: the best normalized Levenshtein
/// similarity of `choice` against any word-aligned window of the text.
/// Containment short-circuits to 100.
fn partial_ratio(text: &str, text_words: &[&str], choice: &str) -> f64 {
    if choice.is_empty() {
        return 0.0;
    }
    if text.contains(choice) {
        return 100.0;
    }

    let choice_len = choice.split_whitespace().count().max(1);
    if text_words.len() < choice_len {
        return strsim::normalized_levenshtein(&text_words.join(" "), choice) * 100.0;
    }

    let mut best = 0.0f64;
    for window in text_words.windows(choice_len) {
        let candidate = window.join(" ");
        let score = strsim::normalized_levenshtein(&candidate, choice) * 100.0;
        if score > best {
            best = score;
            if best >= 99.99 {
                break;
            }
        }
    }
    best
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Similarity floor for counting a lexicon term as a soft skill.
    pub soft_skill_threshold: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            soft_skill_threshold: 0.70,
        }
    }
}

/// Read extraction settings from the environment, with defaults.
pub fn load_config_from_env() -> ExtractionConfig {
    let defaults = ExtractionConfig::default();
    ExtractionConfig {
        soft_skill_threshold: std::env::var("RR_SOFT_SKILL_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.soft_skill_threshold),
    }
}

/// Ordered set of independent field extractors plus the outer guard.
pub struct FieldExtractionPipeline {
    lexicon: SkillLexicon,
    config: ExtractionConfig,
}

impl Default for FieldExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractionPipeline {
    pub fn new() -> Self {
        Self::with_lexicon(SkillLexicon::builtin().clone())
    }

    pub fn with_lexicon(lexicon: SkillLexicon) -> Self {
        Self {
            lexicon,
            config: load_config_from_env(),
        }
    }

    /// Run every extractor over the text and assemble the profile.
    ///
    /// Individual misses populate defaults; any panic inside the run is
    /// caught at this boundary and mapped to [`ExtractError::Aborted`], so
    /// the caller never sees a half-built profile.
    pub fn extract(&self, text: &str) -> Result<CandidateProfile, ExtractError> {
        crate::logging::install_panic_capture();
        let embedder = embedding::global();
        run_guarded(|| self.run_extractors(text, embedder))
    }

    fn run_extractors(&self, text: &str, embedder: &dyn TextEmbedder) -> CandidateProfile {
        let profile = CandidateProfile {
            name: extract_name(text).unwrap_or_default(),
            emails: extract_emails(text),
            contact: extract_contact(text).unwrap_or_default(),
            education_level: extract_education_level(text).unwrap_or_default(),
            degree_field: extract_degree_field(text).unwrap_or_default(),
            university: extract_university(text, &self.lexicon),
            gpa_or_classification: extract_gpa_or_classification(text),
            work_experience_years: experience::extract_work_experience_years(text),
            hard_skills: skills::extract_hard_skills(text, &self.lexicon),
            soft_skills: skills::extract_soft_skills(
                text,
                &self.lexicon,
                embedder,
                self.config.soft_skill_threshold,
            ),
        };

        debug!(
            name = %profile.name,
            emails = profile.emails.len(),
            hard_skills = profile.hard_skills.len(),
            soft_skills = profile.soft_skills.len(),
            "extraction run complete"
        );

        profile
    }
}

fn run_guarded<F>(run: F) -> Result<CandidateProfile, ExtractError>
where
    F: FnOnce() -> CandidateProfile,
{
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(profile) => Ok(profile),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(reason = %reason, "extraction pipeline aborted");
            Err(ExtractError::Aborted(reason))
        }
    }
}
