//! External job-catalog input contract.
//!
//! Catalog records arrive from an outside collaborator with their skill
//! columns still encoded as list-literal strings (JSON `["a", "b"]` or the
//! Python-flavored `['a', 'b']`). This module parses them into the typed,
//! normalized [`JobPosting`] shape; it knows nothing about where the records
//! are stored.

use serde::Deserialize;
use thiserror::Error;

use crate::lexicon::normalize_phrase_set;
use crate::{EducationLevel, JobPosting};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("job record {index} has an empty title")]
    MissingTitle { index: usize },
    #[error("job record {index} has a negative years_experience_required ({years})")]
    NegativeExperience { index: usize, years: f64 },
}

/// A catalog record as handed over by the external collaborator, before
/// skill-list parsing and normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawJobRecord {
    pub title: String,
    #[serde(default)]
    pub industry: String,
    /// Serialized list literal, e.g. `["Python", "SQL"]` or `['Python', 'SQL']`.
    #[serde(default)]
    pub hard_skills: String,
    #[serde(default)]
    pub soft_skills: String,
    #[serde(default)]
    pub required_degree_field: String,
    #[serde(default)]
    pub required_education: String,
    #[serde(default)]
    pub years_experience_required: f64,
}

/// Parse one external record into a `JobPosting`.
///
/// Skill lists are parsed leniently, then lowercased/trimmed/deduplicated.
/// Unrecognized education labels map to `EducationLevel::Unknown`.
pub fn parse_job_record(index: usize, raw: &RawJobRecord) -> Result<JobPosting, CatalogError> {
    if raw.title.trim().is_empty() {
        return Err(CatalogError::MissingTitle { index });
    }
    if raw.years_experience_required < 0.0 {
        return Err(CatalogError::NegativeExperience {
            index,
            years: raw.years_experience_required,
        });
    }

    Ok(JobPosting {
        title: raw.title.trim().to_string(),
        industry: raw.industry.trim().to_string(),
        hard_skills: normalize_phrase_set(parse_skill_list(&raw.hard_skills)),
        soft_skills: normalize_phrase_set(parse_skill_list(&raw.soft_skills)),
        required_degree_field: raw.required_degree_field.trim().to_string(),
        required_education: EducationLevel::from_label(&raw.required_education),
        years_experience_required: raw.years_experience_required,
    })
}

/// Parse a whole catalog, preserving record order.
pub fn parse_catalog(records: &[RawJobRecord]) -> Result<Vec<JobPosting>, CatalogError> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_job_record(index, raw))
        .collect()
}

/// Parse a serialized list literal into its string items.
///
/// JSON is tried first; anything else falls through to a quote-aware
/// splitter that copes with single quotes and unquoted items. Malformed
/// input degrades to an empty list, never an error.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return items;
    }

    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    split_list_items(inner)
}

/// Split on commas that are not inside a quoted item, then strip quotes.
fn split_list_items(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in inner.chars() {
        match (ch, quote) {
            ('\'' | '"', None) => quote = Some(ch),
            (c, Some(q)) if c == q => quote = None,
            (',', None) => {
                items.push(std::mem::take(&mut current));
            }
            (c, _) => current.push(c),
        }
    }
    items.push(current);

    items
        .into_iter()
        .map(|item| item.trim().trim_matches(&['\'', '"'][..]).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
