pub mod catalog;
pub mod embedding;
pub mod extraction;
pub mod lexicon;
pub mod logging;
pub mod matching;
pub mod recommend;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Education levels on a fixed ordinal ladder.
///
/// Comparisons go through [`EducationLevel::ordinal`]: Diploma and
/// Polytechnic share an ordinal, and anything unrecognized maps to
/// `Unknown` (the lowest rung) instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    Unknown,
    HighSchool,
    Diploma,
    Polytechnic,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            EducationLevel::Unknown => 0,
            EducationLevel::HighSchool => 1,
            EducationLevel::Diploma | EducationLevel::Polytechnic => 2,
            EducationLevel::Bachelor => 3,
            EducationLevel::Master => 4,
            EducationLevel::Phd => 5,
        }
    }

    /// Whether this level meets a job's required level.
    pub fn satisfies(self, required: EducationLevel) -> bool {
        self.ordinal() >= required.ordinal()
    }

    /// Lenient mapping from external catalog labels ("PhD", "High School", ...).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "phd" | "doctorate" | "doctor of philosophy" => EducationLevel::Phd,
            "master" | "masters" | "master's" | "msc" => EducationLevel::Master,
            "bachelor" | "bachelors" | "bachelor's" | "bsc" => EducationLevel::Bachelor,
            "polytechnic" => EducationLevel::Polytechnic,
            "diploma" => EducationLevel::Diploma,
            "high school" | "junior college" => EducationLevel::HighSchool,
            _ => EducationLevel::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Unknown => "Unknown",
            EducationLevel::HighSchool => "High School",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Polytechnic => "Polytechnic",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::Phd => "PhD",
        }
    }
}

/// Structured profile produced by one extraction run. Write-once: the
/// pipeline builds it in full and nothing mutates it afterwards.
///
/// Field-level misses are defaults (empty string/vec/set, `None`, 0.0,
/// `Unknown`), never errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CandidateProfile {
    pub name: String,
    pub emails: Vec<String>,
    pub contact: String,
    pub education_level: EducationLevel,
    pub degree_field: String,
    pub university: Option<String>,
    pub gpa_or_classification: Option<String>,
    /// Derived from summed work-experience date ranges, rounded to 1 decimal.
    pub work_experience_years: f64,
    /// Lowercased, trimmed, deduplicated (BTreeSet keeps them sorted).
    pub hard_skills: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
}

/// One posting from the read-only job catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobPosting {
    pub title: String,
    pub industry: String,
    pub hard_skills: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
    pub required_degree_field: String,
    pub required_education: EducationLevel,
    pub years_experience_required: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_ordinals_follow_the_ladder() {
        assert_eq!(EducationLevel::Unknown.ordinal(), 0);
        assert_eq!(EducationLevel::HighSchool.ordinal(), 1);
        assert_eq!(EducationLevel::Diploma.ordinal(), 2);
        assert_eq!(EducationLevel::Polytechnic.ordinal(), 2);
        assert_eq!(EducationLevel::Bachelor.ordinal(), 3);
        assert_eq!(EducationLevel::Master.ordinal(), 4);
        assert_eq!(EducationLevel::Phd.ordinal(), 5);
    }

    #[test]
    fn satisfies_is_ordinal_gte() {
        assert!(EducationLevel::Master.satisfies(EducationLevel::Bachelor));
        assert!(EducationLevel::Diploma.satisfies(EducationLevel::Polytechnic));
        assert!(!EducationLevel::HighSchool.satisfies(EducationLevel::Bachelor));
        // Unknown requirement is satisfied by anything.
        assert!(EducationLevel::Unknown.satisfies(EducationLevel::Unknown));
    }

    #[test]
    fn unrecognized_labels_map_to_unknown() {
        assert_eq!(EducationLevel::from_label("Bootcamp"), EducationLevel::Unknown);
        assert_eq!(EducationLevel::from_label(""), EducationLevel::Unknown);
        assert_eq!(EducationLevel::from_label(" PhD "), EducationLevel::Phd);
        assert_eq!(EducationLevel::from_label("Master's"), EducationLevel::Master);
    }
}
