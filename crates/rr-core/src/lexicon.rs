use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Bump when any of the bundled reference lists change.
const LEXICON_VERSION: &str = "2025-06-01-r1";

static BUILTIN: Lazy<SkillLexicon> = Lazy::new(|| SkillLexicon {
    soft_skills: parse_lines(include_str!("../assets/soft_skills.txt")),
    hard_skills: parse_lines(include_str!("../assets/hard_skills.txt")),
    universities: parse_lines(include_str!("../assets/universities.txt")),
});

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon asset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("lexicon asset {0} is empty")]
    Empty(String),
}

/// Versioned reference data for phrase matching: the soft-skill lexicon, the
/// hard-skill phrase database, and the curated institution list.
///
/// The bundled lists live under `assets/` as plain newline-delimited files so
/// they can be revised without touching code; `load_from_dir` swaps in an
/// external copy at runtime.
#[derive(Debug, Clone)]
pub struct SkillLexicon {
    soft_skills: Vec<String>,
    hard_skills: Vec<String>,
    universities: Vec<String>,
}

impl SkillLexicon {
    /// The compiled-in reference set. Shared, immutable, built once.
    pub fn builtin() -> &'static SkillLexicon {
        &BUILTIN
    }

    /// Load `soft_skills.txt`, `hard_skills.txt` and `universities.txt` from
    /// an external directory, overriding the bundled lists.
    pub fn load_from_dir(dir: &Path) -> Result<SkillLexicon, LexiconError> {
        let read = |name: &str| -> Result<Vec<String>, LexiconError> {
            let path = dir.join(name);
            let raw = std::fs::read_to_string(&path).map_err(|source| LexiconError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let lines = parse_lines(&raw);
            if lines.is_empty() {
                return Err(LexiconError::Empty(path.display().to_string()));
            }
            Ok(lines)
        };

        Ok(SkillLexicon {
            soft_skills: read("soft_skills.txt")?,
            hard_skills: read("hard_skills.txt")?,
            universities: read("universities.txt")?,
        })
    }

    pub fn version(&self) -> &'static str {
        LEXICON_VERSION
    }

    pub fn soft_skills(&self) -> &[String] {
        &self.soft_skills
    }

    pub fn hard_skills(&self) -> &[String] {
        &self.hard_skills
    }

    pub fn universities(&self) -> &[String] {
        &self.universities
    }
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

/// Skill-phrase normalization: NFKC fold, lowercase, collapse inner runs of
/// whitespace, trim. All skill sets in the core go through this.
pub fn normalize_phrase(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a batch of phrases into the deduplicated sorted-set shape used
/// by `CandidateProfile` and `JobPosting`.
pub fn normalize_phrase_set<I, S>(phrases: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| normalize_phrase(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_are_nonempty() {
        let lexicon = SkillLexicon::builtin();
        assert!(lexicon.soft_skills().len() > 100);
        assert!(lexicon.hard_skills().len() > 100);
        assert!(lexicon.universities().len() > 100);
        assert!(!lexicon.version().is_empty());
    }

    #[test]
    fn normalize_phrase_folds_case_and_whitespace() {
        assert_eq!(normalize_phrase("  Problem   Solving "), "problem solving");
        assert_eq!(normalize_phrase("PYTHON"), "python");
        assert_eq!(normalize_phrase(""), "");
    }

    #[test]
    fn normalize_phrase_set_dedupes_and_drops_blanks() {
        let set = normalize_phrase_set(["Python", "python ", "  ", "SQL"]);
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["python".to_string(), "sql".to_string()]
        );
    }
}
