//! Skill extraction: lexical phrase matching for hard skills, phrase
//! matching plus whole-document embedding similarity for soft skills.

use std::collections::{BTreeSet, HashSet};

use crate::embedding::{tokenizer, TextEmbedder};
use crate::lexicon::{normalize_phrase, SkillLexicon};

/// All hard-skill phrases from the database that occur in the text as a
/// contiguous token sequence. Sorted and deduplicated by construction.
pub fn extract_hard_skills(text: &str, lexicon: &SkillLexicon) -> BTreeSet<String> {
    match_phrases(text, lexicon.hard_skills())
}

/// Soft skills: union of exact lexicon phrase matches and lexicon terms
/// whose embedding similarity to the whole document clears `threshold`.
pub fn extract_soft_skills(
    text: &str,
    lexicon: &SkillLexicon,
    embedder: &dyn TextEmbedder,
    threshold: f32,
) -> BTreeSet<String> {
    let mut matched = match_phrases(text, lexicon.soft_skills());

    let doc = embedder.embed_text(text);
    for term in lexicon.soft_skills() {
        let term_embedding = embedder.embed_phrase(term);
        if embedder.similarity(&doc, &term_embedding) >= threshold {
            matched.insert(normalize_phrase(term));
        }
    }

    matched
}

/// Case-insensitive phrase matcher over word tokens. Multi-word phrases
/// must appear as adjacent tokens; matched phrases come back normalized.
fn match_phrases(text: &str, phrases: &[String]) -> BTreeSet<String> {
    let tokens: Vec<String> = tokenizer::tokenize_text(text)
        .into_iter()
        .map(|t| t.token)
        .collect();
    let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();

    let mut matched = BTreeSet::new();
    for phrase in phrases {
        let normalized = normalize_phrase(phrase);
        let words: Vec<&str> = normalized.split(' ').collect();

        let found = match words.as_slice() {
            [] => false,
            [single] => token_set.contains(single),
            many => tokens
                .windows(many.len())
                .any(|window| window.iter().map(String::as_str).eq(many.iter().copied())),
        };

        if found {
            matched.insert(normalized);
        }
    }

    matched
}
