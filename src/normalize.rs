//! Cleanup passes over parallel word/tag sequences.
//!
//! These run between tokenization and phrase extraction: person-name runs
//! are merged into single tokens, a most-recent-person heuristic rewrites
//! anaphoric pronouns, and stop-category tokens are dropped. All passes are
//! total; a pass that finds nothing to do leaves the sequences unmodified.

use crate::grammar::{self, Pat};
use crate::tags::transfer_tags;

/// Pronouns that corefer with the most recently seen person name.
const PERSON_PRONOUNS: &[&str] = &["其", "他", "她", "我"];

/// Interrogative pronouns; with no known antecedent they are demoted to
/// noise so they cannot anchor a grammar match.
const INTERROGATIVES: &[&str] = &["为何", "何", "如何"];

/// Fine-tag initials whose tokens are dropped before phrase extraction
/// (auxiliaries, punctuation, onomatopoeia, conjunctions, localizers,
/// time words, non-morphemes).
const STOP_INITIALS: &[char] = &['u', 'o', 'y', 'w', 'f', 'c', 't', 'x'];

/// Collapse every span matched by `pat` (against the coarse image of
/// `tags`) into one token: the span's words are glued into a single word
/// and its tag run is replaced by the single `replacement` tag.
/// Non-matched tokens are left untouched.
pub fn merge_by_pattern(
    words: &mut Vec<String>,
    tags: &mut Vec<String>,
    pat: &Pat,
    replacement: &str,
) {
    debug_assert_eq!(words.len(), tags.len());
    let coarse = transfer_tags(tags);
    let spans = grammar::extract_all_matches(&coarse, pat);
    // Splice back to front so earlier span indices stay valid.
    for &(start, end) in spans.iter().rev() {
        let glued: String = words[start..end].concat();
        words.splice(start..end, [glued]);
        tags.splice(start..end, [replacement.to_string()]);
    }
}

/// Collapse consecutive person-name tokens into one full-name token tagged
/// `nr`. Tokenizers routinely split an unknown full name into surname +
/// given-name tokens; the grammar wants one token per person.
pub fn merge_person_names(words: &mut Vec<String>, tags: &mut Vec<String>) {
    merge_by_pattern(words, tags, &grammar::REN, "nr");
}

/// Single-antecedent pronoun resolution within one long sentence.
///
/// If the clause holds a pronoun token (fine tag exactly `r`) and an
/// earlier clause supplied a person, the pronoun's surface form — when
/// drawn from the closed anaphora set — is replaced by the most recent
/// person name and retagged `nr`. With no known person, an interrogative
/// pronoun is retagged as noise instead. Anything else is a no-op.
pub fn resolve_coreference(words: &mut [String], tags: &mut [String], known_persons: &[String]) {
    let Some(idx) = tags.iter().position(|t| t == "r") else {
        return;
    };
    if let Some(person) = known_persons.last() {
        if PERSON_PRONOUNS.contains(&words[idx].as_str()) {
            words[idx] = person.clone();
            tags[idx] = "nr".to_string();
        }
    } else if INTERROGATIVES.contains(&words[idx].as_str()) {
        tags[idx] = "w".to_string();
    }
}

/// Drop every token whose fine tag starts with a stop-category initial and
/// compact the kept tags to their first two characters. Must run after
/// coreference resolution and before any phrase extraction.
pub fn strip_stop_tags(words: &[String], tags: &[String]) -> (Vec<String>, Vec<String>) {
    let mut kept_words = Vec::with_capacity(words.len());
    let mut kept_tags = Vec::with_capacity(tags.len());
    for (word, tag) in words.iter().zip(tags) {
        let initial = tag.chars().next().map(|c| c.to_ascii_lowercase());
        if initial.is_some_and(|c| STOP_INITIALS.contains(&c)) {
            continue;
        }
        kept_words.push(word.clone());
        kept_tags.push(tag.chars().take(2).collect());
    }
    (kept_words, kept_tags)
}
