//! Independent-clause and sub-phrase recognition over cleaned clauses.

use crate::grammar;
use crate::tags::{CoarseTag, transfer_tags};

/// A grammar-recognized self-contained clause fragment (IP).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndependentClause {
    /// Whether the clause opens with a noun-category phrase once
    /// numeral/quantifier/adjective/time symbols are ignored.
    pub has_subject: bool,
    pub text: String,
}

/// Collect every token tagged exactly `nr`, in order. Used to seed the
/// known-person list consumed by coreference resolution in later clauses.
pub fn detect_persons(words: &[String], tags: &[String]) -> Vec<String> {
    words
        .iter()
        .zip(tags)
        .filter(|(_, tag)| tag.as_str() == "nr")
        .map(|(word, _)| word.clone())
        .collect()
}

/// Find every independent clause (IP) span in a cleaned clause.
///
/// Spans holding no verbal element (verb or adjective category) carry no
/// predication and are dropped, so a pure noun or quantifier clause yields
/// no IP. `has_subject` is derived from the span's fine-tag concatenation:
/// strip the m/q/a/t characters and test for a noun (`n`) or abbreviation
/// (`j`) prefix. The flag is exposed for callers; the default pipeline does
/// not filter on it.
pub fn extract_independent_clauses(words: &[String], tags: &[String]) -> Vec<IndependentClause> {
    let coarse = transfer_tags(tags);
    let mut clauses = Vec::new();
    for (start, end) in grammar::extract_all_matches(&coarse, &grammar::IP) {
        let predicative = coarse[start..end]
            .iter()
            .any(|t| matches!(t, CoarseTag::Verb | CoarseTag::Adjective));
        if !predicative {
            continue;
        }
        let text: String = words[start..end].concat();
        if text.is_empty() {
            continue;
        }
        let fine: String = tags[start..end].concat();
        let stripped: String = fine
            .chars()
            .filter(|c| !matches!(c, 'm' | 'q' | 'a' | 't'))
            .collect();
        let has_subject = stripped.starts_with('n') || stripped.starts_with('j');
        clauses.push(IndependentClause { has_subject, text });
    }
    clauses
}

fn phrases_for(words: &[String], spans: &[(usize, usize)]) -> Vec<String> {
    spans
        .iter()
        .map(|&(start, end)| words[start..end].concat())
        .collect()
}

/// Noun phrases (NP) within one IP's retokenized words/tags.
pub fn extract_noun_phrases(words: &[String], tags: &[String]) -> (Vec<(usize, usize)>, Vec<String>) {
    let coarse = transfer_tags(tags);
    let spans = grammar::extract_all_matches(&coarse, &grammar::NP);
    let texts = phrases_for(words, &spans);
    (spans, texts)
}

/// Prepositional/noun-object phrases (PP).
pub fn extract_prep_phrases(words: &[String], tags: &[String]) -> (Vec<(usize, usize)>, Vec<String>) {
    let coarse = transfer_tags(tags);
    let spans = grammar::extract_all_matches(&coarse, &grammar::PP);
    let texts = phrases_for(words, &spans);
    (spans, texts)
}

/// Verb phrases (VP).
pub fn extract_verb_phrases(words: &[String], tags: &[String]) -> (Vec<(usize, usize)>, Vec<String>) {
    let coarse = transfer_tags(tags);
    let spans = grammar::extract_all_matches(&coarse, &grammar::VP);
    let texts = phrases_for(words, &spans);
    (spans, texts)
}

/// Quantifier phrases (MQ). Every valid grouping size is wanted here, so
/// this uses the anchored maximal-substring search instead of the single
/// left-to-right partition.
pub fn extract_quantifier_phrases(
    words: &[String],
    tags: &[String],
) -> (Vec<(usize, usize)>, Vec<String>) {
    let coarse = transfer_tags(tags);
    let spans = grammar::extract_maximal_substrings(&coarse, &grammar::MQ);
    let texts = phrases_for(words, &spans);
    (spans, texts)
}

/// Verb+noun runs (VNP) paired with the clause's noun phrases, for clauses
/// whose final fine tag marks a nominal close (n/l/i endings). Returns
/// empty lists otherwise.
pub fn extract_verb_noun_phrases(words: &[String], tags: &[String]) -> (Vec<String>, Vec<String>) {
    let nominal_close = tags
        .last()
        .is_some_and(|t| t.ends_with('n') || t.ends_with('l') || t.ends_with('i'));
    if !nominal_close {
        return (Vec::new(), Vec::new());
    }
    let coarse = transfer_tags(tags);
    let vnp_spans = grammar::extract_all_matches(&coarse, &grammar::VNP);
    if vnp_spans.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let np_spans = grammar::extract_all_matches(&coarse, &grammar::NP);
    if np_spans.is_empty() {
        return (Vec::new(), Vec::new());
    }
    (phrases_for(words, &vnp_spans), phrases_for(words, &np_spans))
}
