//! Triple assembly: split one independent clause into SPO candidates.
//!
//! Verb-phrase and noun/prepositional-phrase spans are laid out in
//! positional order, adjacent same-kind phrases are collapsed, and every
//! remaining verb position becomes a pivot that contributes one
//! (subject, predicate, object) triple.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clause;
use crate::grammar;
use crate::normalize::merge_by_pattern;

/// A candidate relation extracted from one independent clause. Subject and
/// object may be empty; [`Triple::is_complete`] is the caller-side filter
/// for well-formed relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Whether both subject and object are non-empty. Filtering on this is
    /// caller policy, not a core guarantee.
    pub fn is_complete(&self) -> bool {
        !self.subject.is_empty() && !self.object.is_empty()
    }
}

/// Assemble the ordered triples for one IP's retokenized words/tags.
///
/// The phrase table is keyed by (start, end) token span; a verb span and a
/// noun span landing on the exact same key is rare, and the verb wins the
/// tie. Successive pivots' objects overlap by design: each triple's object
/// is all text after its own pivot, serial-verb constructions included.
pub fn assemble_triples(words: &[String], tags: &[String]) -> Vec<Triple> {
    let (verb_spans, verbs) = clause::extract_verb_phrases(words, tags);
    let (pp_spans, pps) = clause::extract_prep_phrases(words, tags);

    // Noun entries first so verb entries win key collisions.
    let mut table: BTreeMap<(usize, usize), (&str, String)> = BTreeMap::new();
    for (span, text) in pp_spans.iter().zip(pps) {
        table.insert(*span, ("N", text));
    }
    for (span, text) in verb_spans.iter().zip(verbs) {
        table.insert(*span, ("V", text));
    }

    let mut phrases = Vec::with_capacity(table.len());
    let mut kinds = Vec::with_capacity(table.len());
    for (_, (kind, text)) in table {
        phrases.push(text);
        kinds.push(kind.to_string());
    }

    // Collapse adjacent same-kind phrases into one token each.
    merge_by_pattern(&mut phrases, &mut kinds, &grammar::SPO_V, "V");
    merge_by_pattern(&mut phrases, &mut kinds, &grammar::SPO_N, "N");

    if phrases.len() < 2 {
        return Vec::new();
    }

    let pivots: Vec<usize> = kinds
        .iter()
        .enumerate()
        .filter(|(_, kind)| kind.as_str() == "V")
        .map(|(i, _)| i)
        .collect();

    let mut triples = Vec::with_capacity(pivots.len());
    for (idx, &pivot) in pivots.iter().enumerate() {
        let prev = if idx == 0 { 0 } else { pivots[idx - 1] };
        let triple = if pivot == 0 {
            Triple::new("", phrases[0].clone(), phrases[1..].concat())
        } else if idx == 0 {
            Triple::new(
                phrases[..pivot].concat(),
                phrases[pivot].clone(),
                phrases[pivot + 1..].concat(),
            )
        } else {
            Triple::new(
                phrases[prev + 1..pivot].concat(),
                phrases[pivot].clone(),
                phrases[pivot + 1..].concat(),
            )
        };
        triples.push(triple);
    }
    triples
}
