//! Contract for an optional dependency/semantic-role annotation source.
//!
//! A full dependency parser lives outside this crate; the extraction
//! pipeline never calls one. What is specified here is the narrow shape
//! such a backend must produce — dependency arcs, per-token child-relation
//! tables, and semantic-role argument spans — plus the pure table-building
//! helpers, so an implementation can be dropped in without touching the
//! core.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One dependency arc for the token at its list position: the 1-based index
/// of the head token (0 means the virtual root) and the relation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepArc {
    pub head: usize,
    pub relation: String,
}

/// An arc joined with the words it connects, one row per token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedArc {
    pub relation: String,
    pub word: String,
    pub index: usize,
    pub tag: String,
    /// Head word, or `"Root"` for the sentence root.
    pub head_word: String,
    /// 0-based head index; the root row carries `None`.
    pub head_index: Option<usize>,
    pub head_tag: Option<String>,
}

/// One labelled argument span of a predicate, in token indices (half-open).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleArgument {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Semantic-role frame anchored at a predicate token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFrame {
    pub predicate_index: usize,
    pub arguments: Vec<RoleArgument>,
}

/// Everything an annotation backend produces for one sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    pub words: Vec<String>,
    pub tags: Vec<String>,
    pub arcs: Vec<DepArc>,
    pub roles: Vec<RoleFrame>,
}

/// An external parser backend. Implementations are expected to be total:
/// a sentence they cannot parse yields an empty annotation, not an error.
pub trait SentenceAnnotator {
    fn annotate(&self, sentence: &str) -> SentenceAnnotation;
}

/// For every token, the dependents grouped by relation label
/// (relation → 0-based dependent indices, in order).
pub fn child_tables(arcs: &[DepArc]) -> Vec<HashMap<String, Vec<usize>>> {
    let mut tables = vec![HashMap::new(); arcs.len()];
    for (dependent, arc) in arcs.iter().enumerate() {
        if arc.head == 0 {
            continue;
        }
        let head = arc.head - 1;
        if let Some(table) = tables.get_mut(head) {
            let entry: &mut Vec<usize> = table.entry(arc.relation.clone()).or_default();
            entry.push(dependent);
        }
    }
    tables
}

/// Join arcs with their words and tags into one row per token.
/// Lengths must agree; surplus entries on either side are ignored.
pub fn format_arcs(words: &[String], tags: &[String], arcs: &[DepArc]) -> Vec<FormattedArc> {
    words
        .iter()
        .zip(tags)
        .zip(arcs)
        .enumerate()
        .map(|(index, ((word, tag), arc))| {
            let head_index = arc.head.checked_sub(1);
            let (head_word, head_tag) = match head_index {
                Some(h) => (
                    words.get(h).cloned().unwrap_or_default(),
                    tags.get(h).cloned(),
                ),
                None => ("Root".to_string(), None),
            };
            FormattedArc {
                relation: arc.relation.clone(),
                word: word.clone(),
                index,
                tag: tag.clone(),
                head_word,
                head_index,
                head_tag,
            }
        })
        .collect()
}
