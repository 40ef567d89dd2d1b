//! Hand-built finite grammars over the coarse tag alphabet.
//!
//! Each named pattern is a small recognizer evaluated by set-of-positions
//! simulation rather than a regex library, so the leftmost/longest match
//! policy is explicit and there is no backtracking cost to reason about.
//! Patterns match the coarse sequence only, never the raw words.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::tags::CoarseTag;

/// Shortest substring length attempted by [`extract_maximal_substrings`].
pub const MIN_SPAN: usize = 2;
/// Longest substring length attempted, bounding cost on long clauses.
pub const MAX_SPAN: usize = 30;

// ── Pattern AST ──────────────────────────────────────────────────────

/// A set of coarse tags, stored as one bit per alphabet symbol.
#[derive(Debug, Clone, Copy)]
pub struct TagSet(u16);

impl TagSet {
    pub fn of(tags: &[CoarseTag]) -> Self {
        TagSet(tags.iter().fold(0u16, |acc, t| acc | (1 << *t as u16)))
    }

    pub fn contains(self, tag: CoarseTag) -> bool {
        self.0 & (1 << tag as u16) != 0
    }
}

/// A grammar pattern over coarse tag sequences.
#[derive(Debug, Clone)]
pub enum Pat {
    /// One token drawn from a class.
    One(TagSet),
    /// One token drawn from a class, valid only as the final token of the
    /// sequence being matched (the `A$`/`D$` alternates of VP; anchoring is
    /// relative to the slice under match, so an anchored full-match of a
    /// substring anchors at the substring's end).
    OneAtEnd(TagSet),
    Seq(Vec<Pat>),
    Alt(Vec<Pat>),
    /// `min..=max` repetitions of the inner pattern; `None` is unbounded.
    Repeat(Box<Pat>, usize, Option<usize>),
}

fn one(tags: &[CoarseTag]) -> Pat {
    Pat::One(TagSet::of(tags))
}

fn one_at_end(tags: &[CoarseTag]) -> Pat {
    Pat::OneAtEnd(TagSet::of(tags))
}

fn seq(items: Vec<Pat>) -> Pat {
    Pat::Seq(items)
}

fn star(inner: Pat) -> Pat {
    Pat::Repeat(Box::new(inner), 0, None)
}

fn plus(inner: Pat) -> Pat {
    Pat::Repeat(Box::new(inner), 1, None)
}

fn opt(inner: Pat) -> Pat {
    Pat::Repeat(Box::new(inner), 0, Some(1))
}

// ── Named patterns ───────────────────────────────────────────────────

use CoarseTag::{
    Adjective, Entity, Limit, Measure, Noun, NounRun, Numeral, Person, Prep, Time, Verb, VerbRun,
};

/// Independent clause:
/// `(N|E|R)* ((P|M|B|Q|A|D)* (N|E|R)*)* ((V|P|D|A){1,} (N|E|B|R|V|M|Q|D|A)*)*`
pub static IP: LazyLock<Pat> = LazyLock::new(|| {
    seq(vec![
        star(one(&[Noun, Entity, Person])),
        star(seq(vec![
            star(one(&[Prep, Numeral, Time, Measure, Adjective, Limit])),
            star(one(&[Noun, Entity, Person])),
        ])),
        star(seq(vec![
            plus(one(&[Verb, Prep, Limit, Adjective])),
            star(one(&[
                Noun, Entity, Time, Person, Verb, Numeral, Measure, Limit, Adjective,
            ])),
        ])),
    ])
});

/// Quantifier phrase: `(D|P)* M{1,} Q* ((V|N)$)?`
pub static MQ: LazyLock<Pat> = LazyLock::new(|| {
    seq(vec![
        star(one(&[Limit, Prep])),
        plus(one(&[Numeral])),
        star(one(&[Measure])),
        opt(one_at_end(&[Verb, Noun])),
    ])
});

/// Verb + noun run: `V* N{1,}`
pub static VNP: LazyLock<Pat> =
    LazyLock::new(|| seq(vec![star(one(&[Verb])), plus(one(&[Noun]))]));

/// Noun phrase: `(N|E|R){1,}`
pub static NP: LazyLock<Pat> = LazyLock::new(|| plus(one(&[Noun, Entity, Person])));

/// Consecutive person-name tokens: `R{2,}`
pub static REN: LazyLock<Pat> =
    LazyLock::new(|| Pat::Repeat(Box::new(one(&[Person])), 2, None));

/// Verb phrase: `P? (V|A$|D$){1,}` — a trailing adjective/adverb only counts
/// as verbal when it closes the sequence.
pub static VP: LazyLock<Pat> = LazyLock::new(|| {
    seq(vec![
        opt(one(&[Prep])),
        plus(Pat::Alt(vec![
            one(&[Verb]),
            one_at_end(&[Adjective]),
            one_at_end(&[Limit]),
        ])),
    ])
});

/// Prepositional/noun-object phrase: `P? (N|E|R|M|Q){1,}`
pub static PP: LazyLock<Pat> = LazyLock::new(|| {
    seq(vec![
        opt(one(&[Prep])),
        plus(one(&[Noun, Entity, Person, Numeral, Measure])),
    ])
});

/// Run of already-merged noun phrases: `n{1,}`
pub static SPO_N: LazyLock<Pat> = LazyLock::new(|| plus(one(&[NounRun])));

/// Run of already-merged verb phrases: `v{1,}`
pub static SPO_V: LazyLock<Pat> = LazyLock::new(|| plus(one(&[VerbRun])));

// ── Matching ─────────────────────────────────────────────────────────

/// Advance a set of positions through one pattern, returning every position
/// the pattern can end at. Positions are indices into `tags`; `tags.len()`
/// is the end anchor.
fn step(pat: &Pat, tags: &[CoarseTag], starts: &BTreeSet<usize>) -> BTreeSet<usize> {
    match pat {
        Pat::One(set) => starts
            .iter()
            .filter(|&&p| p < tags.len() && set.contains(tags[p]))
            .map(|&p| p + 1)
            .collect(),
        Pat::OneAtEnd(set) => starts
            .iter()
            .filter(|&&p| p + 1 == tags.len() && set.contains(tags[p]))
            .map(|&p| p + 1)
            .collect(),
        Pat::Seq(items) => items
            .iter()
            .fold(starts.clone(), |cur, item| step(item, tags, &cur)),
        Pat::Alt(alts) => alts
            .iter()
            .flat_map(|alt| step(alt, tags, starts))
            .collect(),
        Pat::Repeat(inner, min, max) => {
            let mut out = BTreeSet::new();
            if *min == 0 {
                out.extend(starts.iter().copied());
            }
            let mut cur = starts.clone();
            let mut seen = cur.clone();
            let mut reps = 0usize;
            // Nullable inner patterns stop producing fresh positions after at
            // most len+1 rounds; the cap keeps the fixpoint loop finite.
            while !cur.is_empty() && reps <= tags.len() + 1 {
                if max.is_some_and(|m| reps >= m) {
                    break;
                }
                let next = step(inner, tags, &cur);
                reps += 1;
                if reps >= *min {
                    out.extend(next.iter().copied());
                }
                let fresh: BTreeSet<usize> = next.difference(&seen).copied().collect();
                if fresh.is_empty() && reps >= *min {
                    break;
                }
                seen.extend(fresh.iter().copied());
                cur = next;
            }
            out
        }
    }
}

/// The furthest position `pat` can reach when anchored at `start`.
/// `None` when not even a zero-length match advances past `start`.
fn longest_end(pat: &Pat, tags: &[CoarseTag], start: usize) -> Option<usize> {
    let starts = BTreeSet::from([start]);
    step(pat, tags, &starts)
        .into_iter()
        .next_back()
        .filter(|&end| end > start)
}

/// Whether `pat` matches the whole of `tags`, anchored at both ends.
fn full_match(pat: &Pat, tags: &[CoarseTag]) -> bool {
    let starts = BTreeSet::from([0]);
    step(pat, tags, &starts).contains(&tags.len())
}

/// Scan left to right and yield every non-overlapping span matched by `pat`,
/// taking the longest match at each start. Zero-length matches are never
/// yielded. Used where exactly one partition of the sequence is wanted.
pub fn extract_all_matches(tags: &[CoarseTag], pat: &Pat) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < tags.len() {
        match longest_end(pat, tags, i) {
            Some(end) => {
                spans.push((i, end));
                i = end;
            }
            None => i += 1,
        }
    }
    spans
}

/// For every start position, yield every candidate length between
/// [`MIN_SPAN`] and [`MAX_SPAN`] whose substring fully matches `pat`
/// (shortest first at each start). Used where every valid grouping size is
/// wanted, e.g. quantifier phrases.
pub fn extract_maximal_substrings(tags: &[CoarseTag], pat: &Pat) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    for start in 0..tags.len() {
        let limit = MAX_SPAN.min(tags.len() - start);
        for n in MIN_SPAN..=limit {
            if full_match(pat, &tags[start..start + n]) {
                spans.push((start, start + n));
            }
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::transfer_tags;

    fn coarse(fine: &[&str]) -> Vec<CoarseTag> {
        transfer_tags(fine)
    }

    #[test]
    fn empty_sequence_matches_nothing() {
        assert!(extract_all_matches(&[], &IP).is_empty());
        assert!(extract_all_matches(&[], &NP).is_empty());
        assert!(extract_maximal_substrings(&[], &MQ).is_empty());
    }

    #[test]
    fn ip_covers_subject_verb_object_clause() {
        // 李克强/nr 总理/n 来/v 我/r 家/n
        let tags = coarse(&["nr", "n", "v", "r", "n"]);
        let spans = extract_all_matches(&tags, &IP);
        assert_eq!(spans, vec![(0, 5)]);
    }

    #[test]
    fn ip_skips_noise_symbols() {
        // A stop token splits the clause in two
        let tags = coarse(&["nr", "v", "uj", "n", "v"]);
        let spans = extract_all_matches(&tags, &IP);
        assert_eq!(spans, vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn all_matches_are_ordered_and_disjoint() {
        let tags = coarse(&["nr", "n", "v", "uj", "r", "n", "w", "v", "d"]);
        for pat in [&*IP, &*NP, &*VP, &*PP] {
            let spans = extract_all_matches(&tags, pat);
            for w in spans.windows(2) {
                assert!(w[0].1 <= w[1].0, "overlap in {spans:?}");
            }
            for (s, e) in spans {
                assert!(s < e);
            }
        }
    }

    #[test]
    fn np_matches_noun_runs() {
        let tags = coarse(&["n", "nr", "v", "ns", "n"]);
        let spans = extract_all_matches(&tags, &NP);
        assert_eq!(spans, vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn ren_requires_two_person_tokens() {
        let single = coarse(&["nr", "n"]);
        assert!(extract_all_matches(&single, &REN).is_empty());

        let double = coarse(&["nr", "nr", "n", "nr"]);
        assert_eq!(extract_all_matches(&double, &REN), vec![(0, 2)]);
    }

    #[test]
    fn vp_trailing_adjective_only_counts_at_end() {
        // V A N — the adjective is not sequence-final, so VP stops after V
        let mid = coarse(&["v", "a", "n"]);
        assert_eq!(extract_all_matches(&mid, &VP), vec![(0, 1)]);

        // N V A — sequence-final adjective joins the verb phrase
        let fin = coarse(&["n", "v", "a"]);
        assert_eq!(extract_all_matches(&fin, &VP), vec![(1, 3)]);
    }

    #[test]
    fn pp_takes_optional_preposition() {
        let tags = coarse(&["p", "n", "n", "v", "m", "q"]);
        let spans = extract_all_matches(&tags, &PP);
        assert_eq!(spans, vec![(0, 3), (4, 6)]);
    }

    #[test]
    fn mq_maximal_substrings_yield_every_grouping() {
        // D M Q — prefixes of every valid length from MIN_SPAN up
        let tags = coarse(&["d", "m", "q"]);
        let spans = extract_maximal_substrings(&tags, &MQ);
        assert_eq!(spans, vec![(0, 2), (0, 3), (1, 3)]);
    }

    #[test]
    fn mq_end_anchored_tail() {
        // M Q V: the V tail only matches because it closes the substring
        let tags = coarse(&["m", "q", "v"]);
        let spans = extract_maximal_substrings(&tags, &MQ);
        assert!(spans.contains(&(0, 3)));
        // M Q V N: V is no longer substring-final for the (0,3) slice — it
        // still is, because anchoring is relative to the slice under match
        let longer = coarse(&["m", "q", "v", "n"]);
        assert!(extract_maximal_substrings(&longer, &MQ).contains(&(0, 3)));
    }

    #[test]
    fn spo_runs_match_phrase_markers() {
        let tags = coarse(&["N", "V", "V", "N"]);
        assert_eq!(extract_all_matches(&tags, &SPO_V), vec![(1, 3)]);
        assert_eq!(extract_all_matches(&tags, &SPO_N), vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn vnp_requires_trailing_noun() {
        let tags = coarse(&["v", "v", "n"]);
        assert_eq!(extract_all_matches(&tags, &VNP), vec![(0, 3)]);
        let verbs_only = coarse(&["v", "v"]);
        assert!(extract_all_matches(&verbs_only, &VNP).is_empty());
    }
}
