//! Coarse tag alphabet over the tokenizer's fine-grained POS tags.
//!
//! The grammar patterns never look at the tagger's raw tag strings; every
//! fine tag is first collapsed into a single-symbol coarse category, and all
//! pattern matching runs over the resulting `Vec<CoarseTag>`. The coarse
//! sequence is a pure function of the (word, tag) sequence and must be
//! recomputed whenever that sequence is edited.

/// A segmented word paired with its fine-grained POS tag, as produced by the
/// tokenizer/tagger boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Token {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

// ── Coarse alphabet ──────────────────────────────────────────────────

/// Single-symbol grammar category derived from a fine POS tag.
///
/// `NounRun` (`n`) and `VerbRun` (`v`) are never produced from tagger
/// output directly; they mark already-identified noun/verb phrase tokens
/// during triple assembly. `Morpheme` (`G`) is likewise reserved: no fine
/// tag currently maps to it (the verb row of the table shadows `g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CoarseTag {
    /// `N` — common/place/abbreviation nouns and pronouns
    Noun,
    /// `E` — named-entity-like nouns (institutions, places, other proper)
    Entity,
    /// `R` — person names
    Person,
    /// `G` — morphemes (reserved)
    Morpheme,
    /// `V` — verbs, including state/directional/gerund forms and idioms
    Verb,
    /// `P` — prepositions and localizers acting as function words
    Prep,
    /// `M` — numerals and time-quantifier words
    Numeral,
    /// `Q` — measure words
    Measure,
    /// `B` — time words
    Time,
    /// `A` — adjectives
    Adjective,
    /// `D` — limiting words (adverbs)
    Limit,
    /// `n` — an already-merged noun/prepositional phrase token
    NounRun,
    /// `v` — an already-merged verb phrase token
    VerbRun,
    /// `W` — stop/noise; anything the table does not know
    Stop,
}

impl CoarseTag {
    /// The single-character symbol used when printing a tag sequence.
    pub fn symbol(self) -> char {
        match self {
            CoarseTag::Noun => 'N',
            CoarseTag::Entity => 'E',
            CoarseTag::Person => 'R',
            CoarseTag::Morpheme => 'G',
            CoarseTag::Verb => 'V',
            CoarseTag::Prep => 'P',
            CoarseTag::Numeral => 'M',
            CoarseTag::Measure => 'Q',
            CoarseTag::Time => 'B',
            CoarseTag::Adjective => 'A',
            CoarseTag::Limit => 'D',
            CoarseTag::NounRun => 'n',
            CoarseTag::VerbRun => 'v',
            CoarseTag::Stop => 'W',
        }
    }
}

/// Collapse a fine POS tag into its coarse category.
///
/// Lookup keys on the first two characters of the fine tag, so subtyped
/// tagger output like `nr2` or `nrt` resolves through its `nr` prefix.
/// Unknown tags degrade to `Stop` rather than failing.
pub fn coarse_of(fine: &str) -> CoarseTag {
    let prefix: String = fine.chars().take(2).collect();
    match prefix.as_str() {
        "b" => CoarseTag::Time,
        "a" => CoarseTag::Adjective,
        "d" => CoarseTag::Limit,
        "n" | "j" | "s" | "zg" | "en" | "l" | "r" => CoarseTag::Noun,
        "nt" | "nz" | "ns" | "an" | "ng" => CoarseTag::Entity,
        "nr" => CoarseTag::Person,
        "g" | "v" | "vd" | "va" | "vg" | "vn" | "i" => CoarseTag::Verb,
        "p" | "f" => CoarseTag::Prep,
        "m" | "t" => CoarseTag::Numeral,
        "q" => CoarseTag::Measure,
        "V" => CoarseTag::VerbRun,
        "N" => CoarseTag::NounRun,
        _ => CoarseTag::Stop,
    }
}

/// Derive the coarse tag sequence for a run of fine tags.
pub fn transfer_tags<S: AsRef<str>>(fine_tags: &[S]) -> Vec<CoarseTag> {
    fine_tags.iter().map(|t| coarse_of(t.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lookup() {
        assert_eq!(coarse_of("nr"), CoarseTag::Person);
        assert_eq!(coarse_of("nr2"), CoarseTag::Person);
        assert_eq!(coarse_of("nrt"), CoarseTag::Person);
        assert_eq!(coarse_of("ns"), CoarseTag::Entity);
        assert_eq!(coarse_of("n"), CoarseTag::Noun);
        assert_eq!(coarse_of("v"), CoarseTag::Verb);
        assert_eq!(coarse_of("vn"), CoarseTag::Verb);
        assert_eq!(coarse_of("p"), CoarseTag::Prep);
        assert_eq!(coarse_of("t"), CoarseTag::Numeral);
        assert_eq!(coarse_of("V"), CoarseTag::VerbRun);
        assert_eq!(coarse_of("N"), CoarseTag::NounRun);
    }

    #[test]
    fn unknown_tags_become_stop() {
        assert_eq!(coarse_of("uj"), CoarseTag::Stop);
        assert_eq!(coarse_of("xc"), CoarseTag::Stop);
        assert_eq!(coarse_of(""), CoarseTag::Stop);
        // Deterministic across calls
        assert_eq!(coarse_of("??"), coarse_of("??"));
    }

    #[test]
    fn transfer_preserves_length() {
        let tags = ["nr", "n", "t", "v", "r", "n", "ul"];
        assert_eq!(transfer_tags(&tags).len(), tags.len());
        let empty: [&str; 0] = [];
        assert!(transfer_tags(&empty).is_empty());
    }
}
