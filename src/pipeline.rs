//! Document pipeline: noise stripping → hierarchical splitting → per-clause
//! tagging and cleanup → IP extraction → triple assembly.
//!
//! Processing is purely sequential. The only state that crosses a clause
//! boundary is the list of person names seen so far in the current long
//! sentence (the coreference antecedents) and the accumulated events and
//! triples; both are append-only and order-preserving, and the person list
//! resets at every long-sentence boundary.

use serde::Serialize;

use crate::clause;
use crate::normalize;
use crate::segment;
use crate::tokenizer::{JiebaTokenizer, Tokenize};
use crate::triple::{self, Triple};

/// Everything extracted from one document: the recognized event phrases and
/// the SPO candidates, each in left-to-right traversal order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub events: Vec<String>,
    pub triples: Vec<Triple>,
}

/// The extraction engine. Generic over the tokenizer so tests can substitute
/// a fixture tagger for jieba.
pub struct TripleExtractor<T: Tokenize> {
    tokenizer: T,
}

impl TripleExtractor<JiebaTokenizer> {
    pub fn new() -> Self {
        Self::with_tokenizer(JiebaTokenizer::new())
    }
}

impl Default for TripleExtractor<JiebaTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenize> TripleExtractor<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        TripleExtractor { tokenizer }
    }

    /// Tokenize a clause and merge consecutive person-name tokens.
    fn cut(&self, text: &str) -> (Vec<String>, Vec<String>) {
        let tokens = self.tokenizer.tokenize(text);
        let mut words = Vec::with_capacity(tokens.len());
        let mut tags = Vec::with_capacity(tokens.len());
        for token in tokens {
            words.push(token.word);
            tags.push(token.tag);
        }
        normalize::merge_person_names(&mut words, &mut tags);
        (words, tags)
    }

    /// Extract event phrases and SPO triples from a document.
    ///
    /// Every stage is total: empty or unparseable input yields an empty
    /// extraction rather than an error. Subjects and objects may be empty;
    /// callers wanting only well-formed relations filter with
    /// [`Triple::is_complete`].
    pub fn extract(&self, content: &str) -> Extraction {
        let mut extraction = Extraction::default();
        let content = segment::remove_noise(content);

        for paragraph in segment::split_paragraphs(&content) {
            for long_sentence in segment::split_long_sentences(paragraph) {
                // Coreference antecedents, scoped to this long sentence.
                let mut persons: Vec<String> = Vec::new();

                for short_clause in segment::split_short_clauses(long_sentence) {
                    let (mut words, mut tags) = self.cut(short_clause);
                    let clause_persons = clause::detect_persons(&words, &tags);
                    normalize::resolve_coreference(&mut words, &mut tags, &persons);
                    let (words, tags) = normalize::strip_stop_tags(&words, &tags);
                    let ips = clause::extract_independent_clauses(&words, &tags);
                    // Antecedents become visible to the *next* clause only.
                    persons.extend(clause_persons);

                    for ip in ips {
                        let (ip_words, ip_tags) = self.cut(&ip.text);
                        extraction
                            .triples
                            .extend(triple::assemble_triples(&ip_words, &ip_tags));
                        extraction.events.push(ip.text);
                    }
                }
            }
        }

        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::tags::Token;

    /// Table-backed tokenizer so scenarios do not depend on jieba's model.
    /// Unknown text degrades to one noise token.
    struct FixtureTokenizer {
        table: HashMap<String, Vec<Token>>,
    }

    impl FixtureTokenizer {
        fn new(entries: &[(&str, &[(&str, &str)])]) -> Self {
            let mut table = HashMap::new();
            for (text, tokens) in entries {
                table.insert(
                    text.to_string(),
                    tokens.iter().map(|(w, t)| Token::new(*w, *t)).collect(),
                );
            }
            FixtureTokenizer { table }
        }
    }

    impl Tokenize for FixtureTokenizer {
        fn tokenize(&self, text: &str) -> Vec<Token> {
            match self.table.get(text) {
                Some(tokens) => tokens.clone(),
                None if text.is_empty() => Vec::new(),
                None => vec![Token::new(text, "x")],
            }
        }
    }

    #[test]
    fn empty_document_yields_nothing() {
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[]));
        let extraction = extractor.extract("");
        assert!(extraction.events.is_empty());
        assert!(extraction.triples.is_empty());
    }

    #[test]
    fn subject_verb_object_clause() {
        // 李克强总理今天来我家了 — person+title subject, time word and
        // auxiliary dropped, 来 as the single pivot
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[
            (
                "李克强总理今天来我家了",
                &[
                    ("李克强", "nr"),
                    ("总理", "n"),
                    ("今天", "t"),
                    ("来", "v"),
                    ("我", "r"),
                    ("家", "n"),
                    ("了", "ul"),
                ][..],
            ),
            (
                "李克强总理来我家",
                &[
                    ("李克强", "nr"),
                    ("总理", "n"),
                    ("来", "v"),
                    ("我", "r"),
                    ("家", "n"),
                ][..],
            ),
        ]));

        let extraction = extractor.extract("李克强总理今天来我家了");
        assert_eq!(extraction.events, vec!["李克强总理来我家"]);
        assert_eq!(extraction.triples.len(), 1);
        let t = &extraction.triples[0];
        assert_eq!(t.predicate, "来");
        assert!(t.subject.contains("李克强"));
        assert!(t.subject.contains("总理"));
        assert_eq!(t.object, "我家");
        assert!(t.is_complete());
    }

    #[test]
    fn pronoun_resolves_to_person_from_earlier_clause() {
        // 马茸茸在医院待产，他从五楼坠亡 — the second clause's 他 must be
        // rewritten to 马茸茸 before extraction
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[
            (
                "马茸茸在医院待产",
                &[
                    ("马茸茸", "nr"),
                    ("在", "p"),
                    ("医院", "n"),
                    ("待产", "v"),
                ][..],
            ),
            (
                "他从五楼坠亡",
                &[("他", "r"), ("从", "p"), ("五楼", "n"), ("坠亡", "v")][..],
            ),
            (
                "马茸茸在医院待产",
                &[
                    ("马茸茸", "nr"),
                    ("在", "p"),
                    ("医院", "n"),
                    ("待产", "v"),
                ][..],
            ),
            (
                "马茸茸从五楼坠亡",
                &[
                    ("马茸茸", "nr"),
                    ("从", "p"),
                    ("五楼", "n"),
                    ("坠亡", "v"),
                ][..],
            ),
        ]));

        let extraction = extractor.extract("马茸茸在医院待产，他从五楼坠亡。");
        assert!(extraction.events.contains(&"马茸茸从五楼坠亡".to_string()));
        assert!(
            extraction
                .triples
                .iter()
                .any(|t| t.subject == "马茸茸" && t.predicate.contains("坠亡"))
        );
    }

    #[test]
    fn person_state_resets_between_long_sentences() {
        // The pronoun sits in a new long sentence, so no antecedent is
        // available and 他 survives unresolved (coarse tag N, still a noun)
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[
            (
                "马茸茸在医院待产",
                &[
                    ("马茸茸", "nr"),
                    ("在", "p"),
                    ("医院", "n"),
                    ("待产", "v"),
                ][..],
            ),
            (
                "他从五楼坠亡",
                &[("他", "r"), ("从", "p"), ("五楼", "n"), ("坠亡", "v")][..],
            ),
        ]));

        let extraction = extractor.extract("马茸茸在医院待产。他从五楼坠亡。");
        assert!(extraction.events.iter().any(|e| e.starts_with("他")));
        assert!(!extraction.events.iter().any(|e| e == "马茸茸从五楼坠亡"));
    }

    #[test]
    fn noun_only_clause_yields_nothing() {
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[(
            "烤乳鸽艇仔粥金钱肚",
            &[("烤乳鸽", "n"), ("艇仔粥", "n"), ("金钱肚", "n")][..],
        )]));
        let extraction = extractor.extract("烤乳鸽艇仔粥金钱肚");
        assert!(extraction.events.is_empty());
        assert!(extraction.triples.is_empty());
    }

    #[test]
    fn paren_asides_never_reach_the_tokenizer() {
        // The fixture has no entry for the aside text; if it leaked through,
        // the fallback noise token would still yield no IP — but the event
        // list check keeps the clause boundary honest
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[(
            "产妇难忍疼痛跳楼",
            &[
                ("产妇", "n"),
                ("难忍", "v"),
                ("疼痛", "n"),
                ("跳楼", "v"),
            ][..],
        )]));
        let extraction = extractor.extract("（原标题：事件还原）产妇难忍疼痛跳楼。");
        assert_eq!(extraction.events, vec!["产妇难忍疼痛跳楼"]);
    }

    #[test]
    fn triple_count_never_exceeds_verb_pivots() {
        let extractor = TripleExtractor::with_tokenizer(FixtureTokenizer::new(&[(
            "家属拒绝手术导致产妇跳楼",
            &[
                ("家属", "n"),
                ("拒绝", "v"),
                ("手术", "vn"),
                ("导致", "v"),
                ("产妇", "n"),
                ("跳楼", "v"),
            ][..],
        )]));
        let extraction = extractor.extract("家属拒绝手术导致产妇跳楼。");
        for event in &extraction.events {
            // Re-derive the pivot bound for each emitted event
            let (words, tags) = extractor.cut(event);
            let triples = triple::assemble_triples(&words, &tags);
            let verb_count = tags.iter().filter(|t| t.starts_with('v')).count();
            assert!(triples.len() <= verb_count.max(1));
        }
    }
}
