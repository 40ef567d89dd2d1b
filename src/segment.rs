//! Noise stripping and hierarchical splitting of raw text.
//!
//! The grammar patterns are only reliable on short, comma-bounded clauses,
//! so a document is broken down in three steps: paragraphs → long sentences
//! → short clauses. Coreference state is threaded across the clauses of one
//! long sentence and reset at long-sentence boundaries.

use std::sync::LazyLock;

use regex::Regex;

// Parenthesized asides carry editorial notes (original headlines, dates of
// record), not narrative content. Non-nested only.
static RE_PAREN_ASIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(（][^()（）]*[)）]").expect("paren regex"));

// Book/article titles in guillemets or angle brackets.
static RE_QUOTED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<《][^《》]*[》>]").expect("title regex"));

/// Strip decorative punctuation and delete every parenthesized aside.
pub fn remove_noise(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{3000}' | '\'' | '“' | '”' | '▲'))
        .collect();
    RE_PAREN_ASIDE.replace_all(&cleaned, "").into_owned()
}

/// Collect every 《…》 / <…> quoted title. Auxiliary signal only; the
/// extraction pipeline itself does not consume these.
pub fn extract_quoted_titles(text: &str) -> Vec<String> {
    RE_QUOTED_TITLE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split on line breaks; keep fragments longer than 4 characters.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split(['\n', '\r'])
        .filter(|s| s.chars().count() > 4)
        .collect()
}

/// Split on strong sentence-final punctuation and decorative separators;
/// keep fragments longer than 4 characters.
pub fn split_long_sentences(paragraph: &str) -> Vec<&str> {
    paragraph
        .split([
            ';', '。', ':', '；', ' ', '：', '？', '?', '!', '！', '【', '】', '▲', '丨', '|',
        ])
        .filter(|s| s.chars().count() > 4)
        .collect()
}

/// Split on commas (halfwidth/fullwidth); keep fragments longer than 2
/// characters.
pub fn split_short_clauses(long_sentence: &str) -> Vec<&str> {
    long_sentence
        .split([',', '，'])
        .filter(|s| s.chars().count() > 2)
        .collect()
}
