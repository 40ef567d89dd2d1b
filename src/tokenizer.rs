//! The tokenizer/tagger boundary.
//!
//! The core performs no segmentation of its own: a clause goes in, an
//! ordered (word, fine tag) sequence comes out. Any tagger whose fine tags
//! resolve through the prefix table in [`crate::tags`] can be substituted,
//! which is also how the scenario tests supply fixed tokenizations.

use jieba_rs::Jieba;

use crate::tags::Token;

/// Segment and POS-tag one clause.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Default tokenizer backed by jieba's dictionary + HMM tagger.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    pub fn new() -> Self {
        JiebaTokenizer {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenize for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .map(|t| Token::new(t.word, t.tag))
            .collect()
    }
}
