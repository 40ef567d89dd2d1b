//! Event-phrase and subject/predicate/object extraction for Chinese news
//! text, driven by a hand-built finite grammar over coarse part-of-speech
//! tags.
//!
//! A document is split into paragraphs, long sentences and short clauses;
//! each clause is tokenized and part-of-speech tagged, cleaned of stopword
//! categories, and matched against an independent-clause grammar. Every
//! matched span becomes an event phrase, and verb-pivot decomposition of the
//! span's phrase chunks yields (subject, predicate, object) candidates.

pub mod annotation;
pub mod clause;
pub mod grammar;
pub mod normalize;
pub mod pipeline;
pub mod segment;
pub mod tags;
pub mod tokenizer;
pub mod triple;

pub use pipeline::{Extraction, TripleExtractor};
pub use tags::{CoarseTag, Token};
pub use tokenizer::{JiebaTokenizer, Tokenize};
pub use triple::Triple;
