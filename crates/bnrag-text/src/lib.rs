//! bnrag-text
//!
//! Text-side retrieval: the Banglish transliteration normalizer and the
//! substring-count keyword retriever built on top of it.

pub mod builtin;
pub mod lexical;
pub mod transliterate;

pub use lexical::LexicalRetriever;
pub use transliterate::{Normalizer, TableBuilder, TransliterationTable};
