//! # sentiment-scorer
//!
//! Deterministic, lexicon-based sentiment polarity scoring.
//! The lexicon is compiled into the binary; scoring performs no I/O.

mod lexicon;
mod scorer;
mod tokenizer;

pub use lexicon::Lexicon;
pub use scorer::LexiconScorer;
pub use tokenizer::tokenize;
