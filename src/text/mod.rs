//! Text processing for querynova
//!
//! This module turns a schema into prompt-sized chunks and a question into
//! the keywords used to pick among them.

pub mod chunking;
pub mod keywords;
pub mod tagger;

// Re-export main types and functions
pub use chunking::{SchemaChunk, chunk_schema, chunk_texts};
pub use keywords::{KeywordExtractor, KeywordSet};
pub use tagger::{LexiconTagger, PartOfSpeech, PosTagger, TaggedToken};
