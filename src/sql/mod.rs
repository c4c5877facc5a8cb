//! SQL handling for querynova

pub mod extract;

pub use extract::SqlExtractor;
