//! Schema retrieval and prompt assembly
//!
//! Picks the schema chunks a question refers to and wraps them, together with
//! the question, into the instruction sent to the language model.

pub mod prompt;
pub mod retrieval;

pub use prompt::build_prompt;
pub use retrieval::retrieve_relevant_chunks;
