//! API layer for querynova
//!
//! This module provides the question-to-SQL pipeline, the per-user session
//! built on it and the interactive chat loop.

pub mod chat;
pub mod pipeline;
pub mod session;

// Re-export main API types
pub use chat::{render_answer, render_schema, render_table, run_chat};
pub use pipeline::{
    Advisory, Denylist, Generation, GenerationStatus, PreparedPrompt, QueryPipeline,
};
pub use session::{Answer, Execution, HistoryEntry, Session};
