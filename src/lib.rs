//! # querynova
//!
//! A schema-aware natural-language-to-SQL assistant. A question is matched
//! against the tables of a database, the relevant part of the schema is put
//! into a prompt, a language model writes the SQL and the database runs it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use querynova::{Config, Database, Denylist, OpenAiCompatibleModel, QueryPipeline, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let database = Database::new(&config.database.path)?;
//!     let model = Arc::new(OpenAiCompatibleModel::new(&config.llm)?);
//!     let pipeline = QueryPipeline::new(model, Denylist::new(config.pipeline.denylist.clone()))?;
//!
//!     let mut session = Session::open(&database, &database, &pipeline, config.auth.clone());
//!     let answer = session.ask("show me all users", true).await?;
//!     println!("{:?}", answer.generation.sql);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod rag;
pub mod schema;
pub mod sql;
pub mod storage;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{
    Advisory, Answer, Denylist, Execution, Generation, GenerationStatus, QueryPipeline, Session,
};
pub use config::Config;
pub use error::{QueryNovaError, Result};
pub use llm::{LanguageModel, OpenAiCompatibleModel};
pub use schema::{Schema, TableSchema};
pub use storage::{Database, QueryRows, SchemaProvider, SqlExecutor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_imports() {
        // Ensure all major types can be imported
        let _config = Config::default();
        let _schema = Schema::new();
        let _denylist = Denylist::default();
    }
}
