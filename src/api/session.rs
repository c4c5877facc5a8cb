//! Interactive session state
//!
//! A session holds what one user sees: the schema fetched when it opened, the
//! login flag and the history of generated queries. Sessions share nothing.

use super::pipeline::{Generation, PreparedPrompt, QueryPipeline};
use crate::config::AuthConfig;
use crate::error::{QueryNovaError, Result};
use crate::schema::Schema;
use crate::storage::{QueryRows, SchemaProvider, SqlExecutor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// One successfully generated query
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub question: String,
    pub sql: String,
    pub generation_time: Duration,
    pub asked_at: DateTime<Utc>,
}

/// Outcome of running generated SQL
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Execution {
    /// SQL was not run (generation failed or execution was skipped)
    Skipped,
    Rows(QueryRows),
    /// The database rejected the statement; shown to the user, not retried
    Failed { message: String },
}

/// Everything produced for one question
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub generation: Generation,
    pub execution: Execution,
}

impl Answer {
    /// Whether SQL was produced; execution errors do not count against it
    pub fn is_success(&self) -> bool {
        self.generation.sql.is_some()
    }
}

/// Per-user session over a database and a pipeline
pub struct Session<'a> {
    provider: &'a dyn SchemaProvider,
    executor: &'a dyn SqlExecutor,
    pipeline: &'a QueryPipeline,
    auth: AuthConfig,
    authenticated: bool,
    schema: Option<Schema>,
    history: Vec<HistoryEntry>,
}

impl<'a> Session<'a> {
    /// Open a session and fetch the schema. A failed fetch leaves the session
    /// usable without schema context.
    pub fn open(
        provider: &'a dyn SchemaProvider,
        executor: &'a dyn SqlExecutor,
        pipeline: &'a QueryPipeline,
        auth: AuthConfig,
    ) -> Self {
        let authenticated = !auth.is_enabled();
        let mut session = Self {
            provider,
            executor,
            pipeline,
            auth,
            authenticated,
            schema: None,
            history: Vec::new(),
        };
        session.refresh_schema();
        session
    }

    /// Re-fetch the schema; returns whether one is now available
    pub fn refresh_schema(&mut self) -> bool {
        self.schema = match self.provider.fetch_schema() {
            Ok(schema) => {
                log::info!("Schema loaded: {} tables", schema.len());
                Some(schema)
            }
            Err(e) => {
                log::error!("Failed to fetch database schema: {}", e);
                None
            }
        };
        self.schema.is_some()
    }

    /// The fetched schema; `None` while a required login is pending
    pub fn schema(&self) -> Option<&Schema> {
        if self.authenticated {
            self.schema.as_ref()
        } else {
            None
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        self.pipeline
    }

    pub fn requires_login(&self) -> bool {
        self.auth.is_enabled()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Check credentials against the configured ones
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if !self.auth.is_enabled() {
            self.authenticated = true;
            return Ok(());
        }

        let matches = self.auth.username.as_deref() == Some(username)
            && self.auth.password.as_deref() == Some(password);
        if matches {
            log::info!("User '{}' logged in", username);
            self.authenticated = true;
            Ok(())
        } else {
            log::warn!("Failed login attempt for '{}'", username);
            Err(QueryNovaError::Authentication(
                "Invalid username or password!".to_string(),
            ))
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = !self.auth.is_enabled();
    }

    /// Fail with an authentication error while a required login is pending
    pub fn ensure_authenticated(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(QueryNovaError::Authentication(
                "Login required".to_string(),
            ))
        }
    }

    /// Build the prompt a question would produce, without calling the model
    pub fn prepare(&self, question: &str) -> Result<PreparedPrompt> {
        self.ensure_authenticated()?;
        Ok(self.pipeline.prepare(question, self.schema.as_ref()))
    }

    /// Generate SQL for a question and, if requested, run it
    pub async fn ask(&mut self, question: &str, execute: bool) -> Result<Answer> {
        self.ensure_authenticated()?;

        let generation = self
            .pipeline
            .generate_sql(question, self.schema.as_ref())
            .await;

        let Some(sql) = generation.sql.clone() else {
            return Ok(Answer {
                generation,
                execution: Execution::Skipped,
            });
        };

        self.history.push(HistoryEntry {
            question: question.to_string(),
            sql: sql.clone(),
            generation_time: generation.elapsed,
            asked_at: Utc::now(),
        });

        let execution = if execute {
            match self.executor.execute(&sql) {
                Ok(rows) => Execution::Rows(rows),
                Err(e) => {
                    log::warn!("Error executing query: {}", e);
                    Execution::Failed {
                        message: e.to_string(),
                    }
                }
            }
        } else {
            Execution::Skipped
        };

        Ok(Answer {
            generation,
            execution,
        })
    }
}
