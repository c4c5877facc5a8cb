//! Query pipeline
//!
//! Turns a question into SQL: denylist gate, schema chunking, keyword
//! extraction, relevance filtering, prompt assembly, the model call and SQL
//! extraction. Every failure ends up in the returned [`Generation`]; nothing
//! propagates to the caller as an error.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::rag::{build_prompt, retrieve_relevant_chunks};
use crate::schema::Schema;
use crate::sql::SqlExtractor;
use crate::text::{KeywordExtractor, KeywordSet, PosTagger, chunk_schema, chunk_texts};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Phrase fragments that reject a question outright
#[derive(Debug, Clone)]
pub struct Denylist {
    fragments: Vec<String>,
}

impl Denylist {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|f| f.into().to_lowercase())
                .collect(),
        }
    }

    /// First fragment contained in the lowercased question
    pub fn matched(&self, question: &str) -> Option<&str> {
        let question = question.to_lowercase();
        self.fragments
            .iter()
            .find(|fragment| question.contains(fragment.as_str()))
            .map(String::as_str)
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(PipelineConfig::default().denylist)
    }
}

/// How a generation attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// SQL was extracted from the model response
    Generated,
    /// The question matched a denylist fragment; the model was not called
    OutOfDomain { fragment: String },
    /// The model answered without a `SELECT ... ;` statement
    NoExtractableSql,
    /// The model call failed; no retry was made
    ModelFailure { message: String },
}

/// Non-fatal conditions met along the way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// No schema was available; the prompt carries no schema context
    SchemaUnavailable,
    /// No chunk matched the keywords; the full schema was used instead
    FullSchemaFallback,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SchemaUnavailable => {
                write!(f, "Database schema unavailable. Generating without schema context.")
            }
            Advisory::FullSchemaFallback => {
                write!(f, "Couldn't find relevant schema. Using full schema.")
            }
        }
    }
}

/// Schema context selected for a question
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPrompt {
    pub keywords: KeywordSet,
    /// Chunk texts placed in the prompt
    pub schema_texts: Vec<String>,
    pub advisories: Vec<Advisory>,
    pub prompt: String,
}

/// Result of [`QueryPipeline::generate_sql`]
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub sql: Option<String>,
    /// Time spent in the model call; zero when it was not made or failed
    pub elapsed: Duration,
    pub status: GenerationStatus,
    pub advisories: Vec<Advisory>,
}

impl Generation {
    fn rejected(status: GenerationStatus, advisories: Vec<Advisory>) -> Self {
        Self {
            sql: None,
            elapsed: Duration::ZERO,
            status,
            advisories,
        }
    }

    /// Message to show the user when no SQL came out
    pub fn failure_message(&self) -> Option<String> {
        match &self.status {
            GenerationStatus::Generated => None,
            GenerationStatus::OutOfDomain { .. } => Some(
                "Invalid query! This tool only supports database-related questions.".to_string(),
            ),
            GenerationStatus::NoExtractableSql => {
                Some("Could not generate a valid SQL query from your input.".to_string())
            }
            GenerationStatus::ModelFailure { message } => Some(format!("LLM Error: {}", message)),
        }
    }
}

/// Question-to-SQL orchestrator
pub struct QueryPipeline {
    model: Arc<dyn LanguageModel>,
    keywords: KeywordExtractor,
    extractor: SqlExtractor,
    denylist: Denylist,
}

impl QueryPipeline {
    /// Create a pipeline with the built-in lexicon tagger
    pub fn new(model: Arc<dyn LanguageModel>, denylist: Denylist) -> Result<Self> {
        Ok(Self {
            model,
            keywords: KeywordExtractor::with_lexicon_tagger()?,
            extractor: SqlExtractor::new()?,
            denylist,
        })
    }

    /// Create a pipeline with a custom part-of-speech tagger
    pub fn with_tagger(
        model: Arc<dyn LanguageModel>,
        tagger: Box<dyn PosTagger>,
        denylist: Denylist,
    ) -> Result<Self> {
        Ok(Self {
            model,
            keywords: KeywordExtractor::new(tagger),
            extractor: SqlExtractor::new()?,
            denylist,
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Select schema context and build the prompt, without calling the model
    pub fn prepare(&self, question: &str, schema: Option<&Schema>) -> PreparedPrompt {
        let mut advisories = Vec::new();
        let chunks = match schema {
            Some(schema) => chunk_schema(schema),
            None => {
                log::warn!("No schema available; prompting without schema context");
                advisories.push(Advisory::SchemaUnavailable);
                Vec::new()
            }
        };

        let keywords = self.keywords.extract_keywords(question);
        log::debug!("Keywords for '{}': {:?}", question, keywords);

        let mut schema_texts = retrieve_relevant_chunks(&chunks, &keywords);
        if schema_texts.is_empty() {
            log::warn!("Couldn't find relevant schema. Using full schema.");
            advisories.push(Advisory::FullSchemaFallback);
            schema_texts = chunk_texts(&chunks);
        }

        let prompt = build_prompt(question, &schema_texts);
        PreparedPrompt {
            keywords,
            schema_texts,
            advisories,
            prompt,
        }
    }

    /// Generate SQL for a question
    pub async fn generate_sql(&self, question: &str, schema: Option<&Schema>) -> Generation {
        if let Some(fragment) = self.denylist.matched(question) {
            log::info!("Rejected out-of-domain question (matched '{}')", fragment);
            return Generation::rejected(
                GenerationStatus::OutOfDomain {
                    fragment: fragment.to_string(),
                },
                Vec::new(),
            );
        }

        let prepared = self.prepare(question, schema);

        let start_time = Instant::now();
        let response = self.model.complete(&prepared.prompt).await;
        let elapsed = start_time.elapsed();

        let response = match response {
            Ok(text) => text,
            Err(e) => {
                log::error!("LLM Error: {}", e);
                return Generation::rejected(
                    GenerationStatus::ModelFailure {
                        message: e.to_string(),
                    },
                    prepared.advisories,
                );
            }
        };

        match self.extractor.extract(&response) {
            Some(sql) => {
                log::info!("Generated SQL in {:.2}s", elapsed.as_secs_f64());
                Generation {
                    sql: Some(sql),
                    elapsed,
                    status: GenerationStatus::Generated,
                    advisories: prepared.advisories,
                }
            }
            None => {
                log::warn!("No SELECT statement in model response");
                Generation {
                    sql: None,
                    elapsed,
                    status: GenerationStatus::NoExtractableSql,
                    advisories: prepared.advisories,
                }
            }
        }
    }
}
