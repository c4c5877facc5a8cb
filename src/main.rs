//! querynova CLI application
//!
//! Command-line interface for the querynova library.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use querynova::api::{render_answer, render_schema, render_table, run_chat};
use querynova::{Config, Database, Denylist, OpenAiCompatibleModel, QueryPipeline, Session};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "querynova")]
#[command(about = "Ask questions about your database in plain English")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides configuration)
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Model name (overrides configuration)
    #[arg(long, global = true)]
    model: Option<String>,

    /// OpenAI-compatible API base URL (overrides configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Username, when a login is configured
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password, when a login is configured
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SQL for one question and run it
    Ask {
        /// The question
        question: String,

        /// Only generate the SQL, do not run it
        #[arg(long)]
        no_execute: bool,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive question session
    Chat,

    /// List the tables and columns of the database
    Schema {
        /// Show a single table
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Show the prompt a question would produce, without calling the model
    Prompt {
        /// The question
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging before the configuration is read
    let rust_log = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !rust_log {
        let provisional = std::env::var("QUERYNOVA_LOG")
            .ok()
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(LevelFilter::Warn);
        log::set_max_level(provisional);
    }

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(base_url) = cli.base_url {
        config.llm.base_url = base_url;
    }
    config.validate().context("invalid configuration")?;
    if !rust_log {
        log::set_max_level(config.log_level_filter());
    }

    let database = Database::new(&config.database.path)
        .with_context(|| format!("cannot open database {}", config.database.path))?;
    let model = Arc::new(OpenAiCompatibleModel::new(&config.llm)?);
    let pipeline = QueryPipeline::new(model, Denylist::new(config.pipeline.denylist.clone()))?;
    let mut session = Session::open(&database, &database, &pipeline, config.auth.clone());

    let credentials = (cli.username.as_deref(), cli.password.as_deref());
    match cli.command {
        Commands::Ask {
            question,
            no_execute,
            json,
        } => {
            authenticate(&mut session, credentials)?;
            return ask_command(&mut session, &config, &question, !no_execute, json).await;
        }
        Commands::Chat => {
            if let (Some(username), Some(password)) = credentials {
                session.login(username, password)?;
            }
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_chat(&mut session, &config.display, stdin.lock(), &mut stdout).await?;
        }
        Commands::Schema { table } => {
            authenticate(&mut session, credentials)?;
            schema_command(&session, table.as_deref())?;
        }
        Commands::Prompt { question } => {
            authenticate(&mut session, credentials)?;
            prompt_command(&session, &question)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log in with command-line credentials when the database requires it
fn authenticate(
    session: &mut Session<'_>,
    credentials: (Option<&str>, Option<&str>),
) -> anyhow::Result<()> {
    if !session.requires_login() {
        return Ok(());
    }
    let (Some(username), Some(password)) = credentials else {
        bail!("this database requires --username and --password");
    };
    session.login(username, password)?;
    Ok(())
}

async fn ask_command(
    session: &mut Session<'_>,
    config: &Config,
    question: &str,
    execute: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let answer = session.ask(question, execute).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("🔍 Question: \"{}\"", question);
        let mut stdout = io::stdout();
        render_answer(&answer, &config.display, &mut stdout)?;
        stdout.flush()?;
    }

    if answer.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn schema_command(session: &Session<'_>, table: Option<&str>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    match table {
        Some(name) => render_table(session, name, &mut stdout)?,
        None => render_schema(session, &mut stdout)?,
    }
    Ok(())
}

fn prompt_command(session: &Session<'_>, question: &str) -> anyhow::Result<()> {
    if let Some(fragment) = session.pipeline().denylist().matched(question) {
        println!("❌ Rejected: question matches denylisted phrase \"{}\"", fragment);
        return Ok(());
    }

    let prepared = session.prepare(question)?;
    let keywords: Vec<&str> = prepared.keywords.iter().map(String::as_str).collect();
    println!("🔑 Keywords: {}", keywords.join(", "));
    for advisory in &prepared.advisories {
        println!("⚠️ {}", advisory);
    }
    println!("📋 Schema chunks: {}", prepared.schema_texts.len());
    println!("{}", "-".repeat(50));
    println!("{}", prepared.prompt);
    println!("{}", "-".repeat(50));
    Ok(())
}
