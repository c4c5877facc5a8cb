//! Interactive chat loop
//!
//! Reads questions line by line, shows the generated SQL with its generation
//! time and the rows it returned. Commands cover the schema browser, query
//! history and the login gate.

use super::pipeline::GenerationStatus;
use super::session::{Answer, Execution, Session};
use crate::config::DisplayConfig;
use crate::error::{QueryNovaError, Result};
use crate::utils::{format_schema, format_seconds, format_table};
use std::io::{BufRead, Write};

/// Run a chat session until `exit` or end of input
pub async fn run_chat<R, W>(
    session: &mut Session<'_>,
    display: &DisplayConfig,
    mut input: R,
    output: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "💬 QueryNova - Smart Database Assistant")?;
    writeln!(output, "LLM: {}", session.pipeline().model_name())?;
    writeln!(output, "\nType 'help' for commands, 'exit' to quit")?;
    writeln!(output, "{}", "-".repeat(50))?;

    let mut announced = false;
    loop {
        if !session.is_authenticated() {
            if !login(session, &mut input, output)? {
                break;
            }
            continue;
        }
        if !announced {
            match session.schema() {
                Some(schema) => writeln!(output, "Database loaded: {} tables", schema.len())?,
                None => writeln!(output, "⚠️ Database schema unavailable")?,
            }
            announced = true;
        }

        write!(output, "\nQuestion: ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        match lower.as_str() {
            "quit" | "exit" | "q" => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            "help" => {
                writeln!(output, "\nCommands:")?;
                writeln!(output, "  tables        - List database tables")?;
                writeln!(output, "  table <name>  - Show the columns of a table")?;
                writeln!(output, "  history       - Show generated queries")?;
                writeln!(output, "  refresh       - Re-read the database schema")?;
                writeln!(output, "  logout        - End the login session")?;
                writeln!(output, "  exit/quit     - End session")?;
                writeln!(output, "Anything else is sent as a question.")?;
            }
            "tables" => match session.schema() {
                Some(schema) if !schema.is_empty() => {
                    writeln!(output, "\n📂 Database Tables")?;
                    for name in schema.table_names() {
                        writeln!(output, "  📄 {}", name)?;
                    }
                }
                _ => writeln!(output, "No tables available")?,
            },
            "history" => {
                if session.history().is_empty() {
                    writeln!(output, "No queries yet")?;
                }
                for (i, entry) in session.history().iter().enumerate() {
                    writeln!(
                        output,
                        "{}. [{}] {} ({})",
                        i + 1,
                        entry.asked_at.format("%H:%M:%S"),
                        entry.question,
                        format_seconds(entry.generation_time)
                    )?;
                    writeln!(output, "   {}", entry.sql.replace('\n', "\n   "))?;
                }
            }
            "refresh" => {
                if session.refresh_schema() {
                    let count = session.schema().map(|s| s.len()).unwrap_or(0);
                    writeln!(output, "Schema reloaded: {} tables", count)?;
                } else {
                    writeln!(output, "❌ Could not reload the database schema")?;
                }
            }
            "logout" => {
                session.logout();
                writeln!(output, "Logged out")?;
            }
            _ if lower.starts_with("table ") => {
                let name = line[6..].trim();
                match session.schema().and_then(|s| s.find_table(name)) {
                    Some(table) => {
                        writeln!(output, "Columns in {}:", table.name)?;
                        writeln!(output, "{}", table.columns.join(", "))?;
                    }
                    None => writeln!(output, "❌ Unknown table: {}", name)?,
                }
            }
            _ => {
                let answer = session.ask(&line, true).await?;
                render_answer(&answer, display, output)?;
            }
        }
    }

    Ok(())
}

/// Print an answer the way the chat and `ask` command show it
pub fn render_answer<W: Write>(
    answer: &Answer,
    display: &DisplayConfig,
    output: &mut W,
) -> Result<()> {
    let generation = &answer.generation;
    for advisory in &generation.advisories {
        writeln!(output, "⚠️ {}", advisory)?;
    }

    let Some(sql) = generation.sql.as_deref() else {
        let message = generation.failure_message().unwrap_or_default();
        writeln!(output, "❌ {}", message)?;
        if let GenerationStatus::NoExtractableSql = generation.status {
            writeln!(output, "⏱ Model answered in {}", format_seconds(generation.elapsed))?;
        }
        return Ok(());
    };

    writeln!(output, "✅ SQL Query Generated:")?;
    writeln!(output, "{}", sql)?;
    writeln!(output, "⏱ Generated in {}", format_seconds(generation.elapsed))?;

    match &answer.execution {
        Execution::Skipped => {}
        Execution::Rows(rows) => {
            writeln!(output, "⏱ Query executed in {}", format_seconds(rows.elapsed))?;
            writeln!(
                output,
                "{}",
                format_table(rows, display.max_rows, display.max_cell_width)
            )?;
        }
        Execution::Failed { message } => {
            writeln!(output, "❌ Error executing query: {}", message)?;
        }
    }

    Ok(())
}

/// Print the schema listing used by the `schema` command
pub fn render_schema<W: Write>(session: &Session<'_>, output: &mut W) -> Result<()> {
    session.ensure_authenticated()?;
    match session.schema() {
        Some(schema) if !schema.is_empty() => writeln!(output, "{}", format_schema(schema))?,
        Some(_) => writeln!(output, "Database has no tables")?,
        None => writeln!(output, "❌ Database schema unavailable")?,
    }
    Ok(())
}

/// Print the columns of one table, matched case-insensitively
pub fn render_table<W: Write>(session: &Session<'_>, name: &str, output: &mut W) -> Result<()> {
    session.ensure_authenticated()?;
    let Some(schema) = session.schema() else {
        return Err(QueryNovaError::Storage("Database schema unavailable".to_string()));
    };
    let Some(table) = schema.find_table(name) else {
        return Err(QueryNovaError::Storage(format!("Unknown table: {}", name)));
    };
    writeln!(output, "📄 {}", table.name)?;
    for column in &table.columns {
        writeln!(output, "   {}", column)?;
    }
    Ok(())
}

/// Prompt for credentials once; `false` when input ended
fn login<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    writeln!(output, "\n🔐 Login required")?;
    write!(output, "Username: ")?;
    output.flush()?;
    let Some(username) = read_line(input)? else {
        return Ok(false);
    };
    write!(output, "Password: ")?;
    output.flush()?;
    let Some(password) = read_line(input)? else {
        return Ok(false);
    };

    match session.login(&username, &password) {
        Ok(()) => writeln!(output, "Welcome, {}!", username)?,
        Err(e) => writeln!(output, "❌ {}", e)?,
    }
    Ok(true)
}

/// Next trimmed line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
