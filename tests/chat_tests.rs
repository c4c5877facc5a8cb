//! Chat loop tests driven through in-memory input and output

use async_trait::async_trait;
use querynova::api::run_chat;
use querynova::config::{AuthConfig, DisplayConfig};
use querynova::{Database, Denylist, LanguageModel, QueryPipeline, Result, Session};
use std::io::Cursor;
use std::sync::Arc;

struct EchoSql;

#[async_trait]
impl LanguageModel for EchoSql {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok("Here you go:\nSELECT name FROM users ORDER BY id;".to_string())
    }

    fn name(&self) -> &str {
        "echo-sql"
    }
}

fn database() -> Database {
    let db = Database::memory().unwrap();
    db.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
         INSERT INTO users (id, name) VALUES (1, 'Ada'), (2, 'Grace');",
    )
    .unwrap();
    db
}

async fn chat(database: &Database, auth: AuthConfig, script: &str) -> String {
    let pipeline = QueryPipeline::new(Arc::new(EchoSql), Denylist::default()).unwrap();
    let mut session = Session::open(database, database, &pipeline, auth);
    let mut output = Vec::new();

    run_chat(
        &mut session,
        &DisplayConfig::default(),
        Cursor::new(script.as_bytes().to_vec()),
        &mut output,
    )
    .await
    .unwrap();

    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_question_and_history() {
    let db = database();
    let output = chat(&db, AuthConfig::default(), "show all users\nhistory\nexit\n").await;

    assert!(output.contains("LLM: echo-sql"));
    assert!(output.contains("Database loaded: 1 tables"));
    assert!(output.contains("SQL Query Generated:"));
    assert!(output.contains("SELECT name FROM users ORDER BY id;"));
    assert!(output.contains("Grace"));
    assert!(output.contains("1. ["));
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_schema_commands() {
    let db = database();
    let output = chat(
        &db,
        AuthConfig::default(),
        "tables\ntable USERS\ntable nope\n",
    )
    .await;

    assert!(output.contains("📄 users"));
    assert!(output.contains("Columns in users:\nid, name"));
    assert!(output.contains("Unknown table: nope"));
}

#[tokio::test]
async fn test_denylisted_question() {
    let db = database();
    let output = chat(&db, AuthConfig::default(), "what is the capital of Peru\n").await;

    assert!(output.contains("only supports database-related questions"));
    assert!(!output.contains("SQL Query Generated"));
}

#[tokio::test]
async fn test_login_then_question() {
    let db = database();
    let auth = AuthConfig {
        username: Some("admin".to_string()),
        password: Some("pw".to_string()),
    };
    let output = chat(&db, auth, "admin\nbad\nadmin\npw\nshow all users\n").await;

    assert!(output.contains("Invalid username or password!"));
    assert!(output.contains("Welcome, admin!"));
    assert!(output.contains("Ada"));
}

#[tokio::test]
async fn test_table_count_hidden_until_login() {
    let db = database();
    let auth = AuthConfig {
        username: Some("admin".to_string()),
        password: Some("pw".to_string()),
    };

    let output = chat(&db, auth.clone(), "admin\nbad\n").await;
    assert!(output.contains("Login required"));
    assert!(!output.contains("Database loaded"));
    assert!(!output.contains("users"));

    let output = chat(&db, auth, "admin\npw\nexit\n").await;
    let welcome = output.find("Welcome, admin!").unwrap();
    let loaded = output.find("Database loaded: 1 tables").unwrap();
    assert!(welcome < loaded);
}
