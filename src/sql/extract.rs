//! SQL extraction from model responses
//!
//! Models wrap their answer in prose or code fences. The extractor keeps the
//! first `SELECT ... ;` span and nothing else. It does not parse SQL: a `;`
//! inside a string literal or comment ends the match early.

use crate::error::Result;
use regex::Regex;

/// Pulls the first SELECT statement out of free text
pub struct SqlExtractor {
    select_regex: Regex,
}

impl SqlExtractor {
    pub fn new() -> Result<Self> {
        // case-insensitive, `.` spans newlines, lazy up to the first `;`
        let select_regex = Regex::new(r"(?is)SELECT .*?;")?;
        Ok(Self { select_regex })
    }

    /// The first `SELECT ... ;` substring, trimmed, or `None`
    pub fn extract(&self, response_text: &str) -> Option<String> {
        self.select_regex
            .find(response_text)
            .map(|m| m.as_str().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        SqlExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn test_statement_after_prose() {
        assert_eq!(
            extract("Here is your query: SELECT * FROM users;"),
            Some("SELECT * FROM users;".to_string())
        );
    }

    #[test]
    fn test_no_statement() {
        assert_eq!(extract("I cannot help with that."), None);
    }

    #[test]
    fn test_multiline_stops_at_first_semicolon() {
        assert_eq!(
            extract("SELECT id FROM t\nWHERE x=1;\nExtra text after."),
            Some("SELECT id FROM t\nWHERE x=1;".to_string())
        );
    }

    #[test]
    fn test_code_fence_and_lowercase() {
        let response = "```sql\nselect name from users where id = 3;\n```";
        assert_eq!(
            extract(response),
            Some("select name from users where id = 3;".to_string())
        );
    }

    #[test]
    fn test_first_of_several() {
        assert_eq!(
            extract("SELECT 1; SELECT 2;"),
            Some("SELECT 1;".to_string())
        );
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(extract("SELECT * FROM users"), None);
    }

    #[test]
    fn test_semicolon_in_literal_truncates() {
        assert_eq!(
            extract("SELECT * FROM notes WHERE body = 'a;b';"),
            Some("SELECT * FROM notes WHERE body = 'a;".to_string())
        );
    }
}
