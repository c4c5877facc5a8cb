//! Prompt template
//!
//! The wording below is what the model is tuned against. Changing it changes
//! the SQL that comes back.

/// Build the instruction prompt from the selected schema texts and the question
pub fn build_prompt(question: &str, relevant_schema: &[String]) -> String {
    format!(
        "\nYou are an expert in converting English questions to SQL queries.\n\
         Use the following database schema information:\n\
         \n\
         {}\n\
         \n\
         Convert the following question into an SQL query.\n\
         Only return the SQL query (no explanation):\n\
         \n\
         \"{}\"\n",
        relevant_schema.join("\n"),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_template() {
        let schema = vec![
            "Table: users\nColumns: id, name".to_string(),
            "Table: orders\nColumns: id, user_id".to_string(),
        ];
        let prompt = build_prompt("show me all users", &schema);

        let expected = "
You are an expert in converting English questions to SQL queries.
Use the following database schema information:

Table: users
Columns: id, name
Table: orders
Columns: id, user_id

Convert the following question into an SQL query.
Only return the SQL query (no explanation):

\"show me all users\"
";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_empty_schema_section() {
        let prompt = build_prompt("count rows", &[]);
        assert!(prompt.contains("information:\n\n\n\nConvert"));
        assert!(prompt.ends_with("\"count rows\"\n"));
    }
}
