//! Statement builders for the verified query procedures.
//!
//! Every caller-supplied value is embedded as a single-quoted string literal.
//! Quotes are doubled so values cannot terminate the literal early; this is
//! not a general SQL injection defence.

/// Procedure returning one row per verified query (NAME, QUESTION, SQL_TEXT).
pub const LIST_PROCEDURE: &str = "LIST_VERIFIED_QUERIES";

/// Procedure adding or replacing a verified query.
pub const ADD_PROCEDURE: &str = "ADD_VERIFIED_QUERY";

/// Procedure removing a verified query by name.
pub const REMOVE_PROCEDURE: &str = "REMOVE_VERIFIED_QUERY";

/// Doubles every single quote in `value`.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Wraps `value` in single quotes after escaping it.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_literal(value))
}

fn call(procedure: &str, args: &[&str]) -> String {
    let args: Vec<String> = args.iter().map(|a| quote_literal(a)).collect();
    format!("CALL {}({})", procedure, args.join(", "))
}

/// `CALL LIST_VERIFIED_QUERIES('<view>')`
pub fn list_statement(semantic_view: &str) -> String {
    call(LIST_PROCEDURE, &[semantic_view])
}

/// `CALL ADD_VERIFIED_QUERY('<view>', '<name>', '<question>', '<sql>')`
pub fn add_statement(semantic_view: &str, name: &str, question: &str, sql: &str) -> String {
    call(ADD_PROCEDURE, &[semantic_view, name, question, sql])
}

/// `CALL REMOVE_VERIFIED_QUERY('<view>', '<name>')`
pub fn remove_statement(semantic_view: &str, name: &str) -> String {
    call(REMOVE_PROCEDURE, &[semantic_view, name])
}
