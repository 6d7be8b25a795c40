//! Couchbase N1QL rule set.
//!
//! Array `[ ]` and object `{ }` literals are blocks; parameters are `$name`
//! or `$1`.

use super::standard::SET_OPERATORS;
use super::{DialectRules, StringType};

const COMMANDS: &[&str] = &[
    "ADVISE",
    "ALTER INDEX",
    "BEGIN TRANSACTION",
    "BUILD INDEX",
    "COMMIT TRANSACTION",
    "CREATE FUNCTION",
    "CREATE INDEX",
    "CREATE PRIMARY INDEX",
    "CREATE SCOPE",
    "DELETE FROM",
    "DROP FUNCTION",
    "DROP INDEX",
    "DROP PRIMARY INDEX",
    "EXECUTE",
    "EXPLAIN",
    "FROM",
    "GRANT",
    "GROUP BY",
    "HAVING",
    "INFER",
    "INSERT INTO",
    "LET",
    "LIMIT",
    "MERGE",
    "NEST",
    "OFFSET",
    "ORDER BY",
    "PREPARE",
    "RETURNING",
    "REVOKE",
    "ROLLBACK TRANSACTION",
    "SELECT",
    "SET",
    "UNNEST",
    "UNSET",
    "UPDATE",
    "UPSERT INTO",
    "USE KEYS",
    "VALUES",
    "WHERE",
    "WITH",
];

const JOINS: &[&str] = &[
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
];

const KEYWORDS: &[&str] = &[
    "ALL", "ANY", "ARRAY", "ARRAY_AGG", "ARRAY_LENGTH", "AS", "ASC", "BETWEEN", "BY", "COUNT",
    "DESC", "DISTINCT", "EVERY", "EXISTS", "FALSE", "FIRST", "FOR", "IN", "INTO", "IS", "KEYS",
    "LIKE", "META", "MISSING", "NOT", "NULL", "OBJECT", "RAW", "SATISFIES", "THEN", "TO_STRING",
    "TRUE", "VALUE", "WITHIN",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "n1ql",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_logical_operators: vec!["AND", "OR", "XOR"],
        reserved_keywords: KEYWORDS.to_vec(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::SingleQuote,
            StringType::Backtick,
        ],
        block_start: vec!["(", "[", "{", "CASE"],
        block_end: vec![")", "]", "}", "END"],
        indexed_placeholder_types: Vec::new(),
        named_placeholder_types: vec!["$"],
        line_comment_types: vec!["#", "--"],
        operators: vec!["=="],
        ..DialectRules::default()
    }
    .dedupe()
}
