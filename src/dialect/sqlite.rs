//! SQLite rule set.
//!
//! Adds `[bracket]` quoted names and the `:name`, `@name`, `$name` parameter
//! forms next to `?` and `?NNN`.

use super::standard::{KEYWORDS, SET_OPERATORS};
use super::{DialectRules, StringType};

const COMMANDS: &[&str] = &[
    "ADD",
    "ALTER COLUMN",
    "ALTER TABLE",
    "CREATE TABLE",
    "DROP TABLE",
    "DELETE",
    "DELETE FROM",
    "FETCH FIRST",
    "FETCH NEXT",
    "FETCH PRIOR",
    "FETCH LAST",
    "FETCH ABSOLUTE",
    "FETCH RELATIVE",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "LIMIT",
    "OFFSET",
    "ORDER BY",
    "SELECT",
    "SET SCHEMA",
    "SET",
    "UPDATE",
    "VALUES",
    "WHERE",
    "WITH",
];

const JOINS: &[&str] = &[
    "JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "INNER JOIN",
    "CROSS JOIN",
    "NATURAL JOIN",
    "NATURAL LEFT JOIN",
    "NATURAL LEFT OUTER JOIN",
    "NATURAL INNER JOIN",
    "NATURAL CROSS JOIN",
];

const EXTRA_KEYWORDS: &[&str] = &[
    "ABORT", "AUTOINCREMENT", "BLOB", "COLLATE", "CONFLICT", "GLOB", "GROUP_CONCAT", "IFNULL",
    "IGNORE", "INSTR", "JULIANDAY", "PRAGMA", "RAISE", "REAL", "REGEXP", "REPLACE", "ROWID",
    "STRFTIME", "TEXT", "TYPEOF", "VACUUM", "WITHOUT",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "sqlite",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_keywords: [KEYWORDS, EXTRA_KEYWORDS].concat(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::SingleQuote,
            StringType::Backtick,
            StringType::Bracket,
        ],
        indexed_placeholder_types: vec!["?"],
        named_placeholder_types: vec![":", "@", "$"],
        operators: vec!["||", "<<", ">>", "==", "!="],
        ..DialectRules::default()
    }
    .dedupe()
}
