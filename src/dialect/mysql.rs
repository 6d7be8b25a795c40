//! MySQL rule set.
//!
//! `@var` and `@@system.var` are identifiers, `#` starts a line comment.

use super::standard::{KEYWORDS, SET_OPERATORS};
use super::{DialectRules, StringType, WordChars};

const COMMANDS: &[&str] = &[
    "ADD",
    "ALTER COLUMN",
    "ALTER TABLE",
    "CREATE TABLE",
    "DELETE FROM",
    "DELETE",
    "DROP TABLE",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "INSERT",
    "LIMIT",
    "OFFSET",
    "ON DUPLICATE KEY UPDATE",
    "ORDER BY",
    "REPLACE INTO",
    "SELECT",
    "SET",
    "SHOW",
    "TRUNCATE TABLE",
    "UPDATE",
    "USE",
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
    "CROSS JOIN",
    "NATURAL JOIN",
    "STRAIGHT_JOIN",
    "NATURAL LEFT JOIN",
    "NATURAL LEFT OUTER JOIN",
    "NATURAL RIGHT JOIN",
    "NATURAL RIGHT OUTER JOIN",
];

const EXTRA_KEYWORDS: &[&str] = &[
    "AUTO_INCREMENT", "CHARACTER SET", "CHARSET", "COLLATE", "CONCAT", "DATABASE", "DATE_FORMAT",
    "DATETIME", "DIV", "ENGINE", "ENUM", "GROUP_CONCAT", "IFNULL", "MOD", "MODIFY", "NOW",
    "REGEXP", "RLIKE", "SIGNED", "TINYINT", "UNSIGNED",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "mysql",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_logical_operators: vec!["AND", "OR", "XOR"],
        reserved_keywords: [KEYWORDS, EXTRA_KEYWORDS].concat(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::SingleQuote,
            StringType::HexQuote,
            StringType::Backtick,
        ],
        indexed_placeholder_types: vec!["?"],
        line_comment_types: vec!["--", "#"],
        special_word_chars: WordChars {
            any: "$",
            prefix: "@",
            suffix: "",
        },
        operators: vec![":=", "<<", ">>", "<=>", "&&", "||", "->", "->>"],
        ..DialectRules::default()
    }
    .dedupe()
}
