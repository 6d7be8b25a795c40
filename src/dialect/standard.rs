//! Standard SQL rule set, the default dialect.

use super::{DialectRules, StringType, WordChars};

pub(crate) const SET_OPERATORS: &[&str] = &[
    "INTERSECT",
    "INTERSECT ALL",
    "INTERSECT DISTINCT",
    "UNION",
    "UNION ALL",
    "UNION DISTINCT",
    "EXCEPT",
    "EXCEPT ALL",
    "EXCEPT DISTINCT",
    "MINUS",
    "MINUS ALL",
    "MINUS DISTINCT",
];

pub(crate) const JOINS: &[&str] = &[
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "NATURAL JOIN",
];

const COMMANDS: &[&str] = &[
    "ADD",
    "ALTER COLUMN",
    "ALTER TABLE",
    "CREATE TABLE",
    "CREATE VIEW",
    "DELETE FROM",
    "DELETE",
    "DROP TABLE",
    "FETCH FIRST",
    "FETCH NEXT",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "INSERT",
    "LIMIT",
    "OFFSET",
    "ORDER BY",
    "RETURNING",
    "SELECT",
    "SELECT DISTINCT",
    "SET SCHEMA",
    "SET",
    "TRUNCATE TABLE",
    "UPDATE",
    "VALUES",
    "WHERE",
    "WINDOW",
    "WITH",
];

/// Keywords and built-in functions shared by most dialects
pub(crate) const KEYWORDS: &[&str] = &[
    "ABS", "ALL", "ALTER", "ANY", "AS", "ASC", "AVG", "BETWEEN", "BIGINT", "BOOLEAN", "BY",
    "CAST", "CHAR", "CHECK", "COALESCE", "COLUMN", "CONSTRAINT", "COUNT", "CREATE", "CROSS",
    "CURRENT_DATE", "CURRENT_TIMESTAMP", "DATE", "DECIMAL", "DEFAULT", "DESC", "DISTINCT",
    "DROP", "EXISTS", "FALSE", "FILTER", "FIRST", "FOREIGN", "FULL", "IF", "IN", "INDEX",
    "INNER", "INT", "INTEGER", "INTERVAL", "INTO", "IS", "KEY", "LAST", "LEFT", "LIKE",
    "LOWER", "MAX", "MIN", "NATURAL", "NEXT", "NOT", "NULL", "NULLIF", "NULLS", "NUMERIC",
    "ONLY", "OUTER", "OVER", "PARTITION", "PRIMARY", "RANK", "RECURSIVE", "REFERENCES",
    "RIGHT", "ROW", "ROWS", "ROW_NUMBER", "SUBSTRING", "SUM", "TABLE", "THEN", "TIMESTAMP",
    "TO", "TRIM", "TRUE", "UNIQUE", "UPPER", "VARCHAR", "VIEW",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "sql",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_keywords: KEYWORDS.to_vec(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::SingleQuote,
            StringType::NationalQuote,
            StringType::HexQuote,
            StringType::Backtick,
        ],
        named_placeholder_types: vec![":"],
        special_word_chars: WordChars::default(),
        operators: vec!["||", "::"],
        ..DialectRules::default()
    }
    .dedupe()
}
