//! Apache Hive rule set.

use super::standard::{KEYWORDS, SET_OPERATORS};
use super::{DialectRules, StringType};

const COMMANDS: &[&str] = &[
    "ALTER",
    "ALTER COLUMN",
    "ALTER TABLE",
    "CLUSTER BY",
    "CREATE",
    "CREATE TABLE",
    "DESCRIBE",
    "DISTRIBUTE BY",
    "DROP",
    "DROP TABLE",
    "FETCH",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT",
    "INSERT INTO",
    "INSERT OVERWRITE TABLE",
    "LIMIT",
    "OFFSET",
    "ORDER BY",
    "PARTITIONED BY",
    "ROW FORMAT",
    "SELECT",
    "SET",
    "SET SCHEMA",
    "SHOW",
    "SORT BY",
    "STORED AS",
    "STORED BY",
    "TRUNCATE",
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
    "FULL JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "LEFT SEMI JOIN",
];

const EXTRA_KEYWORDS: &[&str] = &[
    "ARRAY", "COLLECT_LIST", "COLLECT_SET", "DELIMITED", "EXPLODE", "EXTERNAL", "FIELDS",
    "LATERAL VIEW", "LOCATION", "MAP", "ORC", "OVERWRITE", "PARQUET", "SERDE", "STRING",
    "STRUCT", "TABLESAMPLE", "TBLPROPERTIES", "TERMINATED", "TEXTFILE",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "hive",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_keywords: [KEYWORDS, EXTRA_KEYWORDS].concat(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::SingleQuote,
            StringType::Backtick,
        ],
        indexed_placeholder_types: vec!["?"],
        operators: vec!["<=>", "==", "||"],
        ..DialectRules::default()
    }
    .dedupe()
}
