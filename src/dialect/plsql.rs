//! Oracle PL/SQL rule set.

use super::standard::{KEYWORDS, SET_OPERATORS};
use super::{DialectRules, OverrideContext, StringType, WordChars};
use crate::lexer::{Token, TokenKind};

const COMMANDS: &[&str] = &[
    "ADD",
    "ALTER COLUMN",
    "ALTER TABLE",
    "BEGIN",
    "CONNECT BY",
    "CREATE TABLE",
    "DECLARE",
    "DELETE FROM",
    "DELETE",
    "DROP TABLE",
    "EXCEPTION",
    "FETCH FIRST",
    "FROM",
    "GROUP BY",
    "HAVING",
    "INSERT INTO",
    "INSERT",
    "LIMIT",
    "LOOP",
    "MODIFY",
    "OFFSET",
    "ORDER BY",
    "RETURNING",
    "SELECT",
    "SET CURRENT SCHEMA",
    "SET SCHEMA",
    "SET",
    "START WITH",
    "UPDATE",
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
    "NATURAL JOIN",
    "CROSS APPLY",
    "OUTER APPLY",
];

const EXTRA_KEYWORDS: &[&str] = &[
    "BINARY_INTEGER", "BODY", "BULK", "COLLECT", "CURSOR", "DECODE", "ELSIF", "EXIT", "FORALL",
    "FUNCTION", "NOCOPY", "NUMBER", "NVL", "OUT", "PACKAGE", "PRAGMA", "PRIOR", "PROCEDURE",
    "RAISE", "RETURN", "ROWNUM", "SYSDATE", "TO_CHAR", "TO_DATE", "TYPE", "VARCHAR2", "WHILE",
];

pub fn rules() -> DialectRules {
    DialectRules {
        name: "plsql",
        reserved_commands: COMMANDS.to_vec(),
        reserved_binary_commands: [SET_OPERATORS, JOINS].concat(),
        reserved_logical_operators: vec!["AND", "OR", "XOR"],
        reserved_keywords: [KEYWORDS, EXTRA_KEYWORDS].concat(),
        string_types: vec![
            StringType::DoubleQuote,
            StringType::NationalQuote,
            StringType::SingleQuote,
            StringType::Backtick,
        ],
        indexed_placeholder_types: vec!["?"],
        named_placeholder_types: vec![":"],
        special_word_chars: WordChars {
            any: "_$#.@",
            prefix: "",
            suffix: "",
        },
        operators: vec!["||", "**", ":=", "~=", "^=", ">>", "<<", "=>"],
        token_override: Some(override_token),
        ..DialectRules::default()
    }
    .dedupe()
}

fn override_token(token: Token, ctx: &OverrideContext<'_>) -> Token {
    // `table`.`column`
    if token.text == "."
        && ctx.ahead.is_some_and(|t| t.text.starts_with('`'))
        && ctx.behind.is_some_and(|t| t.text.ends_with('`'))
    {
        return Token {
            kind: TokenKind::Operator,
            ..token
        };
    }

    // ... BY SET
    if token.kind == TokenKind::ReservedCommand
        && token.is_word("SET")
        && ctx.previous_reserved.is_some_and(|t| t.is_word("BY"))
    {
        return Token {
            kind: TokenKind::ReservedKeyword,
            ..token
        };
    }

    token
}
