//! Dialect-specific formatting behaviour

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use sqlprettier::{format, Config, Dialect, FormatError, Params};

fn fmt_in(dialect: Dialect, sql: &str) -> String {
    let config = Config {
        language: dialect,
        ..Default::default()
    };
    format(sql, &config).unwrap()
}

#[test]
fn test_mysql_variable_assignment_with_subquery() {
    assert_eq!(
        fmt_in(Dialect::Mysql, "SET @foo := (SELECT * FROM tbl);"),
        "SET\n  @foo := (\n    SELECT\n      *\n    FROM\n      tbl\n  );"
    );
}

#[test]
fn test_mysql_hash_comments() {
    assert_eq!(
        fmt_in(Dialect::Mysql, "SELECT a # comment\nFROM b # comment"),
        "SELECT\n  a # comment\nFROM\n  b # comment"
    );
}

#[test]
fn test_mysql_system_variables() {
    assert_eq!(
        fmt_in(
            Dialect::Mysql,
            "SELECT @@GLOBAL.time, @@SYSTEM.date, @@hour FROM foo;"
        ),
        "SELECT\n  @@GLOBAL.time,\n  @@SYSTEM.date,\n  @@hour\nFROM\n  foo;"
    );
}

#[test]
fn test_mysql_alter_table_modify() {
    assert_eq!(
        fmt_in(
            Dialect::Mysql,
            "ALTER TABLE t MODIFY col1 VARCHAR(50) CHARACTER SET greek"
        ),
        "ALTER TABLE\n  t MODIFY col1 VARCHAR(50) CHARACTER SET greek"
    );
}

#[test]
fn test_sqlite_positional_placeholders() {
    let config = Config {
        language: Dialect::Sqlite,
        params: Some(Params::Positional(vec![
            "first".into(),
            "second".into(),
            "third".into(),
        ])),
        ..Default::default()
    };
    assert_eq!(
        format("SELECT ?, ?, ?;", &config).unwrap(),
        "SELECT\n  first,\n  second,\n  third;"
    );
}

#[test]
fn test_hive_distribute_and_sort() {
    assert_eq!(
        fmt_in(Dialect::Hive, "SELECT a FROM t DISTRIBUTE BY a SORT BY a"),
        "SELECT\n  a\nFROM\n  t\nDISTRIBUTE BY\n  a\nSORT BY\n  a"
    );
}

#[test]
fn test_hive_rejects_named_params() {
    let config = Config {
        language: Dialect::Hive,
        params: Some(Params::Named(HashMap::from([(
            "a".to_string(),
            "1".to_string(),
        )]))),
        ..Default::default()
    };
    let err = format("SELECT :a", &config).unwrap_err();
    assert!(matches!(
        err,
        FormatError::UnsupportedParams { kind: "named", .. }
    ));
}

#[test]
fn test_n1ql_array_literal_inline() {
    assert_eq!(
        fmt_in(Dialect::N1ql, "SELECT [1, 2] FROM t"),
        "SELECT\n  [1, 2]\nFROM\n  t"
    );
}

#[test]
fn test_n1ql_object_literal_inline() {
    assert_eq!(
        fmt_in(Dialect::N1ql, "SELECT {'a': 1} FROM t"),
        "SELECT\n  {'a': 1}\nFROM\n  t"
    );
}

#[test]
fn test_plsql_backtick_member_access() {
    assert_eq!(
        fmt_in(Dialect::Plsql, "SELECT `t`.`c` FROM t"),
        "SELECT\n  `t`.`c`\nFROM\n  t"
    );
}
