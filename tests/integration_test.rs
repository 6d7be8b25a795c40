//! Integration tests for sqlprettier
//!
//! These tests drive the public API end to end: tokenizer, case
//! normalization, layout and the stream pipeline together.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::collections::HashMap;
use std::io::{BufReader, Cursor};

use pretty_assertions::assert_eq;
use sqlprettier::process::format_file;
use sqlprettier::{
    format, AliasAs, Config, Dialect, FormatError, IndentStyle, KeywordCase, MultilineLists,
    Params, TokenKind, Tokenizer,
};

fn fmt(sql: &str) -> String {
    format(sql, &Config::default()).unwrap()
}

fn fmt_with(sql: &str, config: &Config) -> String {
    format(sql, config).unwrap()
}

#[test]
fn test_simple_select() {
    assert_eq!(fmt("SELECT a,b FROM t"), "SELECT\n  a,\n  b\nFROM\n  t");
}

#[test]
fn test_positional_params() {
    let config = Config {
        params: Some(Params::Positional(vec!["x".into(), "y".into()])),
        ..Default::default()
    };
    assert_eq!(fmt_with("SELECT ?, ?", &config), "SELECT\n  x,\n  y");
}

#[test]
fn test_preserve_keeps_lowercase_alias() {
    assert_eq!(fmt("select a as b"), "select\n  a as b");
}

#[test]
fn test_preserve_unifies_alias_case() {
    // two of three AS tokens are upper case
    assert_eq!(
        fmt("SELECT a AS x, b as y, c AS z"),
        "SELECT\n  a AS x,\n  b AS y,\n  c AS z"
    );
}

#[test]
fn test_alias_case_tie_goes_lower() {
    assert_eq!(fmt("SELECT a AS x, b as y"), "SELECT\n  a as x,\n  b as y");
}

#[test]
fn test_join_stays_at_clause_child_depth() {
    assert_eq!(
        fmt("SELECT * FROM a JOIN b ON a.id = b.id"),
        "SELECT\n  *\nFROM\n  a\n  JOIN b ON a.id = b.id"
    );
}

#[test]
fn test_several_joins() {
    let sql = "SELECT * FROM customers JOIN orders ON customers.customer_id = orders.customer_id \
               JOIN items USING (item_id, name);";
    assert_eq!(
        fmt(sql),
        "SELECT\n  *\nFROM\n  customers\n  JOIN orders ON customers.customer_id = orders.customer_id\n  JOIN items USING (item_id, name);"
    );
}

#[test]
fn test_case_expression() {
    assert_eq!(
        fmt("SELECT CASE WHEN a = 1 THEN 'x' ELSE 'y' END FROM t"),
        "SELECT\n  CASE\n    WHEN a = 1 THEN 'x'\n    ELSE 'y'\n  END\nFROM\n  t"
    );
}

#[test]
fn test_case_with_parentheses_inside() {
    assert_eq!(
        fmt("SELECT CASE WHEN (a = 1) THEN f(b) ELSE 'y' END FROM t"),
        "SELECT\n  CASE\n    WHEN (a = 1) THEN f(b)\n    ELSE 'y'\n  END\nFROM\n  t"
    );
}

#[test]
fn test_subquery() {
    assert_eq!(
        fmt("SELECT * FROM (SELECT a FROM b) x"),
        "SELECT\n  *\nFROM\n  (\n    SELECT\n      a\n    FROM\n      b\n  ) x"
    );
}

#[test]
fn test_insert_values() {
    assert_eq!(
        fmt("INSERT INTO t (a, b) VALUES (1, 2)"),
        "INSERT INTO\n  t (a, b)\nVALUES\n  (1, 2)"
    );
}

#[test]
fn test_fetch_first() {
    assert_eq!(
        fmt("SELECT * FETCH FIRST 2 ROWS ONLY;"),
        "SELECT\n  *\nFETCH FIRST\n  2 ROWS ONLY;"
    );
}

#[test]
fn test_multi_word_keyword_whitespace_collapsed() {
    assert_eq!(
        fmt("SELECT a FROM t GROUP\n   BY a"),
        "SELECT\n  a\nFROM\n  t\nGROUP BY\n  a"
    );
}

#[test]
fn test_multiple_statements() {
    assert_eq!(
        fmt("SELECT a FROM t; SELECT b FROM u;"),
        "SELECT\n  a\nFROM\n  t;\nSELECT\n  b\nFROM\n  u;"
    );
}

#[test]
fn test_line_comments() {
    assert_eq!(
        fmt("-- header\nSELECT a, -- first\n  b\nFROM t"),
        "-- header\nSELECT\n  a, -- first\n  b\nFROM\n  t"
    );
}

#[test]
fn test_keyword_case_upper() {
    let config = Config {
        keyword_case: KeywordCase::Upper,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("select a from t where b between 1 and 2 and c = 'and'", &config),
        "SELECT\n  a\nFROM\n  t\nWHERE\n  b BETWEEN 1 AND 2\n  AND c = 'and'"
    );
}

#[test]
fn test_keyword_case_lower_leaves_identifiers() {
    let config = Config {
        keyword_case: KeywordCase::Lower,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT MyCol FROM \"MyTable\" WHERE X = 1", &config),
        "select\n  MyCol\nfrom\n  \"MyTable\"\nwhere\n  X = 1"
    );
}

#[test]
fn test_case_uniformity() {
    let sql = "Select a, Count(b) From t Left Join u On t.id = u.id Where x Is Not Null Group By a";
    for (case, expect_upper) in [(KeywordCase::Upper, true), (KeywordCase::Lower, false)] {
        let config = Config {
            keyword_case: case,
            ..Default::default()
        };
        let out = fmt_with(sql, &config);
        let tokens = Tokenizer::for_dialect(Dialect::Sql).unwrap().tokenize(&out);
        for token in tokens.iter().filter(|t| t.kind.is_reserved()) {
            let expected = if expect_upper {
                token.text.to_uppercase()
            } else {
                token.text.to_lowercase()
            };
            assert_eq!(token.text, expected, "{case} keyword in {out}");
        }
        assert!(out.contains("t.id = u.id"));
    }
}

#[test]
fn test_use_tabs() {
    let config = Config {
        use_tabs: true,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a FROM (SELECT b FROM c)", &config),
        "SELECT\n\ta\nFROM\n\t(\n\t\tSELECT\n\t\t\tb\n\t\tFROM\n\t\t\tc\n\t)"
    );
}

#[test]
fn test_tab_width() {
    let config = Config {
        tab_width: 4,
        ..Default::default()
    };
    assert_eq!(fmt_with("SELECT a FROM t", &config), "SELECT\n    a\nFROM\n    t");
}

#[test]
fn test_tabular_left() {
    let config = Config {
        indent_style: IndentStyle::TabularLeft,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a, b FROM t WHERE x = 1 AND y = 2", &config),
        "SELECT    a,\n          b\nFROM      t\nWHERE     x = 1\nAND       y = 2"
    );
}

#[test]
fn test_tabular_keywords_are_ten_columns() {
    for style in [IndentStyle::TabularLeft, IndentStyle::TabularRight] {
        let config = Config {
            indent_style: style,
            ..Default::default()
        };
        let out = fmt_with(
            "SELECT a FROM t WHERE x = 1 OR y = 2 GROUP BY a ORDER BY a",
            &config,
        );
        for line in out.lines() {
            let keyword: String = line.chars().take(10).collect();
            assert_eq!(keyword.chars().count(), 10, "short line {line:?}");
            assert!(keyword.ends_with(' '), "no separator in {line:?}");
        }
    }
}

#[test]
fn test_tabular_right() {
    let config = Config {
        indent_style: IndentStyle::TabularRight,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a FROM t ORDER BY a", &config),
        "   SELECT a\n     FROM t\n ORDER BY a"
    );
}

#[test]
fn test_dense_operators() {
    let config = Config {
        dense_operators: true,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT * FROM t WHERE a + 1 >= b", &config),
        "SELECT\n  *\nFROM\n  t\nWHERE\n  a+1>=b"
    );
}

#[test]
fn test_multiline_lists_avoid() {
    let config = Config {
        multiline_lists: MultilineLists::Avoid,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a, b FROM t ORDER BY a, b", &config),
        "SELECT a, b\nFROM t\nORDER BY a, b"
    );
}

#[test]
fn test_alias_always_and_never() {
    let always = Config {
        alias_as: AliasAs::Always,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a b FROM t u", &always),
        "SELECT\n  a as b\nFROM\n  t as u"
    );
    let never = Config {
        alias_as: AliasAs::Never,
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT a AS b FROM t AS u", &never),
        "SELECT\n  a b\nFROM\n  t u"
    );
}

#[test]
fn test_unresolved_placeholders_stay() {
    let config = Config {
        params: Some(Params::Positional(vec!["1".into()])),
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT * FROM t WHERE a = ? AND b = ?", &config),
        "SELECT\n  *\nFROM\n  t\nWHERE\n  a = 1\n  AND b = ?"
    );
}

#[test]
fn test_named_params_sqlite() {
    let config = Config {
        language: Dialect::Sqlite,
        params: Some(Params::Named(HashMap::from([
            ("id".to_string(), "7".to_string()),
            ("name".to_string(), "'bob'".to_string()),
        ]))),
        ..Default::default()
    };
    assert_eq!(
        fmt_with("SELECT * FROM t WHERE id = :id OR name = @name OR x = $other", &config),
        "SELECT\n  *\nFROM\n  t\nWHERE\n  id = 7\n  OR name = 'bob'\n  OR x = $other"
    );
}

#[test]
fn test_named_params_rejected_by_dialect() {
    let config = Config {
        language: Dialect::Hive,
        params: Some(Params::Named(HashMap::new())),
        ..Default::default()
    };
    let err = format("SELECT 1", &config).unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedParams { kind: "named", .. }));
}

#[test]
fn test_unknown_dialect() {
    let err = "cobol".parse::<Dialect>().unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedDialect(name) if name == "cobol"));
}

#[test]
fn test_invalid_option_reported() {
    let config = Config {
        tab_width: 0,
        ..Default::default()
    };
    assert!(matches!(
        format("SELECT 1", &config),
        Err(FormatError::InvalidOption { option: "tab_width", .. })
    ));
}

#[test]
fn test_malformed_input_never_fails() {
    for sql in [
        "SELECT 'unterminated",
        "SELECT /* open comment",
        "SELECT a) FROM (b",
        "END END ) ) CASE",
        ";;;",
        "\u{00a7}\u{00b6} SELECT",
        "",
    ] {
        assert!(format(sql, &Config::default()).is_ok(), "{sql:?}");
    }
}

#[test]
fn test_idempotence() {
    let samples = [
        "SELECT a, b, count(*) AS n FROM t LEFT JOIN u ON t.id = u.id WHERE a > 1 AND b IN (1, 2) GROUP BY a, b HAVING count(*) > 2 ORDER BY n DESC LIMIT 10;",
        "select case when x is null then 0 else x end as v from t union all select 1 from dual",
        "INSERT INTO t (a, b) VALUES (1, 'two'); UPDATE t SET a = 2 WHERE b = 'two'; DELETE FROM t WHERE a = 2;",
        "-- lead\nSELECT a /* inline */, b -- trailing\nFROM t\n/* block\n   comment */\nWHERE c = -1",
        "SELECT * FROM (SELECT a FROM (SELECT b FROM c) x) y WHERE z BETWEEN 1 AND 5",
        "SELECT /* c */ a FROM t",
        "SELECT a, /* c */ b FROM /* c */ t WHERE /* c */ x = 1",
        "SELECT a -- c\n, b FROM t",
    ];
    let configs = [
        Config::default(),
        Config {
            keyword_case: KeywordCase::Upper,
            indent_style: IndentStyle::TabularLeft,
            alias_as: AliasAs::Always,
            ..Default::default()
        },
        Config {
            keyword_case: KeywordCase::Lower,
            indent_style: IndentStyle::TabularRight,
            dense_operators: true,
            ..Default::default()
        },
        Config {
            multiline_lists: MultilineLists::ExpressionWidth,
            lines_between_queries: 2,
            ..Default::default()
        },
    ];
    for config in &configs {
        for sql in samples {
            let once = fmt_with(sql, config);
            let twice = fmt_with(&once, config);
            assert_eq!(twice, once, "not idempotent for {sql:?}");
        }
    }
}

#[test]
fn test_indent_matches_nesting_depth() {
    let out = fmt("SELECT a FROM (SELECT b FROM (SELECT c FROM d) e) f");
    let depth_of = |needle: &str| {
        let line = out
            .lines()
            .find(|line| line.trim() == needle)
            .unwrap_or_else(|| panic!("{needle} not in {out}"));
        (line.len() - line.trim_start().len()) / 2
    };
    assert_eq!(depth_of("c"), 5);
    assert_eq!(depth_of("d"), 5);
    assert_eq!(depth_of("b"), 3);
    assert_eq!(depth_of("a"), 1);
}

#[test]
fn test_comma_after_line_comment_is_indented() {
    let out = fmt("SELECT a -- c\n, b FROM t");
    let comma = out.lines().find(|line| line.trim() == ",").unwrap();
    assert_eq!(comma, "  ,");
}

#[test]
fn test_mismatched_end_returns_to_top_level() {
    let out = fmt("SELECT CASE WHEN (a THEN b END FROM t");
    assert!(out.lines().any(|line| line == "FROM"), "FROM indented in {out}");
    assert!(out.lines().any(|line| line == "  END"), "END misplaced in {out}");
}

#[test]
fn test_token_round_trip() {
    let sql = "SELECT  a.b,\n\t\"q\"\"x\" -- c\n  FROM [t] WHERE x <> ? AND y != :n;";
    let tokens = Tokenizer::for_dialect(Dialect::Sqlite).unwrap().tokenize(sql);
    let rebuilt: String = tokens
        .iter()
        .map(|t| format!("{}{}", t.whitespace_before, t.text))
        .collect();
    assert_eq!(rebuilt, sql);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::NamedPlaceholder));
}

#[test]
fn test_end_to_end_stream() {
    let input = "select a,b from t where x=1;\n";
    let config = Config {
        keyword_case: KeywordCase::Upper,
        ..Default::default()
    };

    let cursor = Cursor::new(input.as_bytes());
    let reader = BufReader::new(cursor);
    let mut output = Vec::new();

    format_file(reader, &mut output, &config, "test.sql").unwrap();

    let result = String::from_utf8(output).unwrap();
    assert_eq!(result, "SELECT\n  a,\n  b\nFROM\n  t\nWHERE\n  x = 1;\n");
}

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("sqlprettier-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sqlprettier.toml");
    std::fs::write(
        &path,
        "language = \"mysql\"\nkeyword_case = \"upper\"\nindent_style = \"tabular_left\"\n\
         multiline_lists = { item_count = 3 }\nparams = [\"1\"]\n",
    )
    .unwrap();

    let config = Config::from_toml_file(&path).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.language, Dialect::Mysql);
    assert_eq!(config.keyword_case, KeywordCase::Upper);
    assert_eq!(config.indent_style, IndentStyle::TabularLeft);
    assert_eq!(config.multiline_lists, MultilineLists::ItemCount(3));
    assert_eq!(config.params, Some(Params::Positional(vec!["1".into()])));
    assert_eq!(config.tab_width, 2);
}
