//! Token patterns compiled from a dialect rule set
//!
//! Every pattern is anchored at the start of the remaining input and compiled
//! case-insensitive with unicode classes. The rule order is the tokenizer's
//! priority order and does not depend on the dialect.

use regex::{Regex, RegexBuilder};

use crate::dialect::{DialectRules, StringType};
use crate::lexer::TokenKind;

/// Operators every dialect understands besides its own list
const DEFAULT_OPERATORS: &[&str] = &["<>", "<=", ">=", "!="];

/// Single-character operator symbols
const OPERATOR_CHARS: &str = "+-/*%&|^><=.,;[]{}:$@!~`";

fn build_re(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
}

/// One matching rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: TokenKind,
    pub regex: Regex,
    /// Alphabetic reserved word: must end on a word boundary and is never
    /// matched right after `.`
    pub word: bool,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str, word: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            regex: build_re(pattern)?,
            word,
        })
    }
}

/// `^(?:LEFT\s+OUTER\s+JOIN|LEFT\s+JOIN|...)\b`, longest phrase first
fn reserved_word_pattern(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternatives = sorted
        .iter()
        .map(|word| {
            word.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    Some(format!(r"^(?:{alternatives})\b"))
}

/// `^(?:\(|\[)`, longest symbol first
fn symbol_pattern(symbols: &[&str]) -> Option<String> {
    if symbols.is_empty() {
        return None;
    }
    let mut sorted = symbols.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternatives = sorted
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!("^(?:{alternatives})"))
}

fn string_pattern(string_type: StringType) -> &'static str {
    match string_type {
        StringType::DoubleQuote => r#"(?:"(?:[^"\\]|\\(?s:.))*(?:"|$))+"#,
        StringType::SingleQuote => r"(?:'(?:[^'\\]|\\(?s:.))*(?:'|$))+",
        StringType::NationalQuote => r"N(?:'(?:[^'\\]|\\(?s:.))*(?:'|$))+",
        StringType::HexQuote => r"X'[0-9A-F]*(?:'|$)",
        StringType::Backtick => r"(?:`[^`]*(?:`|$))+",
        StringType::Bracket => r"\[(?:[^\]]|\]\])*(?:\]|$)",
    }
}

fn strings_pattern(types: &[StringType]) -> Option<String> {
    if types.is_empty() {
        return None;
    }
    // prefixed forms first so `N'x'` is not split into `N` and `'x'`
    let mut ordered = types.to_vec();
    ordered.sort_by_key(|t| !matches!(t, StringType::NationalQuote | StringType::HexQuote));
    let alternatives = ordered
        .into_iter()
        .map(string_pattern)
        .collect::<Vec<_>>()
        .join("|");
    Some(format!("^(?:{alternatives})"))
}

fn line_comment_pattern(types: &[&str]) -> Option<String> {
    symbol_pattern(types).map(|prefix| format!(r"{prefix}[^\r\n]*"))
}

const BLOCK_COMMENT_PATTERN: &str = r"(?s)^/\*.*?(?:\*/|$)";

const NUMBER_PATTERN: &str =
    r"^(?:0x[0-9a-f]+|0b[01]+|-?[0-9]+(?:\.[0-9]+)?(?:e[-+]?[0-9]+)?)\b";

fn placeholder_pattern(types: &[&str], body: &str) -> Option<String> {
    symbol_pattern(types).map(|prefix| format!("{prefix}{body}"))
}

fn escape_class(chars: &str) -> String {
    chars.chars().map(|c| regex::escape(&c.to_string())).collect()
}

fn operator_pattern(rules: &DialectRules) -> String {
    let mut multi: Vec<&str> = rules
        .operators
        .iter()
        .chain(DEFAULT_OPERATORS)
        .copied()
        .collect();
    multi.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    multi.dedup();

    let word_chars = rules.special_word_chars;
    let single: String = OPERATOR_CHARS
        .chars()
        .filter(|c| !word_chars.any.contains(*c) && !word_chars.prefix.contains(*c))
        .collect();

    let mut alternatives: Vec<String> = multi.iter().map(|op| regex::escape(op)).collect();
    if !single.is_empty() {
        alternatives.push(format!("[{}]", escape_class(&single)));
    }
    format!("^(?:{})", alternatives.join("|"))
}

fn identifier_pattern(rules: &DialectRules) -> String {
    let chars = rules.special_word_chars;
    let prefix = if chars.prefix.is_empty() {
        String::new()
    } else {
        format!("[{}]*", escape_class(chars.prefix))
    };
    let suffix = if chars.suffix.is_empty() {
        String::new()
    } else {
        format!("[{}]*", escape_class(chars.suffix))
    };
    format!(
        r"^{prefix}[\w{}]+{suffix}(?:\[[0-9]+\])?",
        escape_class(chars.any)
    )
}

fn is_word_marker(marker: &str) -> bool {
    marker.chars().next().is_some_and(char::is_alphanumeric)
}

/// Compile a rule set into the ordered rule list
///
/// # Errors
///
/// Returns the regex error of the first pattern that fails to compile.
pub fn compile_rules(rules: &DialectRules) -> Result<Vec<Rule>, regex::Error> {
    let mut compiled = Vec::new();
    let mut push = |kind: TokenKind, pattern: Option<String>, word: bool| -> Result<(), regex::Error> {
        if let Some(pattern) = pattern {
            compiled.push(Rule::new(kind, &pattern, word)?);
        }
        Ok(())
    };

    push(
        TokenKind::LineComment,
        line_comment_pattern(&rules.line_comment_types),
        false,
    )?;
    push(
        TokenKind::BlockComment,
        Some(BLOCK_COMMENT_PATTERN.to_string()),
        false,
    )?;
    push(TokenKind::String, strings_pattern(&rules.string_types), false)?;

    let reserved = [
        (TokenKind::ReservedCommand, &rules.reserved_commands),
        (TokenKind::ReservedBinaryCommand, &rules.reserved_binary_commands),
        (TokenKind::ReservedDependentClause, &rules.reserved_dependent_clauses),
        (TokenKind::ReservedJoinCondition, &rules.reserved_join_conditions),
        (TokenKind::ReservedLogicalOperator, &rules.reserved_logical_operators),
    ];
    for (kind, words) in reserved {
        push(kind, reserved_word_pattern(words), true)?;
    }

    for (kind, markers) in [
        (TokenKind::BlockStart, &rules.block_start),
        (TokenKind::BlockEnd, &rules.block_end),
    ] {
        let (words, symbols): (Vec<&str>, Vec<&str>) =
            markers.iter().copied().partition(|m| is_word_marker(m));
        push(kind, reserved_word_pattern(&words), true)?;
        push(kind, symbol_pattern(&symbols), false)?;
    }

    push(
        TokenKind::ReservedKeyword,
        reserved_word_pattern(&rules.reserved_keywords),
        true,
    )?;
    push(
        TokenKind::NamedPlaceholder,
        placeholder_pattern(&rules.named_placeholder_types, r"\w+"),
        false,
    )?;
    push(
        TokenKind::IndexedPlaceholder,
        placeholder_pattern(&rules.indexed_placeholder_types, "[0-9]*"),
        false,
    )?;
    push(TokenKind::Number, Some(NUMBER_PATTERN.to_string()), false)?;
    push(TokenKind::Operator, Some(operator_pattern(rules)), false)?;
    push(TokenKind::Identifier, Some(identifier_pattern(rules)), false)?;

    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, WordChars};

    fn first_match<'a>(re: &Regex, input: &'a str) -> Option<&'a str> {
        re.find(input).map(|m| m.as_str())
    }

    #[test]
    fn test_reserved_longest_phrase_first() {
        let pattern = reserved_word_pattern(&["LEFT JOIN", "LEFT OUTER JOIN", "JOIN"]).unwrap();
        let re = build_re(&pattern).unwrap();
        assert_eq!(
            first_match(&re, "left   outer join b"),
            Some("left   outer join")
        );
        assert_eq!(first_match(&re, "JOINED"), None);
    }

    #[test]
    fn test_empty_word_list_has_no_rule() {
        assert!(reserved_word_pattern(&[]).is_none());
        assert!(placeholder_pattern(&[], r"\w+").is_none());
    }

    #[test]
    fn test_string_escapes() {
        let re = build_re(&strings_pattern(&[StringType::SingleQuote]).unwrap()).unwrap();
        assert_eq!(first_match(&re, r"'it''s' x"), Some("'it''s'"));
        assert_eq!(first_match(&re, r"'a\'b' x"), Some(r"'a\'b'"));
        assert_eq!(first_match(&re, "'open"), Some("'open"));
    }

    #[test]
    fn test_prefixed_string_before_plain() {
        let types = [StringType::SingleQuote, StringType::NationalQuote];
        let re = build_re(&strings_pattern(&types).unwrap()).unwrap();
        assert_eq!(first_match(&re, "N'abc' x"), Some("N'abc'"));
    }

    #[test]
    fn test_bracket_string() {
        let re = build_re(&strings_pattern(&[StringType::Bracket]).unwrap()).unwrap();
        assert_eq!(first_match(&re, "[my col] x"), Some("[my col]"));
    }

    #[test]
    fn test_block_comment_unterminated() {
        let re = build_re(BLOCK_COMMENT_PATTERN).unwrap();
        assert_eq!(first_match(&re, "/* a */ b"), Some("/* a */"));
        assert_eq!(first_match(&re, "/* a\n b"), Some("/* a\n b"));
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let re = build_re(&line_comment_pattern(&["--", "#"]).unwrap()).unwrap();
        assert_eq!(first_match(&re, "# note\nSELECT"), Some("# note"));
        assert_eq!(first_match(&re, "-- x\r\ny"), Some("-- x"));
    }

    #[test]
    fn test_numbers() {
        let re = build_re(NUMBER_PATTERN).unwrap();
        assert_eq!(first_match(&re, "-1.5e10 x"), Some("-1.5e10"));
        assert_eq!(first_match(&re, "0xFF"), Some("0xFF"));
        assert_eq!(first_match(&re, "12abc"), None);
    }

    #[test]
    fn test_operator_class_excludes_identifier_prefix() {
        let rules = DialectRules {
            special_word_chars: WordChars {
                any: "",
                prefix: "@",
                suffix: "",
            },
            ..DialectRules::default()
        };
        let re = build_re(&operator_pattern(&rules)).unwrap();
        assert_eq!(first_match(&re, "@x"), None);
        assert_eq!(first_match(&re, "<>1"), Some("<>"));
        assert_eq!(first_match(&re, "-1"), Some("-"));
    }

    #[test]
    fn test_identifier_with_special_chars() {
        let rules = Dialect::Mysql.rules();
        let re = build_re(&identifier_pattern(rules)).unwrap();
        assert_eq!(first_match(&re, "@@GLOBAL.time"), Some("@@GLOBAL"));
        assert_eq!(first_match(&re, "a$b c"), Some("a$b"));
    }

    #[test]
    fn test_all_builtin_dialects_compile() {
        for dialect in Dialect::ALL {
            let rules = compile_rules(dialect.rules()).unwrap();
            assert!(rules.len() > 10, "{dialect} compiled too few rules");
        }
    }
}
