//! Inline block detection
//!
//! A parenthesised block stays on one line when its matching close comes
//! within `expression_width` characters and nothing inside would force a
//! line break.

use crate::format::indenter::BlockKind;
use crate::lexer::{Token, TokenKind};

/// Tracks nesting of blocks currently being laid out inline
#[derive(Debug, Clone)]
pub struct InlineBlock {
    level: usize,
    max_width: usize,
}

impl InlineBlock {
    #[must_use]
    pub fn new(max_width: usize) -> Self {
        Self {
            level: 0,
            max_width,
        }
    }

    /// Called on every block start. Enters inline mode when the block
    /// beginning at `index` qualifies, or deepens an inline block already open.
    pub fn begin_if_possible(&mut self, tokens: &[Token], index: usize) {
        if self.level > 0 {
            self.level += 1;
        } else if self.is_inline_block(tokens, index) {
            self.level = 1;
        }
    }

    /// Called on the block end matching an inline start
    pub fn end(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }

    fn is_inline_block(&self, tokens: &[Token], index: usize) -> bool {
        let mut width = 0;
        let mut open: Vec<BlockKind> = Vec::new();
        for token in tokens.iter().skip(index) {
            width += token.text.chars().count();
            if width > self.max_width || is_forbidden(token) {
                return false;
            }
            match token.kind {
                TokenKind::BlockStart => open.push(BlockKind::of(token)),
                TokenKind::BlockEnd => {
                    // a mismatched closer is left to the indenter
                    if open.pop() != Some(BlockKind::of(token)) {
                        return false;
                    }
                    if open.is_empty() {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }
}

fn is_forbidden(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::ReservedCommand
            | TokenKind::ReservedBinaryCommand
            | TokenKind::ReservedLogicalOperator
            | TokenKind::ReservedDependentClause
            | TokenKind::LineComment
            | TokenKind::BlockComment
    ) || token.text == ";"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::lexer::Tokenizer;

    fn tokens(sql: &str) -> Vec<Token> {
        Tokenizer::for_dialect(Dialect::Sql).unwrap().tokenize(sql)
    }

    #[test]
    fn test_short_call_is_inline() {
        let toks = tokens("count(a, b) x");
        let mut inline = InlineBlock::new(50);
        inline.begin_if_possible(&toks, 1);
        assert!(inline.is_active());
        inline.end();
        assert!(!inline.is_active());
    }

    #[test]
    fn test_subquery_is_not_inline() {
        let toks = tokens("(SELECT a FROM b)");
        let mut inline = InlineBlock::new(50);
        inline.begin_if_possible(&toks, 0);
        assert!(!inline.is_active());
    }

    #[test]
    fn test_too_wide_is_not_inline() {
        let toks = tokens("(aaaaaaaaaa, bbbbbbbbbb, cccccccccc)");
        let mut inline = InlineBlock::new(20);
        inline.begin_if_possible(&toks, 0);
        assert!(!inline.is_active());
    }

    #[test]
    fn test_nested_blocks_stay_inline() {
        let toks = tokens("(a, f(b), c)");
        let mut inline = InlineBlock::new(50);
        inline.begin_if_possible(&toks, 0);
        inline.begin_if_possible(&toks, 4);
        inline.end();
        assert!(inline.is_active());
        inline.end();
        assert!(!inline.is_active());
    }

    #[test]
    fn test_mismatched_closer_is_not_inline() {
        let toks = tokens("(a THEN b END");
        let mut inline = InlineBlock::new(50);
        inline.begin_if_possible(&toks, 0);
        assert!(!inline.is_active());
    }

    #[test]
    fn test_unclosed_block_is_not_inline() {
        let toks = tokens("(a, b");
        let mut inline = InlineBlock::new(50);
        inline.begin_if_possible(&toks, 0);
        assert!(!inline.is_active());
    }
}
