//! Layout engine
//!
//! A single pass over the token sequence. Each token is dispatched by kind
//! and appended to a [`QueryBuffer`] with the spacing and line breaks its
//! kind calls for; the [`Indenter`] frame stack decides the indent of every
//! new line.

use tracing::trace;

use crate::config::{AliasAs, Config, LogicalOperatorNewline, MultilineLists};
use crate::dialect::{DialectRules, OverrideContext};
use crate::format::aligner::push_keyword;
use crate::format::case_convert::AliasKeyword;
use crate::format::indenter::{BlockKind, Indenter};
use crate::format::inline_block::InlineBlock;
use crate::format::params::ParamResolver;
use crate::format::whitespace::QueryBuffer;
use crate::lexer::{Token, TokenKind};

const SET_OPERATORS: &[&str] = &["UNION", "INTERSECT", "EXCEPT", "MINUS"];

fn first_word(token: &Token) -> &str {
    token.text.split_whitespace().next().unwrap_or_default()
}

fn is_set_operator(token: &Token) -> bool {
    token.kind == TokenKind::ReservedBinaryCommand
        && SET_OPERATORS
            .iter()
            .any(|op| first_word(token).eq_ignore_ascii_case(op))
}

fn is_join(token: &Token) -> bool {
    token.kind == TokenKind::ReservedBinaryCommand && !is_set_operator(token)
}

/// Re-indent the continuation lines of a multi-line block comment
fn indent_comment(text: &str, indent: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        out.push_str(indent);
        out.push(' ');
        out.push_str(line.trim_start_matches([' ', '\t']));
    }
    out
}

/// Formats one token sequence according to a [`Config`]
pub struct Formatter<'a> {
    config: &'a Config,
    rules: &'a DialectRules,
    indenter: Indenter,
    inline_block: InlineBlock,
    params: ParamResolver<'a>,
    alias: AliasKeyword,
    buffer: QueryBuffer,
    tokens: Vec<Token>,
    index: usize,
    previous_reserved: Option<Token>,
    within_select: bool,
}

impl<'a> Formatter<'a> {
    #[must_use]
    pub fn new(config: &'a Config, rules: &'a DialectRules) -> Self {
        Self {
            config,
            rules,
            indenter: Indenter::new(config.indent_unit()),
            inline_block: InlineBlock::new(config.expression_width),
            params: ParamResolver::new(config.params.as_ref()),
            alias: AliasKeyword::new(&[], config.keyword_case),
            buffer: QueryBuffer::new(),
            tokens: Vec::new(),
            index: 0,
            previous_reserved: None,
            within_select: false,
        }
    }

    /// Lay out `tokens` (already case-normalized) and return the final text
    #[must_use]
    pub fn format(mut self, tokens: Vec<Token>) -> String {
        self.alias = AliasKeyword::new(&tokens, self.config.keyword_case);
        self.tokens = tokens;

        for index in 0..self.tokens.len() {
            self.index = index;
            let token = self.apply_override(index);
            self.tokens[index] = token.clone();
            trace!(
                kind = %token.kind,
                depth = self.indenter.depth(),
                text = %token.text,
                "layout"
            );

            match token.kind {
                TokenKind::LineComment => self.format_line_comment(&token),
                TokenKind::BlockComment => self.format_block_comment(&token),
                TokenKind::ReservedCommand => self.format_command(&token),
                TokenKind::ReservedBinaryCommand => self.format_binary_command(&token),
                TokenKind::ReservedDependentClause => self.format_dependent_clause(&token),
                TokenKind::ReservedLogicalOperator => self.format_logical_operator(&token),
                TokenKind::ReservedJoinCondition => self.format_with_spaces(&token.text),
                TokenKind::ReservedKeyword => self.format_keyword(&token),
                TokenKind::BlockStart => self.format_block_start(&token),
                TokenKind::BlockEnd => self.format_block_end(&token),
                TokenKind::IndexedPlaceholder | TokenKind::NamedPlaceholder => {
                    let value = self.params.resolve(&token);
                    self.format_with_spaces(&value);
                }
                TokenKind::Operator => self.format_operator(&token),
                TokenKind::Identifier => self.format_identifier(&token),
                TokenKind::String | TokenKind::Number | TokenKind::Unknown => {
                    self.format_with_spaces(&token.text);
                }
            }

            if token.kind.is_reserved() {
                self.previous_reserved = Some(token);
            }
        }

        let rendered = self.buffer.render();
        rendered.trim_start_matches('\n').trim_end().to_string()
    }

    fn apply_override(&self, index: usize) -> Token {
        let token = self.tokens[index].clone();
        match self.rules.token_override {
            Some(hook) => {
                let ctx = OverrideContext {
                    ahead: self.tokens.get(index + 1),
                    behind: index.checked_sub(1).and_then(|i| self.tokens.get(i)),
                    previous_reserved: self.previous_reserved.as_ref(),
                };
                hook(token, &ctx)
            }
            None => token,
        }
    }

    fn look_ahead(&self) -> Option<&Token> {
        self.tokens.get(self.index + 1)
    }

    fn look_behind(&self) -> Option<&Token> {
        self.index.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn previous_reserved_is(&self, word: &str) -> bool {
        self.previous_reserved
            .as_ref()
            .is_some_and(|token| token.is_word(word))
    }

    fn tabular(&self) -> bool {
        self.config.indent_style.is_tabular()
    }

    fn add_newline(&mut self) {
        let indent = self.indenter.get_indent();
        self.buffer.add_newline(&indent);
    }

    fn push_keyword(&mut self, text: &str) {
        push_keyword(&mut self.buffer, text, self.config.indent_style);
    }

    fn format_with_spaces(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push_str(" ");
    }

    fn format_with_space_before(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn format_with_space_after(&mut self, text: &str) {
        self.trim_to_line_content();
        self.buffer.push_str(text);
        self.buffer.push_str(" ");
    }

    fn format_without_spaces(&mut self, text: &str) {
        self.trim_to_line_content();
        self.buffer.push_str(text);
    }

    /// Drop trailing spaces; a line that has only its indent keeps it
    fn trim_to_line_content(&mut self) {
        if self.buffer.at_line_start() {
            self.add_newline();
        } else {
            self.buffer.trim_spaces_end();
        }
    }

    fn format_command(&mut self, token: &Token) {
        self.within_select = first_word(token).eq_ignore_ascii_case("SELECT");
        let multiline = self.clause_is_multiline();

        self.indenter.decrease_top_level();
        self.add_newline();
        let opens_block = self.look_ahead().is_some_and(|next| next.text == "(");
        if !(self.tabular() && opens_block) {
            self.indenter.increase_top_level(multiline);
        }
        self.push_keyword(&token.text);
        if multiline && !self.tabular() {
            self.add_newline();
        } else {
            self.buffer.push_str(" ");
        }
    }

    fn format_binary_command(&mut self, token: &Token) {
        if is_set_operator(token) {
            self.within_select = false;
            self.indenter.decrease_top_level();
            self.add_newline();
            self.push_keyword(&token.text);
            self.add_newline();
        } else {
            self.reopen_clause_line(&token.text);
        }
    }

    /// Put a keyword at the head of a new line inside the current clause.
    ///
    /// Tabular styles move it out to the keyword column.
    fn reopen_clause_line(&mut self, text: &str) {
        if self.tabular() {
            let multiline = self.indenter.current_multiline();
            let popped = self.indenter.decrease_top_level();
            self.add_newline();
            self.push_keyword(text);
            self.buffer.push_str(" ");
            if popped {
                self.indenter.increase_top_level(multiline);
            }
        } else {
            self.add_newline();
            self.format_with_spaces(text);
        }
    }

    fn format_dependent_clause(&mut self, token: &Token) {
        let multiline = self.indenter.current_multiline();
        self.indenter.decrease_top_level();
        self.add_newline();
        self.push_keyword(&token.text);
        self.buffer.push_str(" ");
        self.indenter.increase_top_level(multiline);
    }

    fn format_logical_operator(&mut self, token: &Token) {
        if token.is_word("AND") && self.previous_reserved_is("BETWEEN") {
            self.format_with_spaces(&token.text);
            return;
        }
        if !self.indenter.current_multiline() {
            self.format_with_spaces(&token.text);
            return;
        }
        if self.tabular() {
            self.reopen_clause_line(&token.text);
            return;
        }
        match self.config.logical_operator_newline {
            LogicalOperatorNewline::Before => {
                self.add_newline();
                self.format_with_spaces(&token.text);
            }
            LogicalOperatorNewline::After => {
                self.buffer.push_str(&token.text);
                self.add_newline();
            }
        }
    }

    fn format_keyword(&mut self, token: &Token) {
        if token.is_as() && self.should_drop_alias() {
            trace!("dropping alias keyword");
            return;
        }
        self.format_with_spaces(&token.text);
    }

    fn should_drop_alias(&self) -> bool {
        self.config.alias_as == AliasAs::Never
            && !self.previous_reserved_is("CAST")
            && self
                .look_ahead()
                .is_some_and(|next| matches!(next.kind, TokenKind::Identifier | TokenKind::String))
    }

    fn format_identifier(&mut self, token: &Token) {
        if self.should_insert_alias() {
            let alias = self.alias.token();
            self.format_with_spaces(&alias.text);
        }
        self.format_with_spaces(&token.text);
    }

    fn should_insert_alias(&self) -> bool {
        if self.config.alias_as != AliasAs::Always {
            return false;
        }
        let in_table_list = self
            .previous_reserved
            .as_ref()
            .is_some_and(|t| t.is_word("FROM") || is_join(t));
        if !self.within_select && !in_table_list {
            return false;
        }

        let follows_value = self.look_behind().is_some_and(|prev| match prev.kind {
            TokenKind::Identifier => true,
            TokenKind::BlockEnd => prev.text == ")" || prev.is_end(),
            TokenKind::Number | TokenKind::String => self.within_select,
            _ => false,
        });
        let ends_item = match self.look_ahead() {
            None => true,
            Some(next) => {
                matches!(
                    next.kind,
                    TokenKind::ReservedCommand
                        | TokenKind::ReservedBinaryCommand
                        | TokenKind::ReservedJoinCondition
                ) || matches!(next.text.as_str(), "," | ";" | ")")
            }
        };
        follows_value && ends_item
    }

    fn format_block_start(&mut self, token: &Token) {
        if token.is_case() {
            self.format_with_spaces(&token.text);
        } else {
            let keep_space = self.look_behind().is_some_and(|prev| {
                matches!(
                    prev.kind,
                    TokenKind::BlockStart | TokenKind::LineComment | TokenKind::Operator
                )
            });
            if token.whitespace_before.is_empty() && !keep_space {
                self.buffer.trim_spaces_end();
            }
            self.buffer.push_str(&token.text);
        }

        self.inline_block.begin_if_possible(&self.tokens, self.index);
        if !self.inline_block.is_active() {
            self.indenter.increase_block_level(BlockKind::of(token));
            self.add_newline();
        }
    }

    fn format_block_end(&mut self, token: &Token) {
        if self.inline_block.is_active() {
            self.inline_block.end();
            if token.is_end() {
                self.format_with_spaces(&token.text);
            } else {
                self.format_with_space_after(&token.text);
            }
        } else {
            self.indenter.decrease_block_level(BlockKind::of(token));
            self.add_newline();
            self.format_with_spaces(&token.text);
        }
    }

    fn format_line_comment(&mut self, token: &Token) {
        if token.starts_line() || self.buffer.is_empty() {
            self.add_newline();
            self.buffer.push_str(&token.text);
        } else {
            self.buffer.trim_whitespace_end();
            self.buffer.push_str(" ");
            self.buffer.push_str(&token.text);
        }
        self.add_newline();
    }

    fn format_block_comment(&mut self, token: &Token) {
        if self.buffer.at_line_start() {
            let same_line = self.look_ahead().is_some_and(|next| !next.starts_line());
            self.push_own_line_comment(&token.text);
            if same_line {
                self.buffer.push_str(" ");
            } else {
                self.add_newline();
            }
        } else if token.starts_line() {
            self.push_own_line_comment(&token.text);
            self.add_newline();
        } else {
            self.format_with_spaces(&token.text);
        }
    }

    fn push_own_line_comment(&mut self, text: &str) {
        self.add_newline();
        let indent = self.indenter.get_indent();
        self.buffer.push_str(&indent_comment(text, &indent));
    }

    fn format_operator(&mut self, token: &Token) {
        match token.text.as_str() {
            "," => self.format_comma(),
            ";" => self.format_query_separator(),
            "$" | "[" => self.format_with_space_before(&token.text),
            ":" | "]" => self.format_with_space_after(&token.text),
            "." | "{" | "}" | "`" => self.format_without_spaces(&token.text),
            _ if self.config.dense_operators
                && !self
                    .look_behind()
                    .is_some_and(|prev| prev.kind == TokenKind::ReservedCommand) =>
            {
                self.format_without_spaces(&token.text);
            }
            _ => self.format_with_spaces(&token.text),
        }
    }

    fn format_comma(&mut self) {
        self.format_with_space_after(",");
        if self.inline_block.is_active() || self.previous_reserved_is("LIMIT") {
            return;
        }
        if self.indenter.current_multiline() {
            self.add_newline();
        }
    }

    fn format_query_separator(&mut self) {
        self.indenter.reset();
        self.inline_block.reset();
        self.within_select = false;
        self.buffer.trim_spaces_end();
        if self.config.newline_before_semicolon {
            self.buffer.push_str("\n");
        }
        self.buffer.push_str(";");
        self.buffer
            .push_str(&"\n".repeat(self.config.lines_between_queries));
    }

    /// Short-clause decision for the command at the current index
    fn clause_is_multiline(&self) -> bool {
        let tail = self.clause_tail();
        if tail.iter().any(Token::is_case) {
            return true;
        }
        match self.config.multiline_lists {
            MultilineLists::Always => true,
            MultilineLists::Avoid => false,
            MultilineLists::ItemCount(limit) => {
                let mut depth = 0usize;
                let mut items = 1;
                for token in tail {
                    match token.kind {
                        TokenKind::BlockStart => depth += 1,
                        TokenKind::BlockEnd => depth = depth.saturating_sub(1),
                        TokenKind::Operator if depth == 0 && token.text == "," => items += 1,
                        _ => {}
                    }
                }
                items > limit
            }
            MultilineLists::ExpressionWidth => {
                let width: usize = tail.iter().map(|t| t.text.chars().count()).sum::<usize>()
                    + tail.len().saturating_sub(1);
                width > self.config.expression_width
            }
        }
    }

    /// Tokens after the current command up to the next top-level command,
    /// binary command, `;`, or the end of the enclosing block
    fn clause_tail(&self) -> &[Token] {
        let start = (self.index + 1).min(self.tokens.len());
        let mut depth = 0usize;
        let mut end = start;
        for token in &self.tokens[start..] {
            match token.kind {
                TokenKind::BlockStart => depth += 1,
                TokenKind::BlockEnd => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::ReservedCommand | TokenKind::ReservedBinaryCommand if depth == 0 => {
                    break;
                }
                TokenKind::Operator if token.text == ";" => break,
                _ => {}
            }
            end += 1;
        }
        &self.tokens[start..end]
    }
}
