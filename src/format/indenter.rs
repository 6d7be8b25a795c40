/// `Indenter` - frame-stack indentation tracker
///
/// Reserved commands push a clause frame, opening parentheses and `CASE`
/// push block frames. The indent of a new line is one unit per open frame.
use crate::lexer::Token;

/// Which delimiter opened a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paren,
    Bracket,
    Brace,
    Case,
}

impl BlockKind {
    /// Classify an opening or closing block token
    #[must_use]
    pub fn of(token: &Token) -> Self {
        match token.text.as_str() {
            "(" | ")" => BlockKind::Paren,
            "[" | "]" => BlockKind::Bracket,
            "{" | "}" => BlockKind::Brace,
            _ => BlockKind::Case,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Opened by a reserved command; remembers the short-clause decision
    Clause { multiline: bool },
    Block(BlockKind),
}

/// Tracks open clauses and blocks for one formatting run
#[derive(Debug, Clone)]
pub struct Indenter {
    unit: String,
    frames: Vec<Frame>,
}

impl Indenter {
    /// Create an indenter with the given indent unit (`"  "`, `"\t"`, ...)
    #[must_use]
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            frames: Vec::new(),
        }
    }

    /// Whitespace for a line starting at the current depth
    #[must_use]
    pub fn get_indent(&self) -> String {
        self.unit.repeat(self.frames.len())
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a clause (after a reserved command)
    pub fn increase_top_level(&mut self, multiline: bool) {
        self.frames.push(Frame::Clause { multiline });
    }

    /// Open a block
    pub fn increase_block_level(&mut self, kind: BlockKind) {
        self.frames.push(Frame::Block(kind));
    }

    /// Close the innermost clause, if the innermost frame is one.
    /// Returns whether a frame was closed.
    pub fn decrease_top_level(&mut self) -> bool {
        if matches!(self.frames.last(), Some(Frame::Clause { .. })) {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Close everything up to and including the nearest block of `kind`.
    ///
    /// A closer with no matching open block leaves the stack unchanged.
    pub fn decrease_block_level(&mut self, kind: BlockKind) {
        if let Some(pos) = self
            .frames
            .iter()
            .rposition(|frame| *frame == Frame::Block(kind))
        {
            self.frames.truncate(pos);
        }
    }

    /// Short-clause decision of the nearest enclosing clause
    #[must_use]
    pub fn current_multiline(&self) -> bool {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| match frame {
                Frame::Clause { multiline } => Some(*multiline),
                Frame::Block(_) => None,
            })
            .unwrap_or(true)
    }

    /// Drop every open frame (statement boundary)
    pub fn reset(&mut self) {
        self.frames.clear();
    }
}
