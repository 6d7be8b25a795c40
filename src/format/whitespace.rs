//! Output buffer for the layout engine
//!
//! The buffer is a list of text runs and pending pads. Pads are the tabular
//! keyword padding: trimming helpers never remove them, and they become real
//! spaces only in [`QueryBuffer::render`].

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Pad(usize),
}

/// Formatted query under construction
#[derive(Debug, Clone, Default)]
pub struct QueryBuffer {
    pieces: Vec<Piece>,
}

impl QueryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Text(last)) = self.pieces.last_mut() {
            last.push_str(text);
        } else {
            self.pieces.push(Piece::Text(text.to_string()));
        }
    }

    pub fn push_pad(&mut self, width: usize) {
        if width > 0 {
            self.pieces.push(Piece::Pad(width));
        }
    }

    /// Remove trailing spaces and tabs, stopping at a pad
    pub fn trim_spaces_end(&mut self) {
        self.trim_end_matching(|c| c == ' ' || c == '\t');
    }

    /// Remove all trailing whitespace including newlines, stopping at a pad
    pub fn trim_whitespace_end(&mut self) {
        self.trim_end_matching(char::is_whitespace);
    }

    fn trim_end_matching(&mut self, pred: fn(char) -> bool) {
        while let Some(Piece::Text(last)) = self.pieces.last_mut() {
            let kept = last.trim_end_matches(pred).len();
            last.truncate(kept);
            if last.is_empty() {
                self.pieces.pop();
            } else {
                break;
            }
        }
    }

    #[must_use]
    pub fn ends_with_newline(&self) -> bool {
        matches!(self.pieces.last(), Some(Piece::Text(last)) if last.ends_with('\n'))
    }

    /// Nothing but indentation follows the last line break
    #[must_use]
    pub fn at_line_start(&self) -> bool {
        match self.pieces.last() {
            None => true,
            Some(Piece::Pad(_)) => false,
            Some(Piece::Text(last)) => {
                let content = last.trim_end_matches([' ', '\t']);
                content.ends_with('\n') || (content.is_empty() && self.pieces.len() == 1)
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Start a new line at `indent`, never leaving a blank line behind
    pub fn add_newline(&mut self, indent: &str) {
        self.trim_spaces_end();
        if !self.is_empty() && !self.ends_with_newline() {
            self.push_str("\n");
        }
        self.push_str(indent);
    }

    /// Resolve pads to spaces and produce the final text
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Pad(width) => out.extend(std::iter::repeat(' ').take(*width)),
            }
        }
        out
    }
}
