/// Tabular keyword alignment
///
/// In the tabular styles every clause keyword occupies a fixed column of
/// [`KEYWORD_WIDTH`] characters plus one separator, so the clause bodies line
/// up. Padding goes into the buffer as pending pads, not as spaces.
use crate::config::IndentStyle;
use crate::format::whitespace::QueryBuffer;

/// Content width of the keyword column
pub const KEYWORD_WIDTH: usize = 9;

/// Indent unit of the tabular styles: the keyword column plus its separator
pub const TABULAR_INDENT: &str = "          ";

/// Split a keyword for padding: phrases of ten or more characters are padded
/// on their first word only.
fn split_keyword(text: &str) -> (&str, Option<&str>) {
    if text.chars().count() > KEYWORD_WIDTH {
        if let Some((head, tail)) = text.split_once(' ') {
            return (head, Some(tail));
        }
    }
    (text, None)
}

/// Push `text` padded to the keyword column.
///
/// With [`IndentStyle::Standard`] the text is pushed unchanged.
pub fn push_keyword(buffer: &mut QueryBuffer, text: &str, style: IndentStyle) {
    let (head, tail) = match style {
        IndentStyle::Standard => {
            buffer.push_str(text);
            return;
        }
        IndentStyle::TabularLeft | IndentStyle::TabularRight => split_keyword(text),
    };
    let pad = KEYWORD_WIDTH.saturating_sub(head.chars().count());
    if style == IndentStyle::TabularLeft {
        buffer.push_str(head);
        buffer.push_pad(pad);
    } else {
        buffer.push_pad(pad);
        buffer.push_str(head);
    }
    if let Some(tail) = tail {
        buffer.push_str(" ");
        buffer.push_str(tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(text: &str, style: IndentStyle) -> String {
        let mut buf = QueryBuffer::new();
        push_keyword(&mut buf, text, style);
        buf.render()
    }

    #[test]
    fn test_left_pads_after() {
        assert_eq!(padded("FROM", IndentStyle::TabularLeft), "FROM     ");
    }

    #[test]
    fn test_right_pads_before() {
        assert_eq!(padded("FROM", IndentStyle::TabularRight), "     FROM");
    }

    #[test]
    fn test_long_phrase_pads_first_word() {
        assert_eq!(
            padded("LEFT OUTER JOIN", IndentStyle::TabularLeft),
            "LEFT      OUTER JOIN"
        );
        assert_eq!(
            padded("UNION ALL", IndentStyle::TabularLeft),
            "UNION ALL"
        );
    }

    #[test]
    fn test_standard_untouched() {
        assert_eq!(padded("GROUP BY", IndentStyle::Standard), "GROUP BY");
    }

    #[test]
    fn test_padded_width_survives_trim() {
        let mut buf = QueryBuffer::new();
        push_keyword(&mut buf, "AND", IndentStyle::TabularLeft);
        buf.trim_spaces_end();
        buf.push_str(" x");
        assert_eq!(buf.render(), "AND       x");
    }
}
