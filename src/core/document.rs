//! Document snapshots and position mapping.

use crate::parser::Span;
use crate::validation::engine::{Position, Range};

/// Immutable view of a document for a single validation pass
#[derive(Debug, Clone, Copy)]
pub struct DocumentSnapshot<'a> {
    pub uri: &'a str,
    pub version: i32,
    pub text: &'a str,
}

/// Maps byte offsets to zero-based line / UTF-16 column positions and back.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { text, line_starts }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Index of the last line; a trailing newline starts an empty last line
    pub fn last_line(&self) -> u32 {
        (self.line_starts.len() - 1) as u32
    }

    /// Text of a line without its line terminator
    pub fn line_text(&self, line: u32) -> &'a str {
        let line = line as usize;
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        let content = &self.text[start..end];
        content.strip_suffix('\r').unwrap_or(content)
    }

    /// Length of a line in UTF-16 code units
    pub fn line_length(&self, line: u32) -> u32 {
        self.line_text(line).encode_utf16().count() as u32
    }

    /// Position of a byte offset; offsets past the end clamp to the end
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character = self
            .text
            .get(start..offset)
            .map_or(0, |prefix| prefix.encode_utf16().count());
        Position::new(line as u32, character as u32)
    }

    pub fn range(&self, span: Span) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }

    /// Byte offset of a position, if it lies within the text
    pub fn offset(&self, position: Position) -> Option<usize> {
        let start = *self.line_starts.get(position.line as usize)?;
        let line = self.line_text(position.line);

        let mut units = 0;
        for (idx, ch) in line.char_indices() {
            if units >= position.character as usize {
                return Some(start + idx);
            }
            units += ch.len_utf16();
        }
        (units >= position.character as usize).then_some(start + line.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_single_line() {
        let index = LineIndex::new("<html></html>");
        assert_eq!(index.position(6), Position::new(0, 6));
        assert_eq!(index.last_line(), 0);
        assert_eq!(index.line_length(0), 13);
    }

    #[test]
    fn test_position_multi_line() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.position(3), Position::new(1, 0));
        assert_eq!(index.position(5), Position::new(1, 2));
        assert_eq!(index.position(6), Position::new(2, 0));
        assert_eq!(index.last_line(), 2);
        assert_eq!(index.line_text(1), "cd");
    }

    #[test]
    fn test_columns_are_utf16_units() {
        let text = "é😀<p>";
        let index = LineIndex::new(text);
        let offset = text.find("<p>").expect("tag");

        assert_eq!(index.position(offset), Position::new(0, 3));
        assert_eq!(index.offset(Position::new(0, 3)), Some(offset));
    }

    #[test]
    fn test_crlf_line_text() {
        let index = LineIndex::new("<html>\r\n</html>");
        assert_eq!(index.line_text(0), "<html>");
        assert_eq!(index.line_length(0), 6);
    }

    #[test]
    fn test_offset_out_of_range() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(1, 2)), Some(5));
        assert_eq!(index.offset(Position::new(1, 3)), None);
        assert_eq!(index.offset(Position::new(4, 0)), None);
    }
}
