//! Line table for converting between positions and offsets.
//! 行表：在行列位置与偏移量之间转换。

use crate::{Position, Span};

/// Char offsets of each line start in a source text.
/// 源码中每一行起始处的字符偏移量。
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut len = 0;
        for (i, c) in source.chars().enumerate() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
            len = i + 1;
        }
        LineIndex { line_starts, len }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position just past the last character.
    /// 最后一个字符之后的位置。
    pub fn end_position(&self) -> Position {
        self.position(self.len)
    }

    /// Char offset of a 1-based position, clamped to the text.
    /// 1 基位置对应的字符偏移量（截断到文本范围内）。
    pub fn offset(&self, pos: Position) -> usize {
        let line = (pos.line.max(1) as usize - 1).min(self.line_starts.len() - 1);
        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        (line_start + pos.col.max(1) as usize - 1).min(line_end)
    }

    /// Char range covered by a span, suitable for ariadne labels.
    /// 范围对应的字符区间，用于 ariadne 标签。
    pub fn range(&self, span: Span) -> std::ops::Range<usize> {
        let start = self.offset(span.start);
        let end = self.offset(span.end).max(start);
        start..end
    }

    /// 1-based position of a char offset.
    /// 字符偏移量对应的 1 基位置。
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line as u32 + 1, (offset - self.line_starts[line]) as u32 + 1)
    }

    /// Convert to 0-based `(line, character)` as used by the LSP.
    /// 转换为 LSP 使用的 0 基 `(行, 字符)`。
    pub fn to_lsp(&self, pos: Position) -> (u32, u32) {
        (pos.line.saturating_sub(1), pos.col.saturating_sub(1))
    }

    /// Convert from 0-based LSP coordinates.
    /// 从 LSP 的 0 基坐标转换。
    pub fn from_lsp(&self, line: u32, character: u32) -> Position {
        Position::new(line.saturating_add(1), character.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_across_lines() {
        let index = LineIndex::new("ab\ncde\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.offset(Position::new(1, 1)), 0);
        assert_eq!(index.offset(Position::new(2, 2)), 4);
        assert_eq!(index.position(4), Position::new(2, 2));
        assert_eq!(index.position(7), Position::new(3, 1));
        assert_eq!(index.end_position(), Position::new(3, 1));
    }

    #[test]
    fn test_offset_clamps_past_line_end() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(1, 40)), 2);
        assert_eq!(index.offset(Position::new(9, 1)), 3);
    }

    #[test]
    fn test_lsp_round_trip() {
        let index = LineIndex::new("x");
        let pos = Position::new(3, 7);
        let (line, character) = index.to_lsp(pos);
        assert_eq!((line, character), (2, 6));
        assert_eq!(index.from_lsp(line, character), pos);
    }

    #[test]
    fn test_from_lsp_saturates() {
        let index = LineIndex::new("x");
        let pos = index.from_lsp(u32::MAX, u32::MAX);
        assert_eq!(pos, Position::new(u32::MAX, u32::MAX));
    }
}
