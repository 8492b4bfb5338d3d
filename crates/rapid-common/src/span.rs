//! Source code span and position tracking.
//! 源码范围和位置跟踪。

use std::fmt;

use serde::Serialize;

/// A 1-based line/column position in source code. Columns count characters.
/// 源码中从 1 开始的行列位置，列按字符计数。
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, col: 1 };

    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }

    /// Move `n` columns to the right on the same line.
    /// 在同一行向右移动 `n` 列。
    pub fn offset(self, n: u32) -> Position {
        Position {
            line: self.line,
            col: self.col + n,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A span representing a range in source code.
/// 表示源码中一个范围的 Span。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start position. / 起始位置。
    pub start: Position,
    /// End position (exclusive). / 结束位置（不包含）。
    pub end: Position,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: Position::START,
        end: Position::START,
    };

    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Build a span from `(start_line, start_col, end_line, end_col)`.
    /// 从 `(起始行, 起始列, 结束行, 结束列)` 构造范围。
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Span {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// An empty span sitting at `pos`.
    /// 位于 `pos` 的空范围。
    pub fn point(pos: Position) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Create a span that covers both `self` and `other`.
    /// 创建一个覆盖 `self` 和 `other` 的范围。
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }

    /// Returns true if this span has zero length.
    /// 如果此范围长度为零则返回 true。
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `pos` lies inside the span. The end column is included
    /// so a cursor sitting right after an identifier still hits it.
    /// 如果 `pos` 位于范围内则返回 true（包含结束列）。
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
