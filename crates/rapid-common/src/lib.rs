//! Common data structures for the RAPID toolchain.
//!
//! This crate provides foundational types used across the frontend:
//! - `Position` / `Span`: 1-based line/column source locations
//! - `LineIndex`: conversion between positions, char offsets and LSP coordinates

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::{Position, Span};
