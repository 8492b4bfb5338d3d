//! Integration tests for rapid-common crate.

use rapid_common::{LineIndex, Position, Span};

// ============================================================================
// Position and Span
// ============================================================================

#[test]
fn test_position_ordering() {
    assert!(Position::new(1, 9) < Position::new(2, 1));
    assert!(Position::new(3, 2) < Position::new(3, 10));
    assert_eq!(Position::START, Position::new(1, 1));
}

#[test]
fn test_span_merge_covers_both() {
    let a = Span::from_coords(1, 5, 1, 9);
    let b = Span::from_coords(3, 1, 3, 4);
    let merged = a.merge(b);
    assert_eq!(merged.start, Position::new(1, 5));
    assert_eq!(merged.end, Position::new(3, 4));
    assert_eq!(b.merge(a), merged);
}

#[test]
fn test_span_contains_is_end_inclusive() {
    let span = Span::from_coords(2, 3, 2, 6);
    assert!(span.contains(Position::new(2, 3)));
    assert!(span.contains(Position::new(2, 6)));
    assert!(!span.contains(Position::new(2, 7)));
    assert!(!span.contains(Position::new(1, 4)));
}

#[test]
fn test_point_span_is_empty() {
    let span = Span::point(Position::new(4, 2));
    assert!(span.is_empty());
    assert!(!Span::from_coords(1, 1, 1, 2).is_empty());
}

#[test]
fn test_span_display_shows_start() {
    assert_eq!(Span::from_coords(7, 3, 9, 1).to_string(), "7:3");
}

// ============================================================================
// LineIndex
// ============================================================================

#[test]
fn test_line_index_round_trip() {
    let source = "MODULE M\n  VAR num x;\nENDMODULE";
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 3);

    let pos = Position::new(2, 3);
    let offset = index.offset(pos);
    assert_eq!(&source[offset..offset + 3], "VAR");
    assert_eq!(index.position(offset), pos);
}

#[test]
fn test_line_index_lsp_conversion() {
    let index = LineIndex::new("a\nbcd\n");
    assert_eq!(index.to_lsp(Position::new(2, 3)), (1, 2));
    assert_eq!(index.from_lsp(1, 2), Position::new(2, 3));
    assert_eq!(index.end_position(), Position::new(3, 1));
}

#[test]
fn test_line_index_counts_chars() {
    let index = LineIndex::new("s := \"äö\";\nx");
    assert_eq!(index.position(index.offset(Position::new(2, 1))), Position::new(2, 1));
    assert_eq!(index.offset(Position::new(2, 1)), 11);
}
