//! Integration tests for rapid-lsp crate.

use rapid_common::{LineIndex, Position, Span};
use rapid_lsp::completion::{CompletionKind, suggest};
use rapid_lsp::highlight::{HighlightKind, highlight};
use rapid_lsp::semantic_tokens::{generate_semantic_tokens, token_modifiers, token_types};
use rapid_lsp::{Document, SymbolIndex, SymbolKind, find_definition};

const SOURCE: &str = "MODULE Cell
CONST num limit := 3;
VAR num total;
PROC Main()
    FOR i FROM 1 TO limit
        Add i;
    ENDFOR
    TPWrite \"total\";
ENDPROC
PROC Add(num amount)
    VAR num total;
    total := amount;
ENDPROC
ENDMODULE
";

fn index(source: &str) -> SymbolIndex {
    let document = Document::new("file:///cell.mod".to_string(), source.to_string());
    document.symbol_index.expect("symbol index")
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_document_lifecycle() {
    let mut document = Document::new("file:///cell.mod".to_string(), SOURCE.to_string());
    assert!(document.analysis.diagnostics.is_empty());
    assert!(document.symbol_index.is_some());

    document.update("MODULE Cell\nVAR num x\nENDMODULE".to_string());
    assert!(document.analysis.has_errors());
    assert!(document.symbol_index.is_none());
    assert_eq!(document.line_index.line_count(), 3);

    document.update(SOURCE.to_string());
    assert!(document.symbol_index.is_some());
}

#[test]
fn test_document_positions() {
    let document = Document::new("file:///cell.mod".to_string(), SOURCE.to_string());
    let span = Span::from_coords(2, 11, 2, 16);
    assert_eq!(document.text(span), "limit");
    assert_eq!(document.lsp_range(span), ((1, 10), (1, 15)));
    assert_eq!(document.position(1, 10), Position::new(2, 11));
}

// ============================================================================
// Symbols and Navigation
// ============================================================================

#[test]
fn test_symbols_in_source_order() {
    let index = index(SOURCE);
    let names: Vec<(&str, SymbolKind)> = index
        .symbols()
        .into_iter()
        .map(|s| (s.name.as_str(), s.kind))
        .collect();
    assert_eq!(
        names,
        vec![
            ("limit", SymbolKind::Constant),
            ("total", SymbolKind::Data),
            ("Main", SymbolKind::Procedure),
            ("i", SymbolKind::LoopVariable),
            ("Add", SymbolKind::Procedure),
            ("amount", SymbolKind::Parameter),
            ("total", SymbolKind::LocalData),
        ]
    );
}

#[test]
fn test_local_shadows_global() {
    let index = index(SOURCE);
    let local = index.find_definition_at(Position::new(12, 6)).unwrap();
    assert_eq!(local.kind, SymbolKind::LocalData);
    assert_eq!(local.def_span.start, Position::new(11, 13));

    let global = index.resolve("total", Position::new(8, 5)).unwrap();
    assert_eq!(global.kind, SymbolKind::Data);
}

#[test]
fn test_find_definition_of_call() {
    let found = find_definition(SOURCE, Position::new(6, 10)).unwrap();
    assert_eq!(found.name, "Add");
    assert_eq!(found.definition, Some(Span::from_coords(10, 6, 10, 9)));
    assert_eq!(found.references, vec![Span::from_coords(6, 9, 6, 12)]);
}

#[test]
fn test_references_of_constant() {
    let index = index(SOURCE);
    let refs = index.find_references_at(Position::new(2, 12), true);
    let lines: Vec<u32> = refs.iter().map(|r| r.span.start.line).collect();
    assert_eq!(lines, vec![2, 5]);
    assert!(refs[0].is_definition);

    let uses = index.find_references_at(Position::new(2, 12), false);
    assert_eq!(uses.len(), 1);
}

#[test]
fn test_undeclared_name_has_no_definition() {
    let found = find_definition(SOURCE, Position::new(8, 6)).unwrap();
    assert_eq!(found.name, "TPWrite");
    assert!(found.definition.is_none());
    assert!(find_definition("MODULE M\nVAR num x\nENDMODULE", Position::new(2, 9)).is_none());
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_completion_mixes_sources() {
    let source = "MODULE M\nVAR num totalCount;\nPROC P()\n    t;\nENDPROC\nENDMODULE";
    let items = suggest(source, Position::new(4, 6));
    let found: Vec<(&str, CompletionKind)> =
        items.iter().map(|i| (i.label.as_str(), i.kind)).collect();
    assert!(found.contains(&("TO", CompletionKind::Keyword)));
    assert!(found.contains(&("tooldata", CompletionKind::Type)));
    assert!(found.contains(&("totalCount", CompletionKind::Variable)));
    assert!(found.contains(&("tool0", CompletionKind::Variable)));
    assert!(!found.iter().any(|(label, _)| *label == "MoveL"));
}

#[test]
fn test_completion_without_tree_still_offers_keywords() {
    let items = suggest("MODULE M\nPROC P()\n    Move", Position::new(3, 9));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert!(labels.contains(&"MoveJ"));
    assert!(labels.contains(&"MoveL"));
    assert!(labels.contains(&"MoveC"));
}

// ============================================================================
// Highlighting
// ============================================================================

#[test]
fn test_highlight_move_instruction() {
    use HighlightKind::*;
    let kinds: Vec<HighlightKind> = highlight("MoveL p, v100, fine, tool0\\WObj:=wobj0; ! go")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            Keyword, Identifier, Punctuation, Identifier, Punctuation, Identifier, Punctuation,
            Identifier, Operator, Identifier, Operator, Identifier, Punctuation, Comment,
        ]
    );
}

#[test]
fn test_semantic_tokens_use_symbol_kinds() {
    let index = index(SOURCE);
    let tokens = generate_semantic_tokens(
        &highlight(SOURCE),
        &LineIndex::new(SOURCE),
        Some(&index),
    );

    let mut line = 0;
    let mut col = 0;
    let mut absolute = Vec::new();
    for token in &tokens {
        if token.delta_line > 0 {
            line += token.delta_line;
            col = token.delta_start;
        } else {
            col += token.delta_start;
        }
        absolute.push((line, col, token.token_type, token.token_modifiers_bitset));
    }

    // `limit` declaration on line 2.
    assert!(absolute.contains(&(
        1,
        10,
        token_types::VARIABLE,
        token_modifiers::DECLARATION | token_modifiers::READONLY
    )));
    // `Add` called on line 6.
    assert!(absolute.contains(&(5, 8, token_types::FUNCTION, 0)));
    // `amount` parameter used on line 12.
    assert!(absolute.contains(&(11, 13, token_types::PARAMETER, 0)));
    // `num` on line 3.
    assert!(absolute.contains(&(2, 4, token_types::TYPE, 0)));
}
