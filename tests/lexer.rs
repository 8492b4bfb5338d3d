//! Integration tests for rapid-lexer crate.

use rapid_common::Span;
use rapid_diagnostic::ErrorCode;
use rapid_lexer::{Lexer, TokenKind, tokenize};

fn lex(source: &str) -> Vec<TokenKind> {
    let (tokens, _) = tokenize(source);
    tokens.into_iter().map(|t| t.kind).collect()
}

fn lex_with_errors(source: &str) -> (Vec<TokenKind>, usize) {
    let (tokens, errors) = tokenize(source);
    (tokens.into_iter().map(|t| t.kind).collect(), errors.len())
}

// ============================================================================
// Keywords and Names
// ============================================================================

#[test]
fn test_declaration_keywords() {
    assert_eq!(
        lex("MODULE PROC FUNC TRAP RECORD VAR PERS CONST"),
        vec![
            TokenKind::Module,
            TokenKind::Proc,
            TokenKind::Func,
            TokenKind::Trap,
            TokenKind::Record,
            TokenKind::Var,
            TokenKind::Pers,
            TokenKind::Const,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        lex("endproc EndIf movel"),
        vec![
            TokenKind::EndProc,
            TokenKind::EndIf,
            TokenKind::MoveL,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifier_keeps_dots_and_spelling() {
    let (tokens, errors) = tokenize("p10.trans.x MyTool_2");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].text, "p10.trans.x");
    assert_eq!(tokens[1].text, "MyTool_2");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    let (tokens, _) = tokenize("42 3.25 7.");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["42", "3.25", "7", ".", ""]);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[3].kind, TokenKind::Dot);
}

#[test]
fn test_string_contents_exclude_quotes() {
    let (tokens, errors) = tokenize("\"Hello, robot\"");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "Hello, robot");
    assert_eq!(tokens[0].span, Span::from_coords(1, 1, 1, 15));
}

#[test]
fn test_unterminated_string() {
    let (tokens, errors) = tokenize("s := \"open\nx");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, Some(ErrorCode::UnterminatedString));
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].text, "open");
    assert_eq!(tokens[3].text, "x");
}

// ============================================================================
// Operators and Punctuation
// ============================================================================

#[test]
fn test_operators() {
    assert_eq!(
        lex(":= : <> <= >= < > = + - * /"),
        vec![
            TokenKind::ColonEq,
            TokenKind::Colon,
            TokenKind::Neq,
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Eq,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_optional_argument_switch() {
    assert_eq!(
        lex("tool0\\WObj:=wobj0;"),
        vec![
            TokenKind::Ident,
            TokenKind::Backslash,
            TokenKind::Ident,
            TokenKind::ColonEq,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Trivia and Errors
// ============================================================================

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        lex("! header\nx ! trailing\n!"),
        vec![TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn test_comment_spans_are_reported() {
    let (tokens, comments, errors) = Lexer::new("! a\nx;").tokenize_with_comments();
    assert!(errors.is_empty());
    assert_eq!(comments, vec![Span::from_coords(1, 1, 1, 4)]);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_unrecognized_characters_are_skipped() {
    let (kinds, errors) = lex_with_errors("a @ b # c");
    assert_eq!(errors, 2);
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_always_ends_with_eof() {
    for source in ["", "   \n\t", "\"", "@@@", "MODULE", "1.2.3", "!"] {
        let kinds = lex(source);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof), "source {:?}", source);
        assert_eq!(
            kinds.iter().filter(|k| **k == TokenKind::Eof).count(),
            1,
            "source {:?}",
            source
        );
    }
}

#[test]
fn test_spans_are_one_based() {
    let (tokens, _) = tokenize("VAR num\n  x;");
    assert_eq!(tokens[0].span, Span::from_coords(1, 1, 1, 4));
    assert_eq!(tokens[1].span, Span::from_coords(1, 5, 1, 8));
    assert_eq!(tokens[2].span, Span::from_coords(2, 3, 2, 4));
}
