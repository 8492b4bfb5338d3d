//! Token-level syntax classification.
//! 词法级语法分类。

use rapid_common::Span;
use rapid_lexer::{Lexer, TokenKind};
use rapid_sema::types::builtin_type;

/// Highlight class of a source range.
/// 源码区间的高亮类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Keyword,
    TypeName,
    Identifier,
    Number,
    String,
    Comment,
    Operator,
    Punctuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightToken {
    pub span: Span,
    pub kind: HighlightKind,
}

/// Classify every token and comment of a source text, in position order.
/// 按位置顺序对源码中的每个 token 和注释进行分类。
pub fn highlight(source: &str) -> Vec<HighlightToken> {
    let (tokens, comments, _) = Lexer::new(source).tokenize_with_comments();

    let mut result: Vec<HighlightToken> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| {
            let kind = match t.kind {
                TokenKind::Ident if builtin_type(&t.text).is_some() => HighlightKind::TypeName,
                TokenKind::Ident => HighlightKind::Identifier,
                TokenKind::Number => HighlightKind::Number,
                TokenKind::String => HighlightKind::String,
                TokenKind::Backslash => HighlightKind::Operator,
                kind if kind.is_keyword() => HighlightKind::Keyword,
                kind if kind.is_operator() => HighlightKind::Operator,
                _ => HighlightKind::Punctuation,
            };
            HighlightToken { span: t.span, kind }
        })
        .collect();

    result.extend(comments.into_iter().map(|span| HighlightToken {
        span,
        kind: HighlightKind::Comment,
    }));
    result.sort_by_key(|t| t.span.start);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<HighlightKind> {
        highlight(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_declaration_line() {
        use HighlightKind::*;
        assert_eq!(
            kinds("VAR num x := 1; ! note"),
            vec![Keyword, TypeName, Identifier, Operator, Number, Punctuation, Comment]
        );
    }

    #[test]
    fn test_keywords_ignore_case_and_strings_hide_comments() {
        use HighlightKind::*;
        assert_eq!(
            kinds("movel \"a!b\", NOT ok"),
            vec![Keyword, String, Punctuation, Keyword, Identifier]
        );
    }

    #[test]
    fn test_comment_span() {
        let tokens = highlight("x;\n  ! indented");
        let comment = tokens.last().unwrap();
        assert_eq!(comment.kind, HighlightKind::Comment);
        assert_eq!(comment.span, Span::from_coords(2, 3, 2, 13));
    }
}
