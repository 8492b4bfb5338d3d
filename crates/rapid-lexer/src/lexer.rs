//! The RAPID lexer.
//! RAPID 词法分析器。

use crate::token::{Token, TokenKind};
use rapid_common::{Position, Span};
use rapid_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};

/// The RAPID lexer.
/// RAPID 词法分析器。
///
/// Converts source code into a sequence of tokens. Lexical errors are
/// collected as diagnostics and never stop the scan.
/// 将源代码转换为 token 序列。词法错误被收集为诊断信息，不会中断扫描。
pub struct Lexer<'src> {
    /// Character iterator
    /// 字符迭代器
    chars: std::iter::Peekable<std::str::Chars<'src>>,
    /// Current line/column of the cursor
    /// 光标当前所在的行列
    pos: Position,
    /// Collected diagnostics (errors/warnings)
    /// 收集的诊断信息（错误/警告）
    diagnostics: Vec<Diagnostic>,
    /// Spans of skipped `!` comments
    /// 被跳过的 `!` 注释的范围
    comments: Vec<Span>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            pos: Position::START,
            diagnostics: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Tokenize the entire source and return tokens and diagnostics.
    /// 对整个源代码进行词法分析，返回 token 列表和诊断信息。
    pub fn tokenize(self) -> (Vec<Token>, Vec<Diagnostic>) {
        let (tokens, _, diagnostics) = self.tokenize_with_comments();
        (tokens, diagnostics)
    }

    /// Like [`Lexer::tokenize`], also returning the span of every comment.
    /// 同 [`Lexer::tokenize`]，并额外返回每条注释的范围。
    pub fn tokenize_with_comments(mut self) -> (Vec<Token>, Vec<Span>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        (tokens, self.comments, self.diagnostics)
    }

    /// Get the next token, skipping trivia and unrecognized characters.
    /// 获取下一个 token，跳过空白、注释和无法识别的字符。
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_trivia();

            let start = self.pos;

            // Check for end of file - 检查是否到达文件末尾
            let Some(ch) = self.advance() else {
                return Token::new(TokenKind::Eof, "", Span::point(start));
            };

            let kind = match ch {
                // Single character tokens - 单字符 token
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '.' => TokenKind::Dot,
                '\\' => TokenKind::Backslash,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '=' => TokenKind::Eq,

                // Colon or assignment - 冒号或赋值
                ':' => {
                    if self.eat_char('=') {
                        TokenKind::ColonEq
                    } else {
                        TokenKind::Colon
                    }
                }

                // Comparison operators - 比较运算符
                '<' => {
                    if self.eat_char('>') {
                        TokenKind::Neq
                    } else if self.eat_char('=') {
                        TokenKind::Le
                    } else {
                        TokenKind::Lt
                    }
                }
                '>' => {
                    if self.eat_char('=') {
                        TokenKind::Ge
                    } else {
                        TokenKind::Gt
                    }
                }

                '"' => return self.string_literal(start),

                c if c.is_ascii_digit() => return self.number(c, start),

                c if c.is_alphabetic() || c == '_' => return self.identifier(c, start),

                other => {
                    self.error_unrecognized_char(other, start);
                    continue;
                }
            };

            return Token::new(kind, kind.to_string(), Span::new(start, self.pos));
        }
    }

    /// Advance to the next character, updating line and column.
    /// 前进到下一个字符，并更新行列。
    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.pos = Position::new(self.pos.line + 1, 1);
        } else {
            self.pos = self.pos.offset(1);
        }
        Some(ch)
    }

    /// Peek at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek at the nth character ahead.
    /// 查看前方第 n 个字符。
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n)
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `!` line comments.
    /// 跳过空白字符和 `!` 行注释。
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '!' => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Skip a line comment (! to end of line).
    /// 跳过行注释（! 到行尾）。
    fn skip_line_comment(&mut self) {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        self.comments.push(Span::new(start, self.pos));
    }

    /// Parse a string literal. The opening quote is already consumed.
    /// 解析字符串字面量，起始引号已被消耗。
    fn string_literal(&mut self, start: Position) -> Token {
        let mut value = String::new();

        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    break;
                }
                None | Some('\n') => {
                    let span = Span::new(start, self.pos);
                    self.diagnostics.push(
                        Diagnostic::error(DiagnosticKind::Lexer, span, "unterminated string")
                            .with_code(ErrorCode::UnterminatedString)
                            .with_label(Label::new(Span::new(start, start.offset(1)), "string starts here")),
                    );
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::String, value, Span::new(start, self.pos))
    }

    /// Parse a number: digits with an optional fractional part.
    /// 解析数字：一串数字，可带小数部分。
    fn number(&mut self, first: char, start: Position) -> Token {
        let mut value = String::from(first);

        self.digits(&mut value);

        // Only a dot followed by a digit belongs to the number.
        // 只有后面紧跟数字的点才属于该数字。
        if self.peek_char() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            value.push('.');
            self.advance();
            self.digits(&mut value);
        }

        Token::new(TokenKind::Number, value, Span::new(start, self.pos))
    }

    fn digits(&mut self, value: &mut String) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse an identifier or keyword. Dots are part of the word.
    /// 解析标识符或关键字，点号属于单词的一部分。
    fn identifier(&mut self, first: char, start: Position) -> Token {
        let mut value = String::from(first);

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check for keywords - 检查是否为关键字
        let kind = TokenKind::keyword_from_str(&value).unwrap_or(TokenKind::Ident);
        Token::new(kind, value, Span::new(start, self.pos))
    }

    /// Report an unrecognized character error.
    /// 报告无法识别的字符错误。
    fn error_unrecognized_char(&mut self, ch: char, start: Position) {
        let span = Span::new(start, self.pos);
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Lexer,
                span,
                format!("unrecognized character `{}`", ch),
            )
            .with_code(ErrorCode::UnrecognizedCharacter),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = Lexer::new(source).tokenize();
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let (tokens, diags) = Lexer::new("").tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].span, Span::from_coords(1, 1, 1, 1));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            kinds(":= <> <= >= : < >"),
            vec![
                TokenKind::ColonEq,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Colon,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_followed_by_dot() {
        let (tokens, _) = Lexer::new("1.5 2.x").tokenize();
        assert_eq!(tokens[0].text, "1.5");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "2");
        assert_eq!(tokens[2].kind, TokenKind::Dot);
        assert_eq!(tokens[3].kind, TokenKind::Ident);
    }

    #[test]
    fn test_comment_spans() {
        let (tokens, comments, _) = Lexer::new("x := 1; ! set x\n! done").tokenize_with_comments();
        assert_eq!(tokens.len(), 5);
        assert_eq!(
            comments,
            vec![Span::from_coords(1, 9, 1, 16), Span::from_coords(2, 1, 2, 7)]
        );
    }

    #[test]
    fn test_eof_after_trailing_newline() {
        let (tokens, _) = Lexer::new("x\n").tokenize();
        assert_eq!(tokens.last().unwrap().span, Span::from_coords(2, 1, 2, 1));
    }
}
