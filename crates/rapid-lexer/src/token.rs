//! Token definitions for RAPID.

use std::fmt;

use rapid_common::Span;
use serde::Serialize;

/// A token with its kind, source text and span.
///
/// `text` is the literal source text of the token; for strings it holds the
/// contents without the surrounding quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Human readable description used in parser messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Ident => format!("identifier `{}`", self.text),
            TokenKind::Number => format!("number `{}`", self.text),
            TokenKind::String => format!("string \"{}\"", self.text),
            kind if kind.is_keyword() => format!("keyword `{}`", self.text),
            kind => format!("`{}`", kind),
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals and names
    Ident,
    Number,
    String,

    // Keywords
    Module,
    EndModule,
    Proc,
    EndProc,
    Func,
    EndFunc,
    Var,
    Pers,
    Const,
    If,
    Then,
    ElseIf,
    Else,
    EndIf,
    For,
    From,
    To,
    EndFor,
    While,
    EndWhile,
    Return,
    True,
    False,
    MoveJ,
    MoveL,
    MoveC,
    And,
    Or,
    Not,
    Test,
    Case,
    Default,
    EndTest,
    Trap,
    EndTrap,
    Connect,
    With,
    Raise,
    Record,
    EndRecord,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    ColonEq,
    Semicolon,
    Dot,
    Backslash,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,

    // Special
    Eof,
}

/// Reserved words, spelled in upper case.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("MODULE", TokenKind::Module),
    ("ENDMODULE", TokenKind::EndModule),
    ("PROC", TokenKind::Proc),
    ("ENDPROC", TokenKind::EndProc),
    ("FUNC", TokenKind::Func),
    ("ENDFUNC", TokenKind::EndFunc),
    ("VAR", TokenKind::Var),
    ("PERS", TokenKind::Pers),
    ("CONST", TokenKind::Const),
    ("IF", TokenKind::If),
    ("THEN", TokenKind::Then),
    ("ELSEIF", TokenKind::ElseIf),
    ("ELSE", TokenKind::Else),
    ("ENDIF", TokenKind::EndIf),
    ("FOR", TokenKind::For),
    ("FROM", TokenKind::From),
    ("TO", TokenKind::To),
    ("ENDFOR", TokenKind::EndFor),
    ("WHILE", TokenKind::While),
    ("ENDWHILE", TokenKind::EndWhile),
    ("RETURN", TokenKind::Return),
    ("TRUE", TokenKind::True),
    ("FALSE", TokenKind::False),
    ("MOVEJ", TokenKind::MoveJ),
    ("MOVEL", TokenKind::MoveL),
    ("MOVEC", TokenKind::MoveC),
    ("AND", TokenKind::And),
    ("OR", TokenKind::Or),
    ("NOT", TokenKind::Not),
    ("TEST", TokenKind::Test),
    ("CASE", TokenKind::Case),
    ("DEFAULT", TokenKind::Default),
    ("ENDTEST", TokenKind::EndTest),
    ("TRAP", TokenKind::Trap),
    ("ENDTRAP", TokenKind::EndTrap),
    ("CONNECT", TokenKind::Connect),
    ("WITH", TokenKind::With),
    ("RAISE", TokenKind::Raise),
    ("RECORD", TokenKind::Record),
    ("ENDRECORD", TokenKind::EndRecord),
];

impl TokenKind {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }

    /// Returns the keyword for a word, matched case-insensitively.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        let upper = s.to_uppercase();
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == upper)
            .map(|(_, kind)| *kind)
    }

    /// Canonical upper-case spelling of a keyword.
    pub fn keyword_text(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(text, _)| *text)
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::ColonEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text() {
            return f.write_str(text);
        }
        let s = match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::ColonEq => ":=",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Backslash => "\\",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::Neq => "<>",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Eof => "end of input",
            _ => "keyword",
        };
        f.write_str(s)
    }
}
