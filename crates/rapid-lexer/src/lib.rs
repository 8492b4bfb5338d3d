//! Lexical analysis for RAPID.
//! RAPID 词法分析模块。
//!
//! This crate provides the lexer that converts source code into tokens.
//! 本 crate 提供词法分析器，将源代码转换为 token 序列。

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{KEYWORDS, Token, TokenKind};

use rapid_diagnostic::Diagnostic;

/// Tokenize a source text. The result always ends with an `Eof` token.
/// 对源码进行词法分析，结果总是以 `Eof` token 结尾。
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}
