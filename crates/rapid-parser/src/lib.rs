//! Parser for RAPID.
//!
//! This crate provides a recursive descent parser that converts
//! tokens into an abstract syntax tree.
//!
//! ## Error Policy
//!
//! A syntax error is fatal: the first token that does not fit the grammar
//! records one diagnostic and the whole parse returns [`ParseError`].
//! No partial tree is ever handed out.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use rapid_diagnostic::Diagnostic;
use rapid_lexer::Lexer;
use rapid_syntax::Program;

/// Parse source code into an AST.
///
/// Returns `None` for the program when a syntax error aborted the parse.
/// Lexer diagnostics come first, followed by the parser's.
pub fn parse(source: &str) -> (Option<Program>, Vec<Diagnostic>) {
    let lexer = Lexer::new(source);
    let (tokens, mut diagnostics) = lexer.tokenize();

    let mut parser = Parser::new(tokens);
    let program = parser.parse_program().ok();

    diagnostics.extend(parser.diagnostics());
    (program, diagnostics)
}
