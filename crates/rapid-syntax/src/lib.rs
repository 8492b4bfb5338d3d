//! AST definitions for RAPID.
//!
//! This crate defines the abstract syntax tree produced by the parser
//! and consumed by the semantic analyzer, the formatter and the IDE layer.

mod ast;
mod expr;
mod stmt;

pub use ast::*;
pub use expr::*;
pub use stmt::*;
