//! Code formatter for RAPID.
//! RAPID 代码格式化器。
//!
//! Reprints a module from its syntax tree with uniform indentation,
//! upper-case keywords and minimal parentheses. Formatting is idempotent
//! and the output parses back to the same tree.
//! 从语法树重新打印模块：统一缩进、关键字大写、最少括号。
//! 格式化是幂等的，输出可解析回相同的语法树。
//!
//! Comments are not part of the tree and are not preserved.
//! 注释不在语法树中，不会被保留。

mod config;
mod format;
mod printer;

pub use config::FormatConfig;
pub use format::Formatter;
pub use printer::Printer;

use rapid_common::Span;
use rapid_diagnostic::{Diagnostic, DiagnosticKind};
use rapid_syntax::Program;
use thiserror::Error;

/// Why a source text could not be formatted.
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// The lexer rejected part of the input.
    #[error("lexical error at {}: {}", .0.span, .0.message)]
    Lexical(Diagnostic),
    /// The input does not parse.
    #[error("syntax error at {}: {}", .0.span, .0.message)]
    Syntax(Diagnostic),
}

/// Format source code with default configuration.
/// 使用默认配置格式化源代码。
pub fn format(source: &str) -> Result<String, FormatError> {
    format_with_config(source, &FormatConfig::default())
}

/// Format source code with custom configuration.
/// 使用自定义配置格式化源代码。
pub fn format_with_config(source: &str, config: &FormatConfig) -> Result<String, FormatError> {
    let program = parse_clean(source)?;
    Ok(format_program(&program, config))
}

/// Format an already parsed program.
pub fn format_program(program: &Program, config: &FormatConfig) -> String {
    Formatter::new(config.clone()).format(program)
}

/// Check whether source code is already formatted.
/// 检查源代码是否已格式化。
pub fn check(source: &str) -> Result<bool, FormatError> {
    check_with_config(source, &FormatConfig::default())
}

pub fn check_with_config(source: &str, config: &FormatConfig) -> Result<bool, FormatError> {
    let formatted = format_with_config(source, config)?;
    Ok(formatted == source)
}

/// Parse, refusing input the lexer had to repair.
fn parse_clean(source: &str) -> Result<Program, FormatError> {
    let (program, diagnostics) = rapid_parser::parse(source);

    if let Some(diag) = first_error(&diagnostics, DiagnosticKind::Lexer) {
        tracing::debug!(%diag, "refusing to format");
        return Err(FormatError::Lexical(diag.clone()));
    }

    match program {
        Some(program) => Ok(program),
        None => {
            let diag = first_error(&diagnostics, DiagnosticKind::Parser)
                .cloned()
                .unwrap_or_else(|| {
                    Diagnostic::error(DiagnosticKind::Parser, Span::DUMMY, "source could not be parsed")
                });
            Err(FormatError::Syntax(diag))
        }
    }
}

fn first_error(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> Option<&Diagnostic> {
    diagnostics.iter().find(|d| d.kind == kind && d.is_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_module() {
        let source = "module M var num x:=1; proc p() x:=x+1; endproc endmodule";
        let formatted = format(source).unwrap();
        assert_eq!(
            formatted,
            "MODULE M\n    VAR num x := 1;\n\n    PROC p()\n        x := x + 1;\n    ENDPROC\nENDMODULE\n"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let source = "MODULE M\nPROC p()\nWHILE a<3\nIF a=1 THEN\nTPWrite \"one\";\nELSE\na:=a+1;\nENDIF\nENDWHILE\nENDPROC\nENDMODULE";
        let once = format(source).unwrap();
        let twice = format(&once).unwrap();
        assert_eq!(once, twice);
        assert!(check(&once).unwrap());
        assert!(!check(source).unwrap());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = format("MODULE M\nVAR num x\nENDMODULE").unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_lexical_error_is_reported() {
        let err = format("MODULE M\nVAR string s := \"open;\nENDMODULE").unwrap_err();
        assert!(matches!(err, FormatError::Lexical(_)));
    }
}
