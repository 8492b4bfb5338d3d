//! Semantic analysis for RAPID.
//! RAPID 语义分析。
//!
//! This crate resolves names through block-structured scopes and applies a
//! lightweight structural type model: every data item carries a type name,
//! built-in types compare case-insensitively, records expose their fields.
//! 本 crate 通过块结构作用域解析名称，并使用轻量的结构化类型模型。
//!
//! ## Checks 检查项
//!
//! - Duplicate definitions and unknown data types / 重复定义与未知类型
//! - Undefined data, routines and traps / 未定义的数据、例程和中断
//! - Assignment, RETURN and CASE type agreement / 赋值、返回值与 CASE 类型一致性
//! - Boolean IF/WHILE conditions / IF/WHILE 条件必须为 bool
//! - Functions without RETURN (warning) / 缺少 RETURN 的函数（警告）

mod check;
pub mod errors;
mod scope;
pub mod types;

pub use check::SemanticAnalyzer;
pub use scope::{Scope, Symbol, SymbolDecl};

use rapid_diagnostic::Diagnostic;
use rapid_syntax::Program;

/// Analyze a parsed program.
/// 对语法树进行语义分析。
///
/// Returns the diagnostics (errors and warnings) found, in discovery order.
/// 按发现顺序返回诊断信息（错误和警告）。
pub fn check(program: &Program) -> Vec<Diagnostic> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(program);
    analyzer.diagnostics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapid_diagnostic::Severity;

    fn analyze(source: &str) -> Vec<Diagnostic> {
        let (program, diagnostics) = rapid_parser::parse(source);
        assert!(diagnostics.is_empty(), "unexpected syntax errors: {:?}", diagnostics);
        check(&program.expect("program should parse"))
    }

    #[test]
    fn test_builtin_routines_and_data_resolve() {
        let diags = analyze(
            "MODULE M\nPROC P()\n  MoveL Offs(CRobT(), 0, 0, 10), v100, fine, tool0 \\WObj:=wobj0;\n  WaitTime 0.5;\nENDPROC\nENDMODULE",
        );
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn test_builtin_structured_fields() {
        let diags = analyze(
            "MODULE M\nVAR robtarget p;\nPROC P()\n  p.trans.x := 5;\n  p.trans.w := 1;\nENDPROC\nENDMODULE",
        );
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("no field `w`"));
    }

    #[test]
    fn test_assign_to_loop_variable() {
        let diags = analyze("MODULE M\nPROC P()\n  FOR i FROM 1 TO 3\n    i := 2;\n  ENDFOR\nENDPROC\nENDMODULE");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert!(diags[0].message.contains("loop variable `i`"));
    }

    #[test]
    fn test_unknown_base_type_suppresses_field_errors() {
        let diags = analyze("MODULE M\nPROC P()\n  x.y := 1;\nENDPROC\nENDMODULE");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("undefined variable `x`"));
    }
}
