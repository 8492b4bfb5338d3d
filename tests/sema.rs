//! Integration tests for rapid-sema crate.

use rapid_diagnostic::{Diagnostic, ErrorCode, Severity};
use rapid_parser::parse;

fn check(source: &str) -> Vec<Diagnostic> {
    let (program, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "unexpected parse diagnostics: {:?}", diagnostics);
    rapid_sema::check(&program.expect("program"))
}

fn codes(source: &str) -> Vec<ErrorCode> {
    check(source).into_iter().filter_map(|d| d.code).collect()
}

fn in_proc(body: &str) -> String {
    format!("MODULE M\nVAR num x;\nPROC P()\n{}\nENDPROC\nENDMODULE", body)
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_clean_module() {
    let source = "MODULE Main\n\
        RECORD point\n  num x;\n  num y;\nENDRECORD\n\
        VAR point origin;\n\
        CONST num limit := 10;\n\
        PROC Main()\n  VAR num i := 0;\n  WHILE i < limit\n    i := i + 1;\n  ENDWHILE\n  origin.x := i;\nENDPROC\n\
        FUNC bool Done(num n)\n  RETURN n >= limit;\nENDFUNC\n\
        ENDMODULE";
    assert!(check(source).is_empty());
}

#[test]
fn test_duplicate_top_level_name() {
    let diagnostics = check("MODULE M\nVAR num a;\nVAR bool a;\nPROC a()\nENDPROC\nENDMODULE");
    let duplicates: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.code == Some(ErrorCode::DuplicateDefinition))
        .collect();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0].span.start.line, 3);
    assert_eq!(duplicates[1].span.start.line, 4);
    assert_eq!(duplicates[0].labels[0].span.start.line, 2);
}

#[test]
fn test_single_duplicate_reported_once() {
    let diagnostics = check("MODULE M\nVAR num a;\nVAR num a;\nENDMODULE");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("already defined"));
    assert_eq!(diagnostics[0].span.start.line, 3);
}

#[test]
fn test_same_name_in_different_modules() {
    let source = "MODULE A\nVAR num x;\nENDMODULE\nMODULE B\nVAR num x;\nENDMODULE";
    assert!(check(source).is_empty());
}

#[test]
fn test_unknown_type() {
    assert_eq!(
        codes("MODULE M\nVAR widget w;\nENDMODULE"),
        vec![ErrorCode::UnknownType]
    );
}

#[test]
fn test_builtin_types_ignore_case_and_records_may_follow_use() {
    let source = "MODULE M\nVAR NUM a;\nVAR later b;\nRECORD later\n  num v;\nENDRECORD\nENDMODULE";
    assert!(check(source).is_empty());
}

#[test]
fn test_parameter_shadows_global() {
    let source = "MODULE M\nVAR num x;\nPROC P(bool x)\n  IF x THEN\n  ENDIF\nENDPROC\nENDMODULE";
    assert!(check(source).is_empty());
}

// ============================================================================
// Scopes
// ============================================================================

#[test]
fn test_if_branch_scope_ends_at_endif() {
    let diagnostics = check(&in_proc("IF TRUE THEN\n  VAR num inner := 1;\n  x := inner;\nENDIF\nx := inner;"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(ErrorCode::UndefinedVariable));
    assert_eq!(diagnostics[0].span.start.line, 8);
}

#[test]
fn test_for_variable_is_scoped_and_readonly() {
    let diagnostics = check(&in_proc("FOR i FROM 1 TO 3\n  i := 2;\nENDFOR\nx := i;"));
    let found: Vec<Option<ErrorCode>> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        found,
        vec![Some(ErrorCode::AssignToConstant), Some(ErrorCode::UndefinedVariable)]
    );
    assert!(diagnostics[0].message.contains("loop variable"));
}

#[test]
fn test_assign_to_constant() {
    let source = "MODULE M\nCONST num k := 1;\nPROC P()\n  k := 2;\nENDPROC\nENDMODULE";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(ErrorCode::AssignToConstant));
}

#[test]
fn test_undefined_routine() {
    assert_eq!(codes(&in_proc("x := Frob(1);")), vec![ErrorCode::UndefinedRoutine]);
    assert!(codes(&in_proc("x := Abs(-1);\nTPWrite \"ok\";")).is_empty());
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_assignment_mismatch_message() {
    let diagnostics = check("MODULE M\nVAR num x;\nPROC P()\n x:=TRUE;\nENDPROC\nENDMODULE");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("num <- bool"));
}

#[test]
fn test_binary_operands_are_not_checked() {
    assert!(check(&in_proc("x := \"abc\" + 5;")).is_empty());
}

#[test]
fn test_non_bool_conditions() {
    let diagnostics = check(&in_proc("IF x THEN\nENDIF\nWHILE \"s\"\nENDWHILE"));
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "IF condition must be bool, found num",
            "WHILE condition must be bool, found string",
        ]
    );
    assert_eq!(diagnostics[0].span.start.col, 4);
}

#[test]
fn test_case_value_mismatch() {
    let diagnostics = check(&in_proc("TEST x\nCASE 1:\nCASE \"two\":\nENDTEST"));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("expected num, found string"));
}

#[test]
fn test_structured_field_types() {
    let source = "MODULE M\nVAR robtarget p;\nVAR num n;\nPROC P()\n  n := p.trans.x;\n  n := p.trans;\n  n := p.nope;\nENDPROC\nENDMODULE";
    let found = codes(source);
    assert_eq!(found, vec![ErrorCode::TypeMismatch, ErrorCode::UnknownField]);
}

#[test]
fn test_field_of_atomic_value() {
    assert_eq!(codes(&in_proc("x := x.y;")), vec![ErrorCode::NotARecord]);
}

// ============================================================================
// Routines
// ============================================================================

#[test]
fn test_function_without_return_warns_once() {
    let source = "MODULE M\nFUNC num F()\n  VAR num y := 1;\nENDFUNC\nENDMODULE";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code, Some(ErrorCode::MissingReturn));
}

#[test]
fn test_nested_return_satisfies_function() {
    let source = "MODULE M\nFUNC num F(bool b)\n  IF b THEN\n    RETURN 1;\n  ENDIF\nENDFUNC\nENDMODULE";
    assert!(check(source).is_empty());
}

#[test]
fn test_return_rules() {
    let source = "MODULE M\n\
        PROC P()\n  RETURN 1;\nENDPROC\n\
        TRAP T\n  RETURN TRUE;\nENDTRAP\n\
        FUNC num F()\n  RETURN \"s\";\nENDFUNC\n\
        ENDMODULE";
    assert_eq!(
        codes(source),
        vec![
            ErrorCode::ReturnValueInProcedure,
            ErrorCode::ReturnValueInProcedure,
            ErrorCode::ReturnTypeMismatch,
        ]
    );
}

#[test]
fn test_connect_requires_trap() {
    let source = "MODULE M\nVAR intnum sig;\nTRAP OnSig\nENDTRAP\nPROC P()\n  CONNECT OnSig WITH sig;\n  CONNECT t WITH e;\n  CONNECT sig WITH e;\nENDPROC\nENDMODULE";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.code == Some(ErrorCode::UndefinedTrap)));
    assert!(diagnostics[0].message.contains("`t`"));
    assert!(diagnostics[0].help.is_none());
    assert!(diagnostics[1].help.is_some());
}
