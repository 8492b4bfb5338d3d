//! Semantic diagnostic construction.
//!
//! Builders for the diagnostics the analyzer reports, so that message
//! wording and error codes live in one place.

use rapid_common::Span;
use rapid_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};

fn error(span: Span, code: ErrorCode, message: String) -> Diagnostic {
    Diagnostic::error(DiagnosticKind::Semantic, span, message).with_code(code)
}

pub fn already_defined(name: &str, span: Span, previous: Option<Span>) -> Diagnostic {
    let diag = error(
        span,
        ErrorCode::DuplicateDefinition,
        format!("`{}` is already defined", name),
    );
    match previous {
        Some(prev) => diag.with_label(Label::new(prev, "first defined here")),
        None => diag,
    }
}

pub fn unknown_type(name: &str, span: Span) -> Diagnostic {
    error(span, ErrorCode::UnknownType, format!("unknown type `{}`", name))
}

pub fn undefined_variable(name: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::UndefinedVariable,
        format!("undefined variable `{}`", name),
    )
}

pub fn undefined_routine(name: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::UndefinedRoutine,
        format!("undefined procedure or function `{}`", name),
    )
}

pub fn assignment_mismatch(target: &str, value: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::TypeMismatch,
        format!("assignment type mismatch: {} <- {}", target, value),
    )
}

pub fn assign_to_constant(name: &str, what: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::AssignToConstant,
        format!("cannot assign to {} `{}`", what, name),
    )
}

pub fn non_bool_condition(construct: &str, found: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::NonBoolCondition,
        format!("{} condition must be bool, found {}", construct, found),
    )
}

pub fn return_value_in(routine: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::ReturnValueInProcedure,
        format!("RETURN in a {} cannot return a value", routine),
    )
}

pub fn return_mismatch(expected: &str, found: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::ReturnTypeMismatch,
        format!("RETURN type mismatch: expected {}, found {}", expected, found),
    )
}

pub fn missing_return(name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(
        DiagnosticKind::Semantic,
        span,
        format!("function `{}` may be missing a RETURN", name),
    )
    .with_code(ErrorCode::MissingReturn)
}

pub fn case_mismatch(expected: &str, found: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::TypeMismatch,
        format!("CASE value type mismatch: expected {}, found {}", expected, found),
    )
}

pub fn undefined_trap(name: &str, span: Span, not_a_trap: bool) -> Diagnostic {
    let diag = error(span, ErrorCode::UndefinedTrap, format!("undefined trap `{}`", name));
    if not_a_trap {
        diag.with_help(format!("`{}` is declared, but not as a TRAP routine", name))
    } else {
        diag
    }
}

pub fn not_a_record(ty: &str, span: Span) -> Diagnostic {
    error(span, ErrorCode::NotARecord, format!("`{}` is not a record", ty))
}

pub fn unknown_field(ty: &str, field: &str, span: Span) -> Diagnostic {
    error(
        span,
        ErrorCode::UnknownField,
        format!("record `{}` has no field `{}`", ty, field),
    )
}
