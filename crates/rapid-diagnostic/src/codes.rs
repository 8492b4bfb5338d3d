//! Error codes for RAPID diagnostics.

use serde::{Serialize, Serializer};

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnrecognizedCharacter,
    UnterminatedString,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    InvalidCallTarget,
    MalformedName,

    // Semantic errors (E0200 - E0299)
    DuplicateDefinition,
    UnknownType,
    UndefinedVariable,
    UndefinedRoutine,
    TypeMismatch,
    NonBoolCondition,
    ReturnValueInProcedure,
    ReturnTypeMismatch,
    MissingReturn,
    UndefinedTrap,
    NotARecord,
    UnknownField,
    AssignToConstant,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnrecognizedCharacter => "E0001",
            ErrorCode::UnterminatedString => "E0002",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::InvalidCallTarget => "E0102",
            ErrorCode::MalformedName => "E0103",

            // Semantic
            ErrorCode::DuplicateDefinition => "E0200",
            ErrorCode::UnknownType => "E0201",
            ErrorCode::UndefinedVariable => "E0202",
            ErrorCode::UndefinedRoutine => "E0203",
            ErrorCode::TypeMismatch => "E0204",
            ErrorCode::NonBoolCondition => "E0205",
            ErrorCode::ReturnValueInProcedure => "E0206",
            ErrorCode::ReturnTypeMismatch => "E0207",
            ErrorCode::MissingReturn => "E0208",
            ErrorCode::UndefinedTrap => "E0209",
            ErrorCode::NotARecord => "E0210",
            ErrorCode::UnknownField => "E0211",
            ErrorCode::AssignToConstant => "E0212",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnrecognizedCharacter => "character is not part of the RAPID alphabet",
            ErrorCode::UnterminatedString => "string literal is not terminated",

            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::InvalidCallTarget => "only named routines can be called",
            ErrorCode::MalformedName => "malformed dotted name",

            ErrorCode::DuplicateDefinition => "name is defined more than once in the same scope",
            ErrorCode::UnknownType => "cannot find type in this scope",
            ErrorCode::UndefinedVariable => "cannot find data in this scope",
            ErrorCode::UndefinedRoutine => "cannot find procedure or function in this scope",
            ErrorCode::TypeMismatch => "mismatched types",
            ErrorCode::NonBoolCondition => "condition is not of type bool",
            ErrorCode::ReturnValueInProcedure => "procedures and traps cannot return a value",
            ErrorCode::ReturnTypeMismatch => "returned value does not match the function type",
            ErrorCode::MissingReturn => "function has no RETURN statement",
            ErrorCode::UndefinedTrap => "CONNECT target is not a trap routine",
            ErrorCode::NotARecord => "field access on a type without components",
            ErrorCode::UnknownField => "record has no such component",
            ErrorCode::AssignToConstant => "cannot assign to a constant",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedString => Some("add a closing quote `\"` to terminate the string"),
            ErrorCode::UndefinedVariable => Some("check the spelling or declare the data in this module"),
            ErrorCode::UnknownType => Some("use a built-in data type or declare a RECORD"),
            ErrorCode::MissingReturn => Some("add `RETURN <value>;` before ENDFUNC"),
            ErrorCode::UndefinedTrap => Some("declare the routine with TRAP ... ENDTRAP"),
            ErrorCode::AssignToConstant => Some("declare the data as VAR or PERS instead of CONST"),
            _ => None,
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
