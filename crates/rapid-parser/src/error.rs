//! Fatal parse error.

use rapid_common::Span;
use thiserror::Error;

/// Raised by the first grammar mismatch. The matching diagnostic has
/// already been recorded on the parser when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

pub(crate) type PResult<T> = Result<T, ParseError>;
