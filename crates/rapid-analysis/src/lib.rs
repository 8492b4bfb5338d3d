//! Analysis pipeline for RAPID source text.
//!
//! [`analyze`] is the single entry point consumers use: it runs the lexer,
//! the parser and, when a tree was produced, the semantic analyzer, and
//! returns every diagnostic in position order together with the tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rapid_diagnostic::{Diagnostic, Severity, sort_diagnostics};
use rapid_lexer::Lexer;
use rapid_parser::Parser;
use rapid_syntax::Program;
use serde::Serialize;
use thiserror::Error;

/// Outcome of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// All diagnostics, sorted by start position (stable).
    pub diagnostics: Vec<Diagnostic>,
    /// The syntax tree; `None` when a syntax error aborted the parse.
    pub program: Option<Program>,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }
}

/// Errors that prevent analysis from running at all.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Analyze a source text.
pub fn analyze(source: &str) -> AnalysisResult {
    let (tokens, lex_diagnostics) = Lexer::new(source).tokenize();
    let token_count = tokens.len();

    let mut parser = Parser::new(tokens);
    let program = parser.parse_program().ok();
    let parse_diagnostics = parser.diagnostics();

    let sema_diagnostics = match &program {
        Some(program) => rapid_sema::check(program),
        None => Vec::new(),
    };

    tracing::debug!(
        tokens = token_count,
        lexer = lex_diagnostics.len(),
        parser = parse_diagnostics.len(),
        semantic = sema_diagnostics.len(),
        parsed = program.is_some(),
        "analysis finished"
    );

    let mut diagnostics = lex_diagnostics;
    diagnostics.extend(parse_diagnostics);
    diagnostics.extend(sema_diagnostics);
    sort_diagnostics(&mut diagnostics);

    AnalysisResult {
        diagnostics,
        program,
    }
}

/// Read a file and analyze its contents.
pub fn analyze_path(path: impl AsRef<Path>) -> Result<(String, AnalysisResult), AnalysisError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let result = analyze(&source);
    Ok((source, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_source_has_empty_program() {
        let result = analyze("");
        assert!(result.diagnostics.is_empty());
        let program = result.program.unwrap();
        assert!(program.modules.is_empty());
    }

    #[test]
    fn test_syntax_error_drops_program() {
        let result = analyze("MODULE M\nVAR num x\nENDMODULE");
        assert!(result.program.is_none());
        assert!(result.has_errors());
    }

    #[test]
    fn test_analyze_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "MODULE M\nENDMODULE\n").unwrap();
        let (source, result) = analyze_path(file.path()).unwrap();
        assert!(source.starts_with("MODULE"));
        assert!(result.program.is_some());
    }

    #[test]
    fn test_analyze_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze_path(dir.path().join("missing.mod")).unwrap_err();
        assert!(err.to_string().contains("missing.mod"));
    }
}
