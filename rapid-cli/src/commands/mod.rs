//! CLI command implementations.

pub mod ast;
pub mod check;
pub mod fmt;
pub mod lsp;
pub mod symbols;

use rapid_analysis::{AnalysisResult, analyze_path};
use rapid_diagnostic::emit;

/// Read and analyze a file, mapping I/O failures to a CLI message.
pub(crate) fn load(file: &str) -> Result<(String, AnalysisResult), String> {
    analyze_path(file).map_err(|e| e.to_string())
}

/// Render every diagnostic of an analysis to stderr.
pub(crate) fn report(source: &str, file: &str, result: &AnalysisResult) -> Result<(), String> {
    for diag in &result.diagnostics {
        emit(source, file, diag).map_err(|e| format!("cannot write diagnostics: {}", e))?;
    }
    Ok(())
}
