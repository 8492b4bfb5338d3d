//! Document management for the LSP server.

use rapid_analysis::{AnalysisResult, analyze};
use rapid_common::{LineIndex, Position, Span};

use crate::symbol_index::SymbolIndex;

/// An open document and everything derived from its text.
#[derive(Debug)]
pub struct Document {
    /// The document URI.
    pub uri: String,
    /// The document content.
    pub content: String,
    /// Line table for position conversion.
    pub line_index: LineIndex,
    /// Diagnostics and syntax tree of the last analysis.
    pub analysis: AnalysisResult,
    /// Symbol index; `None` while the text has a syntax error.
    pub symbol_index: Option<SymbolIndex>,
}

impl Document {
    pub fn new(uri: String, content: String) -> Self {
        let (line_index, analysis, symbol_index) = Self::analyze(&content);
        Self {
            uri,
            content,
            line_index,
            analysis,
            symbol_index,
        }
    }

    /// Replace the content and re-run the pipeline.
    pub fn update(&mut self, content: String) {
        let (line_index, analysis, symbol_index) = Self::analyze(&content);
        self.content = content;
        self.line_index = line_index;
        self.analysis = analysis;
        self.symbol_index = symbol_index;
    }

    fn analyze(content: &str) -> (LineIndex, AnalysisResult, Option<SymbolIndex>) {
        let analysis = analyze(content);
        let symbol_index = analysis.program.as_ref().map(SymbolIndex::from_program);
        tracing::debug!(
            diagnostics = analysis.diagnostics.len(),
            indexed = symbol_index.is_some(),
            "document analyzed"
        );
        (LineIndex::new(content), analysis, symbol_index)
    }

    /// Convert an LSP position.
    pub fn position(&self, line: u32, character: u32) -> Position {
        self.line_index.from_lsp(line, character)
    }

    /// Convert a span to 0-based `((line, character), (line, character))`.
    pub fn lsp_range(&self, span: Span) -> ((u32, u32), (u32, u32)) {
        (
            self.line_index.to_lsp(span.start),
            self.line_index.to_lsp(span.end),
        )
    }

    /// Text covered by a span.
    pub fn text(&self, span: Span) -> String {
        let range = self.line_index.range(span);
        self.content
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect()
    }
}
