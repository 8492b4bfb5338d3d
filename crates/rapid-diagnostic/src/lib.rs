//! Diagnostic and error reporting for the RAPID toolchain.
//! RAPID 工具链的诊断和错误报告。
//!
//! This crate provides readable error messages using ariadne.
//! 本 crate 使用 ariadne 库提供易读的错误信息。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label, Severity};

use std::io;

use ariadne::{ColorGenerator, Label as AriadneLabel, Report, ReportKind, Source};
use rapid_common::LineIndex;

/// Sort diagnostics by start position, keeping the emission order of ties.
/// 按起始位置排序诊断信息，位置相同时保持原有顺序。
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.span.start);
}

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) -> io::Result<()> {
    let index = LineIndex::new(source);
    let report = build_report(&index, filename, diagnostic);
    report.eprint((filename, Source::from(source)))
}

/// Render a diagnostic into any writer, without colors.
/// 将诊断信息渲染到任意输出（不带颜色）。
pub fn write_report<W: io::Write>(
    source: &str,
    filename: &str,
    diagnostic: &Diagnostic,
    out: W,
) -> io::Result<()> {
    let index = LineIndex::new(source);
    let report = build_report(&index, filename, diagnostic);
    report.write((filename, Source::from(source)), out)
}

fn build_report<'a>(
    index: &LineIndex,
    filename: &'a str,
    diagnostic: &Diagnostic,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    let mut colors = ColorGenerator::new();
    let primary = index.range(diagnostic.span);
    let mut report = Report::build(kind, filename, primary.start).with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    report = report.with_label(
        AriadneLabel::new((filename, primary))
            .with_message(&diagnostic.message)
            .with_color(colors.next()),
    );

    for label in &diagnostic.labels {
        let ariadne_label = AriadneLabel::new((filename, index.range(label.span)))
            .with_message(&label.message)
            .with_color(colors.next());
        report = report.with_label(ariadne_label);
    }

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    } else if let Some(suggestion) = diagnostic.code.and_then(|c| c.suggestion()) {
        report = report.with_help(suggestion);
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapid_common::Span;

    #[test]
    fn test_sort_is_stable_by_position() {
        let mut diags = vec![
            Diagnostic::error(DiagnosticKind::Semantic, Span::from_coords(3, 1, 3, 2), "c"),
            Diagnostic::error(DiagnosticKind::Lexer, Span::from_coords(1, 4, 1, 5), "a"),
            Diagnostic::warning(DiagnosticKind::Semantic, Span::from_coords(1, 4, 1, 9), "b"),
        ];
        sort_diagnostics(&mut diags);
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_includes_code() {
        let diag = Diagnostic::error(DiagnosticKind::Lexer, Span::from_coords(2, 7, 2, 8), "bad")
            .with_code(ErrorCode::UnrecognizedCharacter);
        assert_eq!(diag.to_string(), "2:7: error[E0001]: bad");
    }

    #[test]
    fn test_write_report_mentions_message() {
        let source = "MODULE M\n  x := @;\nENDMODULE\n";
        let diag = Diagnostic::error(DiagnosticKind::Lexer, Span::from_coords(2, 8, 2, 9), "unrecognized character `@`");
        let mut out = Vec::new();
        write_report(source, "m.mod", &diag, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("unrecognized character"));
    }
}
