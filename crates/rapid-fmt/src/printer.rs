//! Line-oriented output buffer.
//! 面向行的输出缓冲区。
//!
//! Text is collected one line at a time. A line is indented with the level
//! that was current when its first text was written, so a list may raise the
//! level for its continuation lines after starting on the current one.
//! 文本按行收集。每行使用写入第一段文本时的缩进级别，
//! 因此列表可以在当前行开始后再为续行提高缩进。

use crate::FormatConfig;

/// Output buffer with indentation tracking.
/// 带缩进跟踪的输出缓冲区。
pub struct Printer {
    config: FormatConfig,
    output: String,
    /// Text of the unfinished line, without indentation.
    line: String,
    /// Indentation level of the unfinished line, fixed by its first write.
    line_level: Option<usize>,
    level: usize,
}

impl Printer {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            config,
            output: String::new(),
            line: String::new(),
            line_level: None,
            level: 0,
        }
    }

    /// Finish the output, applying the trailing newline setting.
    /// 完成输出，并按配置处理结尾换行。
    pub fn finish(mut self) -> String {
        self.flush_line();
        let body = self.output.trim_end_matches('\n').len();
        self.output.truncate(body);
        if self.config.trailing_newline && !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.line_level.is_none() {
            self.line_level = Some(self.level);
        }
        self.line.push_str(s);
    }

    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// End the current line. An empty line gets no indentation.
    /// 结束当前行；空行不带缩进。
    pub fn newline(&mut self) {
        self.flush_line();
        self.output.push('\n');
    }

    /// Write an empty line unless the output already ends with one.
    /// 写入空行（若输出已以空行结尾则跳过）。
    pub fn blank_line(&mut self) {
        self.flush_line();
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    fn flush_line(&mut self) {
        if let Some(level) = self.line_level.take() {
            self.output.push_str(&self.config.indent.unit().repeat(level));
            self.output.push_str(&self.line);
            self.line.clear();
        }
    }

    /// Width of the current line in characters, counting its indentation.
    /// 当前行的字符宽度（包含缩进）。
    pub fn line_width(&self) -> usize {
        let level = self.line_level.unwrap_or(self.level);
        level * self.config.indent.width() + self.line.chars().count()
    }

    /// Whether appending `text_len` more characters would pass the maximum width.
    /// 再追加 `text_len` 个字符是否会超过最大宽度。
    pub fn would_exceed_width(&self, text_len: usize) -> bool {
        self.line_width() + text_len > self.config.max_width
    }

    pub fn current_indent(&self) -> usize {
        self.level
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_and_blank_lines() {
        let mut p = Printer::new(FormatConfig::new().indent_width(2));
        p.writeln("MODULE M");
        p.indent();
        p.writeln("VAR num x;");
        p.blank_line();
        p.blank_line();
        p.writeln("PROC P()");
        p.dedent();
        p.write("ENDMODULE");
        assert_eq!(p.finish(), "MODULE M\n  VAR num x;\n\n  PROC P()\nENDMODULE\n");
    }

    #[test]
    fn test_line_keeps_level_of_first_write() {
        let mut p = Printer::new(FormatConfig::new());
        p.write("Call a,");
        p.indent();
        p.newline();
        p.write("b;");
        p.dedent();
        assert_eq!(p.finish(), "Call a,\n    b;\n");
    }

    #[test]
    fn test_width_counts_pending_indent() {
        let mut p = Printer::new(FormatConfig::new().max_width(10));
        p.indent();
        p.indent();
        assert_eq!(p.line_width(), 8);
        assert!(!p.would_exceed_width(2));
        assert!(p.would_exceed_width(3));
        p.write("äb");
        assert_eq!(p.line_width(), 10);
    }

    #[test]
    fn test_without_trailing_newline() {
        let mut p = Printer::new(FormatConfig::new().trailing_newline(false));
        p.writeln("x;");
        p.newline();
        assert_eq!(p.finish(), "x;");
    }

    #[test]
    fn test_empty_output_stays_empty() {
        assert_eq!(Printer::new(FormatConfig::new()).finish(), "");
    }
}
