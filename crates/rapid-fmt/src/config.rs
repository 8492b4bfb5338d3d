//! Formatter configuration.
//! 格式化器配置。

/// How one indentation level is written.
/// 单级缩进的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Indent {
    /// The text of one level.
    pub fn unit(self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(n),
            Indent::Tab => "\t".to_string(),
        }
    }

    /// Columns one level occupies when measuring line width; a tab counts as one.
    pub fn width(self) -> usize {
        match self {
            Indent::Spaces(n) => n,
            Indent::Tab => 1,
        }
    }
}

/// Formatter configuration.
/// 格式化器配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub indent: Indent,
    /// Width above which argument lists are broken. / 参数列表换行的宽度阈值。
    pub max_width: usize,
    /// End the output with exactly one newline. / 输出以一个换行结尾。
    pub trailing_newline: bool,
    /// Put each argument of an overlong list on its own line.
    /// 过长的参数列表每项单独成行。
    pub break_long_lists: bool,
    /// Separate routines and records from their neighbours with a blank line.
    /// 例程和记录与相邻声明之间空一行。
    pub blank_lines_between_items: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: Indent::Spaces(4),
            max_width: 100,
            trailing_newline: true,
            break_long_lists: true,
            blank_lines_between_items: true,
        }
    }
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings an editor sends with a formatting request.
    /// 编辑器在格式化请求中给出的设置。
    pub fn for_editor(tab_size: u32, insert_spaces: bool) -> Self {
        let indent = if insert_spaces {
            Indent::Spaces(tab_size as usize)
        } else {
            Indent::Tab
        };
        Self {
            indent,
            ..Self::default()
        }
    }

    /// Indent with `width` spaces per level.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent = Indent::Spaces(width);
        self
    }

    /// Indent with one tab per level.
    pub fn tabs(mut self) -> Self {
        self.indent = Indent::Tab;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = enabled;
        self
    }

    pub fn break_long_lists(mut self, enabled: bool) -> Self {
        self.break_long_lists = enabled;
        self
    }

    pub fn blank_lines_between_items(mut self, enabled: bool) -> Self {
        self.blank_lines_between_items = enabled;
        self
    }
}
