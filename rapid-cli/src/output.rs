//! Colored terminal output for the CLI.
//! CLI 的彩色终端输出。

const GREEN: u8 = 32;
const YELLOW: u8 = 33;
const RED: u8 = 31;
const BLUE: u8 = 34;

fn paint(color: u8, text: &str) -> String {
    format!("\x1b[{color}m{text}\x1b[0m")
}

/// Print a success message in green.
/// 以绿色打印成功消息。
pub fn success(msg: &str) {
    println!("{}", paint(GREEN, msg));
}

/// Print a warning to stderr.
/// 向标准错误打印警告。
pub fn warning(msg: &str) {
    eprintln!("{} {msg}", paint(YELLOW, "warning:"));
}

/// Print an error to stderr.
/// 向标准错误打印错误。
pub fn error(msg: &str) {
    eprintln!("{} {msg}", paint(RED, "error:"));
}

pub fn info(msg: &str) {
    println!("{} {msg}", paint(BLUE, "info:"));
}

/// `1 error`, `3 warnings`.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
