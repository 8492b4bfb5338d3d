//! The `rapid fmt` command.
//! `rapid fmt` 命令。

use std::fs;
use std::path::{Path, PathBuf};

use rapid_fmt::FormatConfig;

use crate::output;

/// Extensions of RAPID source files.
const RAPID_EXTENSIONS: &[&str] = &["mod", "modx", "sys", "prg"];

fn config(indent: usize) -> FormatConfig {
    FormatConfig::new().indent_width(indent)
}

fn read(path: &Path) -> Result<String, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Format `path`, returning the source and its formatted text.
fn format_file(path: &Path, config: &FormatConfig) -> Result<(String, String), String> {
    let source = read(path)?;
    let formatted = rapid_fmt::format_with_config(&source, config)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok((source, formatted))
}

/// Format a RAPID file, printing the result or rewriting it in place.
/// 格式化 RAPID 文件，打印结果或原地重写。
pub fn run(file: &str, write: bool, indent: usize) -> Result<(), String> {
    let path = Path::new(file);
    let (source, formatted) = format_file(path, &config(indent))?;

    if !write {
        print!("{}", formatted);
        return Ok(());
    }

    if formatted == source {
        output::info(&format!("Already formatted: {file}"));
    } else {
        fs::write(path, &formatted).map_err(|e| format!("Failed to write file: {}", e))?;
        output::success(&format!("Formatted: {file}"));
    }
    Ok(())
}

/// Check whether a file is already formatted.
/// 检查文件是否已格式化。
pub fn check(file: &str, indent: usize) -> Result<(), String> {
    let (source, formatted) = format_file(Path::new(file), &config(indent))?;
    if formatted == source {
        output::success(&format!("OK: {file}"));
        Ok(())
    } else {
        Err(format!("Would reformat: {file}"))
    }
}

/// Format every RAPID file below a directory.
///
/// Without `write`, files that are not formatted are only reported.
/// 格式化目录下的所有 RAPID 文件。
pub fn format_dir(dir: &str, write: bool, indent: usize) -> Result<(), String> {
    let root = Path::new(dir);
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", dir));
    }

    let mut files = Vec::new();
    collect_sources(root, &mut files)?;
    files.sort();
    tracing::debug!(count = files.len(), "collected RAPID sources");

    let config = config(indent);
    let mut pending = 0;
    let mut failed = 0;

    for path in &files {
        let (source, formatted) = match format_file(path, &config) {
            Ok(pair) => pair,
            Err(e) => {
                output::error(&e);
                failed += 1;
                continue;
            }
        };
        if formatted == source {
            continue;
        }
        if write {
            fs::write(path, &formatted)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            output::success(&format!("Formatted: {}", path.display()));
        } else {
            output::warning(&format!("Would reformat: {}", path.display()));
            pending += 1;
        }
    }

    match (pending, failed) {
        (0, 0) => Ok(()),
        (0, n) => Err(format!("{} could not be formatted", output::count(n, "file"))),
        (n, 0) => Err(format!("{} would be reformatted", output::count(n, "file"))),
        (n, m) => Err(format!(
            "{} would be reformatted, {} could not be formatted",
            output::count(n, "file"),
            m
        )),
    }
}

fn is_rapid_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RAPID_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn collect_sources(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = fs::read_dir(dir).map_err(|e| format!("Failed to read directory: {}", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, files)?;
        } else if is_rapid_source(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSY: &str = "MODULE M\nVAR num x;\nPROC Main()\nx:=1;\nENDPROC\nENDMODULE\n";

    #[test]
    fn test_is_rapid_source() {
        assert!(is_rapid_source(Path::new("a/Main.mod")));
        assert!(is_rapid_source(Path::new("SYS.SYS")));
        assert!(!is_rapid_source(Path::new("notes.txt")));
        assert!(!is_rapid_source(Path::new("Makefile")));
    }

    #[test]
    fn test_format_dir_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Main.mod");
        fs::write(&file, MESSY).unwrap();

        let err = format_dir(dir.path().to_str().unwrap(), false, 4).unwrap_err();
        assert!(err.contains("1 file would be reformatted"));
        assert_eq!(fs::read_to_string(&file).unwrap(), MESSY);
    }

    #[test]
    fn test_format_dir_writes_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        let file = dir.path().join("lib").join("Util.sys");
        fs::write(&file, MESSY).unwrap();
        fs::write(dir.path().join("README.txt"), "not rapid").unwrap();

        format_dir(dir.path().to_str().unwrap(), true, 4).unwrap();
        let written = fs::read_to_string(&file).unwrap();
        assert!(written.contains("    x := 1;"));
        assert!(check(file.to_str().unwrap(), 4).is_ok());
    }

    #[test]
    fn test_check_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Main.mod");
        fs::write(&file, MESSY).unwrap();

        let err = check(file.to_str().unwrap(), 4).unwrap_err();
        assert!(err.starts_with("Would reformat"));

        let missing = dir.path().join("none.mod");
        let err = run(missing.to_str().unwrap(), false, 4).unwrap_err();
        assert!(err.starts_with("File not found"));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Bad.mod");
        fs::write(&file, "MODULE M\nVAR num x\nENDMODULE\n").unwrap();

        let err = format_dir(dir.path().to_str().unwrap(), true, 4).unwrap_err();
        assert!(err.contains("could not be formatted"));
    }
}
