//! The `rapid check` command.
//! `rapid check` 命令。

use serde_json::json;

use super::{load, report};
use crate::output;

/// Analyze a RAPID file and report its diagnostics.
/// 分析 RAPID 文件并报告诊断信息。
pub fn run(file: &str, json: bool, verbose: bool) -> Result<(), String> {
    let (source, result) = load(file)?;
    let errors = result.errors().count();
    let warnings = result.warnings().count();

    if json {
        let report = json!({
            "file": file,
            "errors": errors,
            "warnings": warnings,
            "diagnostics": result.diagnostics,
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize diagnostics: {}", e))?;
        println!("{}", text);
    } else {
        report(&source, file, &result)?;

        if verbose {
            if let Some(program) = &result.program {
                output::info(&format!("Parsed {}", output::count(program.modules.len(), "module")));
            }
        }
    }

    if errors > 0 {
        return Err(format!(
            "{}, {} found",
            output::count(errors, "error"),
            output::count(warnings, "warning")
        ));
    }

    if !json {
        if warnings > 0 {
            output::warning(&format!("{} found", output::count(warnings, "warning")));
        } else {
            output::success("OK - No errors found");
        }
    }
    Ok(())
}
