//! The `rapid ast` command.

use super::{load, report};

/// Print the syntax tree of a file as JSON.
pub fn run(file: &str) -> Result<(), String> {
    let (source, result) = load(file)?;

    let Some(program) = &result.program else {
        report(&source, file, &result)?;
        return Err("the file has syntax errors".to_string());
    };

    let text = serde_json::to_string_pretty(program)
        .map_err(|e| format!("cannot serialize syntax tree: {}", e))?;
    println!("{}", text);
    Ok(())
}
