//! The `rapid symbols` command.
//! `rapid symbols` 命令。

use rapid_lsp::SymbolIndex;

use super::{load, report};

/// List every declaration in a file with its position.
/// 列出文件中的每个声明及其位置。
pub fn run(file: &str) -> Result<(), String> {
    let (source, result) = load(file)?;

    let Some(program) = &result.program else {
        report(&source, file, &result)?;
        return Err("the file has syntax errors".to_string());
    };

    let index = SymbolIndex::from_program(program);
    for symbol in index.symbols() {
        let indent = if symbol.scope.is_some() { "  " } else { "" };
        println!(
            "{:>5}  {:<14} {}{}",
            symbol.def_span.start.to_string(),
            symbol.kind.describe(),
            indent,
            symbol.detail
        );
    }
    Ok(())
}
