//! The `rapid lsp` command.

/// Serve the language server protocol on stdin/stdout until the client exits.
pub fn run() -> Result<(), String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("cannot start async runtime: {}", e))?;
    tracing::info!("starting language server on stdio");
    runtime.block_on(rapid_lsp::run_server());
    Ok(())
}
