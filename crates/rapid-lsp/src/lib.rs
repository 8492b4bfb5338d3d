//! Language Server Protocol implementation for RAPID.
//! RAPID 的语言服务器协议实现。
//!
//! The IDE-facing pieces are plain functions over source text so they can be
//! used without a server:
//! 面向 IDE 的功能都是作用于源码的普通函数，无需服务器即可使用：
//!
//! - [`symbol_index`]: definitions and name occurrences / 定义与名称出现位置
//! - [`completion`]: completion candidates / 补全候选
//! - [`navigator`]: go to definition / 跳转到定义
//! - [`highlight`] and [`semantic_tokens`]: highlighting / 语法高亮
//!
//! [`Backend`] wires them into a tower-lsp server together with diagnostics,
//! hover, document symbols and formatting.
//! [`Backend`] 将它们与诊断、悬停、文档符号和格式化一起接入 tower-lsp 服务器。

mod backend;
mod capabilities;

pub mod completion;
pub mod document;
pub mod highlight;
pub mod navigator;
pub mod semantic_tokens;
pub mod symbol_index;

pub use backend::Backend;
pub use completion::{CompletionItem, CompletionKind};
pub use document::Document;
pub use highlight::{HighlightKind, HighlightToken};
pub use navigator::{DefinitionResult, find_definition};
pub use symbol_index::{Symbol, SymbolIndex, SymbolKind, SymbolRef};

use tower_lsp::{LspService, Server};

/// Run the LSP server over stdio.
/// 通过标准输入输出运行 LSP 服务器。
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
