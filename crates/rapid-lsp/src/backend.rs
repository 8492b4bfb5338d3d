//! LSP backend implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use rapid_common::Span;
use rapid_diagnostic::Severity;
use rapid_fmt::FormatConfig;
use rapid_lexer::{Lexer, TokenKind};
use rapid_sema::types::{BUILTIN_ROUTINES, PREDEFINED_DATA, builtin_type};
use rapid_syntax::{Decl, DeclKind, Module};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::capabilities::server_capabilities;
use crate::completion::{self, CompletionKind};
use crate::document::Document;
use crate::highlight::highlight;
use crate::semantic_tokens::generate_semantic_tokens;

/// The LSP backend.
pub struct Backend {
    client: Client,
    documents: DashMap<String, Document>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: DashMap::new(),
        }
    }

    /// Store a document version and publish its diagnostics.
    async fn open_or_update(&self, uri: Url, text: String) {
        let key = uri.to_string();
        let diagnostics = match self.documents.get_mut(&key) {
            Some(mut doc) => {
                doc.update(text);
                lsp_diagnostics(&uri, &doc)
            }
            None => {
                let doc = Document::new(key.clone(), text);
                let diagnostics = lsp_diagnostics(&uri, &doc);
                self.documents.insert(key, doc);
                diagnostics
            }
        };
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}

#[async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "rapid-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "RAPID language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.open_or_update(params.text_document.uri, params.text_document.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.open_or_update(params.text_document.uri, change.text).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(text) = params.text {
            self.open_or_update(params.text_document.uri, text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri.to_string());

        // Clear diagnostics
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri.to_string();
        let pos = params.text_document_position_params.position;
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };
        let pos = doc.position(pos.line, pos.character);

        if let Some(symbol) = doc
            .symbol_index
            .as_ref()
            .and_then(|index| index.find_definition_at(pos))
        {
            let text = format!(
                "**{}** `{}`\n\n```rapid\n{}\n```",
                symbol.kind.describe(),
                symbol.name,
                symbol.detail
            );
            return Ok(Some(markdown_hover(&doc, text, symbol.def_span)));
        }

        // Built-in names under the cursor
        let (tokens, _) = Lexer::new(&doc.content).tokenize();
        let Some(token) = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Ident && t.span.contains(pos))
        else {
            return Ok(None);
        };
        let text = if let Some(ty) = builtin_type(&token.text) {
            format!("**built-in type** `{}`", ty)
        } else if let Some((name, ret)) = BUILTIN_ROUTINES.iter().find(|(n, _)| *n == token.text) {
            match ret {
                Some(ty) => format!("**built-in function** `{}` → `{}`", name, ty),
                None => format!("**built-in procedure** `{}`", name),
            }
        } else if let Some((name, ty)) = PREDEFINED_DATA.iter().find(|(n, _)| *n == token.text) {
            format!("**predefined data** `{}`: `{}`", name, ty)
        } else {
            return Ok(None);
        };
        Ok(Some(markdown_hover(&doc, text, token.span)))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri.to_string();
        let pos = params.text_document_position.position;
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };
        let pos = doc.position(pos.line, pos.character);

        let items = completion::complete(doc.symbol_index.as_ref(), &doc.content, pos)
            .into_iter()
            .map(|item| CompletionItem {
                label: item.label,
                kind: Some(match item.kind {
                    CompletionKind::Keyword => CompletionItemKind::KEYWORD,
                    CompletionKind::Type => CompletionItemKind::CLASS,
                    CompletionKind::Variable => CompletionItemKind::VARIABLE,
                    CompletionKind::Function => CompletionItemKind::FUNCTION,
                    CompletionKind::Record => CompletionItemKind::STRUCT,
                    CompletionKind::Snippet => CompletionItemKind::SNIPPET,
                }),
                detail: item.detail,
                insert_text: Some(item.insert_text),
                insert_text_format: Some(InsertTextFormat::PLAIN_TEXT),
                ..Default::default()
            })
            .collect();

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        let Some(doc) = self.documents.get(&uri.to_string()) else {
            return Ok(None);
        };
        let pos = doc.position(pos.line, pos.character);

        let location = doc
            .symbol_index
            .as_ref()
            .and_then(|index| index.find_definition_at(pos))
            .map(|symbol| Location {
                uri: uri.clone(),
                range: lsp_range(&doc, symbol.def_span),
            });
        Ok(location.map(GotoDefinitionResponse::Scalar))
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        let Some(doc) = self.documents.get(&uri.to_string()) else {
            return Ok(None);
        };
        let Some(index) = doc.symbol_index.as_ref() else {
            return Ok(None);
        };
        let pos = doc.position(pos.line, pos.character);

        let locations: Vec<Location> = index
            .find_references_at(pos, params.context.include_declaration)
            .into_iter()
            .map(|r| Location {
                uri: uri.clone(),
                range: lsp_range(&doc, r.span),
            })
            .collect();

        if locations.is_empty() {
            Ok(None)
        } else {
            Ok(Some(locations))
        }
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri.to_string();
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };

        let config =
            FormatConfig::for_editor(params.options.tab_size, params.options.insert_spaces);
        let formatted = match rapid_fmt::format_with_config(&doc.content, &config) {
            Ok(formatted) => formatted,
            Err(err) => {
                tracing::debug!(%err, "formatting skipped");
                return Ok(None);
            }
        };
        if formatted == doc.content {
            return Ok(None);
        }

        let end = doc.line_index.to_lsp(doc.line_index.end_position());
        Ok(Some(vec![TextEdit {
            range: Range {
                start: Position::new(0, 0),
                end: Position::new(end.0, end.1),
            },
            new_text: formatted,
        }]))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri.to_string();
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };
        let Some(program) = doc.analysis.program.as_ref() else {
            return Ok(None);
        };

        let symbols = program
            .modules
            .iter()
            .map(|module| module_symbol(&doc, module))
            .collect();
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri.to_string();
        let Some(doc) = self.documents.get(&uri) else {
            return Ok(None);
        };

        let data = generate_semantic_tokens(
            &highlight(&doc.content),
            &doc.line_index,
            doc.symbol_index.as_ref(),
        );
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data,
        })))
    }
}

fn lsp_range(doc: &Document, span: Span) -> Range {
    let ((start_line, start_col), (end_line, end_col)) = doc.lsp_range(span);
    Range {
        start: Position::new(start_line, start_col),
        end: Position::new(end_line, end_col),
    }
}

fn markdown_hover(doc: &Document, value: String, span: Span) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(lsp_range(doc, span)),
    }
}

fn lsp_diagnostics(uri: &Url, doc: &Document) -> Vec<Diagnostic> {
    doc.analysis
        .diagnostics
        .iter()
        .map(|d| {
            let mut message = d.message.clone();
            if let Some(help) = &d.help {
                message.push_str("\nhelp: ");
                message.push_str(help);
            }
            let related: Vec<DiagnosticRelatedInformation> = d
                .labels
                .iter()
                .map(|label| DiagnosticRelatedInformation {
                    location: Location {
                        uri: uri.clone(),
                        range: lsp_range(doc, label.span),
                    },
                    message: label.message.clone(),
                })
                .collect();

            Diagnostic {
                range: lsp_range(doc, d.span),
                severity: Some(match d.severity {
                    Severity::Error => DiagnosticSeverity::ERROR,
                    Severity::Warning => DiagnosticSeverity::WARNING,
                    Severity::Info => DiagnosticSeverity::INFORMATION,
                }),
                code: d
                    .code
                    .map(|code| NumberOrString::String(code.as_str().to_string())),
                code_description: None,
                source: Some("rapid".to_string()),
                message,
                related_information: (!related.is_empty()).then_some(related),
                tags: None,
                data: None,
            }
        })
        .collect()
}

#[allow(deprecated)]
fn module_symbol(doc: &Document, module: &Module) -> DocumentSymbol {
    DocumentSymbol {
        name: module.name.name.clone(),
        detail: None,
        kind: SymbolKind::MODULE,
        tags: None,
        deprecated: None,
        range: lsp_range(doc, module.span),
        selection_range: lsp_range(doc, module.name.span),
        children: Some(module.decls.iter().map(|d| decl_symbol(doc, d)).collect()),
    }
}

#[allow(deprecated)]
fn decl_symbol(doc: &Document, decl: &Decl) -> DocumentSymbol {
    let name = decl.name();
    let (kind, children) = match &decl.kind {
        DeclKind::Var(var) if var.is_const() => (SymbolKind::CONSTANT, None),
        DeclKind::Var(_) => (SymbolKind::VARIABLE, None),
        DeclKind::Proc(_) => (SymbolKind::FUNCTION, None),
        DeclKind::Func(_) => (SymbolKind::FUNCTION, None),
        DeclKind::Trap(_) => (SymbolKind::EVENT, None),
        DeclKind::Record(record) => {
            let fields = record
                .fields
                .iter()
                .map(|field| DocumentSymbol {
                    name: field.name.name.clone(),
                    detail: Some(field.ty.name.clone()),
                    kind: SymbolKind::FIELD,
                    tags: None,
                    deprecated: None,
                    range: lsp_range(doc, field.span),
                    selection_range: lsp_range(doc, field.name.span),
                    children: None,
                })
                .collect();
            (SymbolKind::STRUCT, Some(fields))
        }
    };
    let detail = doc
        .symbol_index
        .as_ref()
        .and_then(|index| index.resolve(&name.name, name.span.start))
        .filter(|symbol| symbol.def_span == name.span)
        .map(|symbol| format!("{} · {}", symbol.kind.describe(), symbol.detail));

    DocumentSymbol {
        name: name.name.clone(),
        detail,
        kind,
        tags: None,
        deprecated: None,
        range: lsp_range(doc, decl.span),
        selection_range: lsp_range(doc, name.span),
        children,
    }
}

