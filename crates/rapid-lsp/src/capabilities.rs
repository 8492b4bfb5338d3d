//! What the RAPID language server advertises during `initialize`.

use tower_lsp::lsp_types::*;

use crate::semantic_tokens::legend;

/// Capabilities returned from `initialize`.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(sync_options())),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        completion_provider: Some(completion_options()),
        definition_provider: Some(OneOf::Left(true)),
        references_provider: Some(OneOf::Left(true)),
        document_symbol_provider: Some(OneOf::Left(true)),
        document_formatting_provider: Some(OneOf::Left(true)),
        semantic_tokens_provider: Some(
            SemanticTokensServerCapabilities::SemanticTokensOptions(semantic_token_options()),
        ),
        ..Default::default()
    }
}

/// Every edit resends the whole module; saves carry the text as well.
fn sync_options() -> TextDocumentSyncOptions {
    TextDocumentSyncOptions {
        open_close: Some(true),
        change: Some(TextDocumentSyncKind::FULL),
        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
            include_text: Some(true),
        })),
        ..Default::default()
    }
}

/// `.` starts a component access such as `pHome.trans`.
fn completion_options() -> CompletionOptions {
    CompletionOptions {
        trigger_characters: Some(vec![".".to_string()]),
        resolve_provider: Some(false),
        ..Default::default()
    }
}

fn semantic_token_options() -> SemanticTokensOptions {
    SemanticTokensOptions {
        legend: legend(),
        range: Some(false),
        full: Some(SemanticTokensFullOptions::Bool(true)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sync_and_dot_trigger() {
        let caps = server_capabilities();
        let Some(TextDocumentSyncCapability::Options(sync)) = caps.text_document_sync else {
            panic!("expected sync options");
        };
        assert_eq!(sync.change, Some(TextDocumentSyncKind::FULL));
        let triggers = caps.completion_provider.and_then(|c| c.trigger_characters);
        assert_eq!(triggers, Some(vec![".".to_string()]));
        assert_eq!(caps.definition_provider, Some(OneOf::Left(true)));
        assert_eq!(caps.references_provider, Some(OneOf::Left(true)));
        assert_eq!(caps.document_symbol_provider, Some(OneOf::Left(true)));
        assert_eq!(caps.document_formatting_provider, Some(OneOf::Left(true)));
    }
}
