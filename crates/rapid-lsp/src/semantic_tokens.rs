//! Semantic token generation for syntax highlighting.
//! 用于语法高亮的语义 token 生成。
//!
//! Encodes [`highlight`](crate::highlight::highlight) output as LSP semantic
//! tokens, refining identifiers with what the symbol index knows about them.
//! 将高亮结果编码为 LSP 语义 token，并借助符号索引细化标识符的类别。

use rapid_common::LineIndex;
use tower_lsp::lsp_types::{
    SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokensLegend,
};

use crate::highlight::{HighlightKind, HighlightToken};
use crate::symbol_index::{SymbolIndex, SymbolKind};

/// Token type indices (must match [`legend`]).
/// Token 类型索引（必须与 [`legend`] 一致）。
pub mod token_types {
    pub const KEYWORD: u32 = 0;
    pub const TYPE: u32 = 1;
    pub const VARIABLE: u32 = 2;
    pub const FUNCTION: u32 = 3;
    pub const PARAMETER: u32 = 4;
    pub const NUMBER: u32 = 5;
    pub const STRING: u32 = 6;
    pub const COMMENT: u32 = 7;
    pub const OPERATOR: u32 = 8;
}

/// Token modifier bit flags.
/// Token 修饰符位标志。
pub mod token_modifiers {
    pub const DECLARATION: u32 = 1 << 0;
    pub const READONLY: u32 = 1 << 1;
}

/// The legend advertised in the server capabilities.
/// 在服务器能力中声明的图例。
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::KEYWORD,
            SemanticTokenType::TYPE,
            SemanticTokenType::VARIABLE,
            SemanticTokenType::FUNCTION,
            SemanticTokenType::PARAMETER,
            SemanticTokenType::NUMBER,
            SemanticTokenType::STRING,
            SemanticTokenType::COMMENT,
            SemanticTokenType::OPERATOR,
        ],
        token_modifiers: vec![
            SemanticTokenModifier::DECLARATION,
            SemanticTokenModifier::READONLY,
        ],
    }
}

/// Delta-encode highlight tokens. Punctuation is not reported.
/// 对高亮 token 进行差分编码，不输出标点。
pub fn generate_semantic_tokens(
    tokens: &[HighlightToken],
    line_index: &LineIndex,
    index: Option<&SymbolIndex>,
) -> Vec<SemanticToken> {
    let mut result = Vec::new();
    let mut prev_line = 0u32;
    let mut prev_col = 0u32;

    for token in tokens {
        let Some((token_type, modifiers)) = classify(token, index) else {
            continue;
        };
        let (line, col) = line_index.to_lsp(token.span.start);
        let length = line_index
            .offset(token.span.end)
            .saturating_sub(line_index.offset(token.span.start)) as u32;

        let delta_line = line - prev_line;
        let delta_start = if delta_line == 0 { col - prev_col } else { col };

        result.push(SemanticToken {
            delta_line,
            delta_start,
            length,
            token_type,
            token_modifiers_bitset: modifiers,
        });

        prev_line = line;
        prev_col = col;
    }

    result
}

fn classify(token: &HighlightToken, index: Option<&SymbolIndex>) -> Option<(u32, u32)> {
    let classified = match token.kind {
        HighlightKind::Keyword => (token_types::KEYWORD, 0),
        HighlightKind::TypeName => (token_types::TYPE, 0),
        HighlightKind::Number => (token_types::NUMBER, 0),
        HighlightKind::String => (token_types::STRING, 0),
        HighlightKind::Comment => (token_types::COMMENT, 0),
        HighlightKind::Operator => (token_types::OPERATOR, 0),
        HighlightKind::Identifier => classify_identifier(token, index),
        HighlightKind::Punctuation => return None,
    };
    Some(classified)
}

fn classify_identifier(token: &HighlightToken, index: Option<&SymbolIndex>) -> (u32, u32) {
    let Some(index) = index else {
        return (token_types::VARIABLE, 0);
    };
    let Some(occurrence) = index
        .references
        .iter()
        .find(|r| r.span.start == token.span.start)
    else {
        return (token_types::VARIABLE, 0);
    };

    let declaration = if occurrence.is_definition {
        token_modifiers::DECLARATION
    } else {
        0
    };
    let Some(symbol) = index.resolve(&occurrence.name, occurrence.span.start) else {
        return (token_types::VARIABLE, declaration);
    };

    match symbol.kind {
        kind if kind.is_routine() => (token_types::FUNCTION, declaration),
        SymbolKind::Record => (token_types::TYPE, declaration),
        SymbolKind::Parameter => (token_types::PARAMETER, declaration),
        SymbolKind::Constant => (
            token_types::VARIABLE,
            declaration | token_modifiers::READONLY,
        ),
        _ => (token_types::VARIABLE, declaration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight;

    #[test]
    fn test_delta_encoding() {
        let source = "VAR num x;\n  x := 1;";
        let tokens = generate_semantic_tokens(&highlight(source), &LineIndex::new(source), None);
        let encoded: Vec<(u32, u32, u32, u32)> = tokens
            .iter()
            .map(|t| (t.delta_line, t.delta_start, t.length, t.token_type))
            .collect();
        assert_eq!(
            encoded,
            vec![
                (0, 0, 3, token_types::KEYWORD),
                (0, 4, 3, token_types::TYPE),
                (0, 4, 1, token_types::VARIABLE),
                (1, 2, 1, token_types::VARIABLE),
                (0, 2, 2, token_types::OPERATOR),
                (0, 3, 1, token_types::NUMBER),
            ]
        );
    }

    #[test]
    fn test_identifiers_use_symbol_kinds() {
        let source = "MODULE M\nCONST num k := 1;\nPROC P(num a)\n  P k;\nENDPROC\nENDMODULE";
        let result = rapid_analysis::analyze(source);
        let index = SymbolIndex::from_program(result.program.as_ref().unwrap());
        let tokens =
            generate_semantic_tokens(&highlight(source), &LineIndex::new(source), Some(&index));

        let types: Vec<(u32, u32)> = tokens
            .iter()
            .filter(|t| t.token_type != token_types::KEYWORD && t.token_type != token_types::OPERATOR)
            .map(|t| (t.token_type, t.token_modifiers_bitset))
            .collect();
        assert_eq!(
            types,
            vec![
                // M
                (token_types::VARIABLE, 0),
                (token_types::TYPE, 0),
                (
                    token_types::VARIABLE,
                    token_modifiers::DECLARATION | token_modifiers::READONLY
                ),
                (token_types::NUMBER, 0),
                (token_types::FUNCTION, token_modifiers::DECLARATION),
                (token_types::TYPE, 0),
                (token_types::PARAMETER, token_modifiers::DECLARATION),
                (token_types::FUNCTION, 0),
                (token_types::VARIABLE, token_modifiers::READONLY),
            ]
        );
    }
}
