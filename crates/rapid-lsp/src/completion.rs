//! Completion candidates.
//! 补全候选项。

use std::collections::HashSet;

use rapid_common::Position;
use rapid_sema::types::{BUILTIN_ROUTINES, BUILTIN_TYPES, PREDEFINED_DATA};

use crate::symbol_index::{SymbolIndex, SymbolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Keyword,
    Type,
    Variable,
    Function,
    Record,
    Snippet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub insert_text: String,
    pub detail: Option<String>,
}

impl CompletionItem {
    fn new(label: &str, kind: CompletionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            insert_text: label.to_string(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

const KEYWORDS: &[&str] = &[
    "MODULE", "ENDMODULE", "PROC", "ENDPROC", "FUNC", "ENDFUNC", "TRAP", "ENDTRAP", "RECORD",
    "ENDRECORD", "VAR", "PERS", "CONST", "IF", "THEN", "ELSEIF", "ELSE", "ENDIF", "FOR", "FROM",
    "TO", "ENDFOR", "WHILE", "ENDWHILE", "TEST", "CASE", "DEFAULT", "ENDTEST", "CONNECT", "WITH",
    "RAISE", "RETURN", "AND", "OR", "NOT", "TRUE", "FALSE", "MoveJ", "MoveL", "MoveC",
];

/// `(label, insert text)`.
const SNIPPETS: &[(&str, &str)] = &[
    ("IF ... THEN ... ENDIF", "IF  THEN\n    \nENDIF"),
    ("WHILE ... ENDWHILE", "WHILE \n    \nENDWHILE"),
    ("FOR i FROM 1 TO 10 ... ENDFOR", "FOR i FROM 1 TO 10\n    \nENDFOR"),
    ("TEST ... CASE ... ENDTEST", "TEST \n    CASE :\n        \nENDTEST"),
    ("PROC main() ... ENDPROC", "PROC main()\n    \nENDPROC"),
    ("FUNC num MyFunc() ... ENDFUNC", "FUNC num MyFunc()\n    RETURN 0;\nENDFUNC"),
    ("RECORD ... ENDRECORD", "RECORD \n    num ;\nENDRECORD"),
];

/// Analyze `source` and suggest completions at `pos`.
/// 分析 `source` 并给出 `pos` 处的补全建议。
pub fn suggest(source: &str, pos: Position) -> Vec<CompletionItem> {
    let result = rapid_analysis::analyze(source);
    let index = result.program.as_ref().map(SymbolIndex::from_program);
    complete(index.as_ref(), source, pos)
}

/// Completions at `pos` using an existing symbol index.
///
/// Candidates are keywords, built-in types, declared symbols visible at
/// `pos`, built-in routines and data, then snippets, filtered by the word
/// before the cursor and de-duplicated by label.
pub fn complete(index: Option<&SymbolIndex>, source: &str, pos: Position) -> Vec<CompletionItem> {
    let prefix = prefix_at(source, pos);
    let starts = |label: &str| match &prefix {
        Some(prefix) => label.to_lowercase().starts_with(&prefix.to_lowercase()),
        None => true,
    };

    let mut items = Vec::new();

    for keyword in KEYWORDS.iter().filter(|k| starts(k)) {
        items.push(CompletionItem::new(keyword, CompletionKind::Keyword));
    }
    for ty in BUILTIN_TYPES.iter().filter(|t| starts(t)) {
        items.push(CompletionItem::new(ty, CompletionKind::Type).with_detail("built-in type"));
    }

    if let Some(index) = index {
        let symbols = index
            .definitions_with_prefix(prefix.as_deref().unwrap_or(""))
            .into_iter()
            .filter(|s| s.is_visible_at(pos));
        for symbol in symbols {
            let kind = match symbol.kind {
                kind if kind.is_routine() => CompletionKind::Function,
                SymbolKind::Record => CompletionKind::Record,
                _ => CompletionKind::Variable,
            };
            items.push(CompletionItem::new(&symbol.name, kind).with_detail(symbol.detail.clone()));
        }
    }

    for (name, ret) in BUILTIN_ROUTINES.iter().filter(|(n, _)| starts(n)) {
        let detail = match ret {
            Some(ty) => format!("built-in function -> {}", ty),
            None => "built-in procedure".to_string(),
        };
        items.push(CompletionItem::new(name, CompletionKind::Function).with_detail(detail));
    }
    for (name, ty) in PREDEFINED_DATA.iter().filter(|(n, _)| starts(n)) {
        items.push(CompletionItem::new(name, CompletionKind::Variable).with_detail(*ty));
    }

    let contains = |label: &str| match &prefix {
        Some(prefix) => label.to_uppercase().contains(&prefix.to_uppercase()),
        None => true,
    };
    for (label, text) in SNIPPETS.iter().filter(|(l, _)| contains(l)) {
        items.push(CompletionItem {
            label: label.to_string(),
            kind: CompletionKind::Snippet,
            insert_text: text.to_string(),
            detail: None,
        });
    }

    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.label.clone()));
    items
}

/// The identifier characters directly before `pos` on its line.
/// `pos` 所在行中紧邻其前的标识符字符。
pub fn prefix_at(source: &str, pos: Position) -> Option<String> {
    let line = source.split('\n').nth(pos.line.checked_sub(1)? as usize)?;
    let chars: Vec<char> = line.chars().collect();
    let end = (pos.col.max(1) as usize - 1).min(chars.len());

    let mut start = end;
    while start > 0 && (chars[start - 1].is_alphanumeric() || chars[start - 1] == '_') {
        start -= 1;
    }
    if start == end {
        return None;
    }
    Some(chars[start..end].iter().collect())
}
