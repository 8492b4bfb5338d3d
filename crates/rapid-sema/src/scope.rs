//! Lexical scopes and symbols.

use std::collections::HashMap;

use rapid_common::Span;
use rapid_syntax::{FuncDecl, Ident, Param, ProcDecl, RecordDecl, TrapDecl, VarDecl};

/// The declaration a symbol was introduced by.
#[derive(Debug, Clone, Copy)]
pub enum SymbolDecl<'a> {
    Var(&'a VarDecl),
    Param(&'a Param),
    Proc(&'a ProcDecl),
    Func(&'a FuncDecl),
    Record(&'a RecordDecl),
    Trap(&'a TrapDecl),
    LoopVar(&'a Ident),
    Builtin,
}

/// A named entity visible in a scope.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    pub name: String,
    /// Type name; `None` for procedures and traps.
    pub ty: Option<String>,
    pub is_const: bool,
    pub decl: SymbolDecl<'a>,
    /// Where the name was written; `None` for built-ins.
    pub span: Option<Span>,
}

impl<'a> Symbol<'a> {
    pub fn new(name: &Ident, ty: Option<String>, decl: SymbolDecl<'a>) -> Self {
        Self {
            name: name.name.clone(),
            ty,
            is_const: false,
            decl,
            span: Some(name.span),
        }
    }

    pub fn builtin(name: &str, ty: Option<&str>, is_const: bool) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.map(str::to_string),
            is_const,
            decl: SymbolDecl::Builtin,
            span: None,
        }
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    pub fn is_record(&self) -> bool {
        matches!(self.decl, SymbolDecl::Record(_))
    }

    pub fn is_trap(&self) -> bool {
        matches!(self.decl, SymbolDecl::Trap(_))
    }
}

/// A symbol table linked to its enclosing scope.
#[derive(Debug, Default)]
pub struct Scope<'p, 'a> {
    symbols: HashMap<String, Symbol<'a>>,
    parent: Option<&'p Scope<'p, 'a>>,
}

impl<'p, 'a> Scope<'p, 'a> {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            parent: None,
        }
    }

    pub fn child(parent: &'p Scope<'p, 'a>) -> Self {
        Self {
            symbols: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Define a symbol. Returns false, leaving the table untouched, when the
    /// name already exists in this scope.
    pub fn define(&mut self, symbol: Symbol<'a>) -> bool {
        if self.symbols.contains_key(&symbol.name) {
            return false;
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        true
    }

    /// Look a name up in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol<'a>> {
        self.symbols.get(name)
    }

    /// Look a name up here and then in every enclosing scope.
    pub fn resolve(&self, name: &str) -> Option<&Symbol<'a>> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(symbol) = current.symbols.get(name) {
                return Some(symbol);
            }
            scope = current.parent;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
