//! Top-level AST definitions.
//! 顶层 AST 定义。

use crate::{Expr, Stmt};
use rapid_common::Span;
use serde::Serialize;

/// A complete source text: zero or more modules.
/// 完整的源文本：零个或多个模块。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub modules: Vec<Module>,
    pub span: Span,
}

/// `MODULE name ... ENDMODULE`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub name: Ident,
    pub decls: Vec<Decl>,
    pub span: Span,
}

/// A name together with the span it was written at.
/// 名称及其在源码中的位置。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A module-level declaration.
/// 模块级声明。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

impl Decl {
    pub fn new(kind: DeclKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The declared name.
    pub fn name(&self) -> &Ident {
        match &self.kind {
            DeclKind::Var(v) => &v.name,
            DeclKind::Proc(p) => &p.name,
            DeclKind::Func(f) => &f.name,
            DeclKind::Record(r) => &r.name,
            DeclKind::Trap(t) => &t.name,
        }
    }
}

/// Kind of module-level declaration.
/// 模块级声明的类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclKind {
    /// `VAR num x := 1;` / 数据声明
    Var(VarDecl),
    /// `PROC name(...) ... ENDPROC` / 过程
    Proc(ProcDecl),
    /// `FUNC type name(...) ... ENDFUNC` / 函数
    Func(FuncDecl),
    /// `RECORD name ... ENDRECORD` / 记录类型
    Record(RecordDecl),
    /// `TRAP name ... ENDTRAP` / 中断处理例程
    Trap(TrapDecl),
}

/// Storage class of a data declaration.
/// 数据声明的存储类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Storage {
    Var,
    Pers,
    Const,
}

impl Storage {
    pub fn keyword(self) -> &'static str {
        match self {
            Storage::Var => "VAR",
            Storage::Pers => "PERS",
            Storage::Const => "CONST",
        }
    }
}

/// A data declaration, either at module level or inside a routine.
/// 数据声明（模块级或例程内）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub storage: Storage,
    pub ty: Ident,
    pub name: Ident,
    pub init: Option<Expr>,
}

impl VarDecl {
    pub fn is_const(&self) -> bool {
        self.storage == Storage::Const
    }
}

/// Parameter passing mode.
/// 参数传递方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamMode {
    /// Passed by value.
    In,
    InOut,
    Var,
    Pers,
}

impl ParamMode {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            ParamMode::In => None,
            ParamMode::InOut => Some("INOUT"),
            ParamMode::Var => Some("VAR"),
            ParamMode::Pers => Some("PERS"),
        }
    }
}

/// A routine parameter.
/// 例程参数。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub mode: ParamMode,
    pub ty: Ident,
    pub name: Ident,
    pub span: Span,
}

impl Param {
    pub fn by_ref(&self) -> bool {
        self.mode != ParamMode::In
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncDecl {
    pub return_ty: Ident,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDecl {
    pub name: Ident,
    pub fields: Vec<RecordField>,
}

impl RecordDecl {
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.name.name == name)
    }
}

/// A record component: `num x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordField {
    pub ty: Ident,
    pub name: Ident,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapDecl {
    pub name: Ident,
    pub body: Vec<Stmt>,
}
