//! Statement AST nodes.
//! 语句 AST 节点。

use crate::{Expr, Ident, VarDecl};
use rapid_common::Span;
use serde::Serialize;

/// A statement.
/// 语句。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kind.
/// 语句类型。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// Nested statement list with its own scope / 语句块
    Block(Vec<Stmt>),
    /// `target := value;` / 赋值
    Assign { target: Expr, value: Expr },
    /// `expr;` and procedure calls / 表达式语句
    Expr(Expr),
    /// `IF c THEN ... ELSEIF c THEN ... ELSE ... ENDIF`
    If {
        branches: Vec<IfBranch>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `WHILE c ... ENDWHILE`
    While { cond: Expr, body: Vec<Stmt> },
    /// `FOR i FROM a TO b ... ENDFOR`
    For {
        var: Ident,
        from: Expr,
        to: Expr,
        body: Vec<Stmt>,
    },
    /// `RETURN [expr];`
    Return(Option<Expr>),
    /// `MoveJ|MoveL|MoveC target, speed, zone, tool [\WObj:=wobj];`
    Move(MoveStmt),
    /// `TEST subject CASE ... DEFAULT ... ENDTEST`
    Test {
        subject: Expr,
        cases: Vec<TestCase>,
        default: Option<Vec<Stmt>>,
    },
    /// `CONNECT trap WITH error;`
    Connect { trap: Ident, error: Ident },
    /// `RAISE error;`
    Raise(Ident),
    /// Routine-local data declaration / 例程内数据声明
    Local(VarDecl),
}

/// One `IF`/`ELSEIF` branch. The span runs from the keyword to the end of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfBranch {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// One `CASE v1, v2:` arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub values: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveKind {
    Joint,
    Linear,
    Circular,
}

impl MoveKind {
    pub fn instruction(self) -> &'static str {
        match self {
            MoveKind::Joint => "MoveJ",
            MoveKind::Linear => "MoveL",
            MoveKind::Circular => "MoveC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveStmt {
    pub kind: MoveKind,
    pub target: Expr,
    pub speed: Expr,
    pub zone: Expr,
    pub tool: Expr,
    pub wobj: Option<Expr>,
}
