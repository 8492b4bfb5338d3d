//! Symbol indexing for go-to-definition, references and completion.

use std::collections::HashMap;

use rapid_common::{Position, Span};
use rapid_syntax::*;

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Data,
    Constant,
    Procedure,
    Function,
    Trap,
    Record,
    Parameter,
    LocalData,
    LoopVariable,
}

impl SymbolKind {
    pub fn describe(self) -> &'static str {
        match self {
            SymbolKind::Data => "data",
            SymbolKind::Constant => "constant",
            SymbolKind::Procedure => "procedure",
            SymbolKind::Function => "function",
            SymbolKind::Trap => "trap",
            SymbolKind::Record => "record",
            SymbolKind::Parameter => "parameter",
            SymbolKind::LocalData => "local data",
            SymbolKind::LoopVariable => "loop variable",
        }
    }

    pub fn is_routine(self) -> bool {
        matches!(
            self,
            SymbolKind::Procedure | SymbolKind::Function | SymbolKind::Trap
        )
    }
}

/// A symbol definition.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Span of the defining name.
    pub def_span: Span,
    /// Span of the whole declaration.
    pub full_span: Span,
    /// Region the symbol is visible in; `None` for module-level symbols.
    pub scope: Option<Span>,
    /// One-line signature, e.g. `PERS num count`.
    pub detail: String,
}

impl Symbol {
    pub fn is_visible_at(&self, pos: Position) -> bool {
        self.scope.is_none_or(|scope| scope.contains(pos))
    }
}

/// An occurrence of a name.
#[derive(Debug, Clone)]
pub struct SymbolRef {
    pub name: String,
    pub span: Span,
    /// Whether this occurrence is the name in a declaration.
    pub is_definition: bool,
}

/// Index of all definitions and name occurrences in a program.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// All symbol definitions, keyed by name, in source order.
    pub definitions: HashMap<String, Vec<Symbol>>,
    /// All name occurrences, sorted by position.
    pub references: Vec<SymbolRef>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a symbol index from a syntax tree.
    pub fn from_program(program: &Program) -> Self {
        let mut index = Self::new();
        for module in &program.modules {
            for decl in &module.decls {
                index.define_module_decl(decl);
            }
        }
        for module in &program.modules {
            for decl in &module.decls {
                index.index_decl(decl);
            }
        }
        index.references.sort_by_key(|r| r.span.start);
        index
    }

    /// The name occurrence under a position.
    pub fn occurrence_at(&self, pos: Position) -> Option<&SymbolRef> {
        self.references
            .iter()
            .find(|r| r.span.start <= pos && pos < r.span.end)
            .or_else(|| self.references.iter().find(|r| r.span.contains(pos)))
    }

    /// The definition a name refers to when written at `at`: the innermost
    /// enclosing local definition, otherwise the first module-level one.
    pub fn resolve(&self, name: &str, at: Position) -> Option<&Symbol> {
        let defs = self.definitions.get(name)?;
        defs.iter()
            .filter(|s| s.scope.is_some_and(|scope| scope.contains(at)))
            .max_by_key(|s| s.scope.map(|scope| scope.start))
            .or_else(|| defs.iter().find(|s| s.scope.is_none()))
    }

    /// Find the definition of the symbol at the given position.
    pub fn find_definition_at(&self, pos: Position) -> Option<&Symbol> {
        let occurrence = self.occurrence_at(pos)?;
        self.resolve(&occurrence.name, occurrence.span.start)
    }

    /// Find all occurrences bound to the same definition as the name at `pos`.
    pub fn find_references_at(&self, pos: Position, include_declaration: bool) -> Vec<&SymbolRef> {
        let Some(occurrence) = self.occurrence_at(pos) else {
            return Vec::new();
        };
        let target = self
            .resolve(&occurrence.name, occurrence.span.start)
            .map(|s| s.def_span);

        self.references
            .iter()
            .filter(|r| r.name == occurrence.name)
            .filter(|r| include_declaration || !r.is_definition)
            .filter(|r| self.resolve(&r.name, r.span.start).map(|s| s.def_span) == target)
            .collect()
    }

    /// Definitions whose name starts with `prefix`, ignoring case.
    pub fn definitions_with_prefix(&self, prefix: &str) -> Vec<&Symbol> {
        let prefix = prefix.to_lowercase();
        let mut symbols: Vec<&Symbol> = self
            .definitions
            .values()
            .flatten()
            .filter(|s| s.name.to_lowercase().starts_with(&prefix))
            .collect();
        symbols.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then(a.def_span.start.cmp(&b.def_span.start))
        });
        symbols
    }

    /// Every definition in source order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.definitions.values().flatten().collect();
        symbols.sort_by_key(|s| s.def_span.start);
        symbols
    }

    // ========== Indexing ==========

    fn define(
        &mut self,
        name: &Ident,
        kind: SymbolKind,
        full_span: Span,
        scope: Option<Span>,
        detail: String,
    ) {
        self.references.push(SymbolRef {
            name: name.name.clone(),
            span: name.span,
            is_definition: true,
        });
        self.definitions
            .entry(name.name.clone())
            .or_default()
            .push(Symbol {
                name: name.name.clone(),
                kind,
                def_span: name.span,
                full_span,
                scope,
                detail,
            });
    }

    fn reference(&mut self, name: &Ident) {
        self.references.push(SymbolRef {
            name: name.name.clone(),
            span: name.span,
            is_definition: false,
        });
    }

    fn define_module_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Var(var) => {
                let kind = if var.is_const() {
                    SymbolKind::Constant
                } else {
                    SymbolKind::Data
                };
                self.define(&var.name, kind, decl.span, None, var_signature(var));
            }
            DeclKind::Proc(proc) => {
                let detail = format!("PROC {}({})", proc.name.name, param_list(&proc.params));
                self.define(&proc.name, SymbolKind::Procedure, decl.span, None, detail);
            }
            DeclKind::Func(func) => {
                let detail = format!(
                    "FUNC {} {}({})",
                    func.return_ty.name,
                    func.name.name,
                    param_list(&func.params)
                );
                self.define(&func.name, SymbolKind::Function, decl.span, None, detail);
            }
            DeclKind::Trap(trap) => {
                let detail = format!("TRAP {}", trap.name.name);
                self.define(&trap.name, SymbolKind::Trap, decl.span, None, detail);
            }
            DeclKind::Record(record) => {
                let detail = format!("RECORD {}", record.name.name);
                self.define(&record.name, SymbolKind::Record, decl.span, None, detail);
            }
        }
    }

    fn index_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Var(var) => {
                self.reference(&var.ty);
                if let Some(init) = &var.init {
                    self.index_expr(init);
                }
            }
            DeclKind::Proc(proc) => self.index_routine(&proc.params, &proc.body, decl.span),
            DeclKind::Func(func) => {
                self.reference(&func.return_ty);
                self.index_routine(&func.params, &func.body, decl.span);
            }
            DeclKind::Trap(trap) => self.index_routine(&[], &trap.body, decl.span),
            DeclKind::Record(record) => {
                for field in &record.fields {
                    self.reference(&field.ty);
                }
            }
        }
    }

    fn index_routine(&mut self, params: &[Param], body: &[Stmt], scope: Span) {
        for param in params {
            self.reference(&param.ty);
            self.define(
                &param.name,
                SymbolKind::Parameter,
                param.span,
                Some(scope),
                param_signature(param),
            );
        }
        self.index_body(body, scope);
    }

    fn index_body(&mut self, body: &[Stmt], scope: Span) {
        for stmt in body {
            self.index_stmt(stmt, scope);
        }
    }

    /// A nested body's locals are visible from its first statement to its last.
    fn index_block(&mut self, body: &[Stmt]) {
        if let (Some(first), Some(last)) = (body.first(), body.last()) {
            self.index_body(body, first.span.merge(last.span));
        }
    }

    fn index_stmt(&mut self, stmt: &Stmt, scope: Span) {
        match &stmt.kind {
            StmtKind::Block(stmts) => self.index_body(stmts, stmt.span),
            StmtKind::Assign { target, value } => {
                self.index_expr(target);
                self.index_expr(value);
            }
            StmtKind::Expr(expr) => self.index_expr(expr),
            StmtKind::If {
                branches,
                else_body,
            } => {
                for branch in branches {
                    self.index_expr(&branch.cond);
                    self.index_block(&branch.body);
                }
                if let Some(body) = else_body {
                    self.index_block(body);
                }
            }
            StmtKind::While { cond, body } => {
                self.index_expr(cond);
                self.index_block(body);
            }
            StmtKind::For {
                var,
                from,
                to,
                body,
            } => {
                self.index_expr(from);
                self.index_expr(to);
                let detail = format!("FOR {}", var.name);
                self.define(var, SymbolKind::LoopVariable, stmt.span, Some(stmt.span), detail);
                self.index_body(body, stmt.span);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.index_expr(value);
                }
            }
            StmtKind::Move(mv) => {
                for expr in [&mv.target, &mv.speed, &mv.zone, &mv.tool] {
                    self.index_expr(expr);
                }
                if let Some(wobj) = &mv.wobj {
                    self.index_expr(wobj);
                }
            }
            StmtKind::Test {
                subject,
                cases,
                default,
            } => {
                self.index_expr(subject);
                for case in cases {
                    for value in &case.values {
                        self.index_expr(value);
                    }
                    self.index_block(&case.body);
                }
                if let Some(body) = default {
                    self.index_block(body);
                }
            }
            StmtKind::Connect { trap, error } => {
                self.reference(error);
                self.reference(trap);
            }
            StmtKind::Raise(error) => self.reference(error),
            StmtKind::Local(var) => {
                self.reference(&var.ty);
                if let Some(init) = &var.init {
                    self.index_expr(init);
                }
                self.define(
                    &var.name,
                    SymbolKind::LocalData,
                    stmt.span,
                    Some(scope),
                    var_signature(var),
                );
            }
        }
    }

    fn index_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::Bool(_) | ExprKind::String(_) => {}
            ExprKind::Var(name) => self.reference(name),
            ExprKind::Index { base, index } => {
                self.index_expr(base);
                self.index_expr(index);
            }
            ExprKind::Field { base, .. } => self.index_expr(base),
            ExprKind::Call { name, args } => {
                self.reference(name);
                for arg in args {
                    self.index_expr(arg);
                }
            }
            ExprKind::Unary { operand, .. } => self.index_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.index_expr(left);
                self.index_expr(right);
            }
        }
    }
}

fn var_signature(var: &VarDecl) -> String {
    format!("{} {} {}", var.storage.keyword(), var.ty.name, var.name.name)
}

fn param_signature(param: &Param) -> String {
    match param.mode.keyword() {
        Some(mode) => format!("{} {} {}", mode, param.ty.name, param.name.name),
        None => format!("{} {}", param.ty.name, param.name.name),
    }
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(param_signature)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(source: &str) -> SymbolIndex {
        let result = rapid_analysis::analyze(source);
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        SymbolIndex::from_program(&result.program.unwrap())
    }

    const SOURCE: &str = "MODULE M
VAR num count := 0;
PROC Bump(num step)
    count := count + step;
ENDPROC
PROC Main()
    VAR num count := 5;
    Bump count;
ENDPROC
ENDMODULE";

    #[test]
    fn test_branch_local_does_not_escape_its_block() {
        let source = "MODULE M
PROC Main()
  IF TRUE THEN
    VAR num tmp;
    tmp := 1;
  ENDIF
  tmp := 2;
ENDPROC
ENDMODULE";
        let result = rapid_analysis::analyze(source);
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.message == "undefined variable `tmp`")
        );
        let index = SymbolIndex::from_program(&result.program.unwrap());

        let inside = index.find_definition_at(Position::new(5, 5)).unwrap();
        assert_eq!(inside.def_span.start, Position::new(4, 13));
        assert!(index.find_definition_at(Position::new(7, 3)).is_none());
    }

    #[test]
    fn test_else_and_default_locals_are_scoped() {
        let source = "MODULE M
PROC Main()
  IF FALSE THEN
    Stop;
  ELSE
    VAR num a;
    a := 1;
  ENDIF
  TEST 1
  DEFAULT:
    VAR num b;
    b := 2;
  ENDTEST
  a := b;
ENDPROC
ENDMODULE";
        let result = rapid_analysis::analyze(source);
        let index = SymbolIndex::from_program(&result.program.unwrap());
        assert!(index.find_definition_at(Position::new(7, 5)).is_some());
        assert!(index.find_definition_at(Position::new(12, 5)).is_some());
        assert!(index.find_definition_at(Position::new(14, 3)).is_none());
        assert!(index.find_definition_at(Position::new(14, 8)).is_none());
    }

    #[test]
    fn test_definitions_are_collected() {
        let index = index(SOURCE);
        assert_eq!(index.definitions["count"].len(), 2);
        assert_eq!(index.definitions["Bump"][0].kind, SymbolKind::Procedure);
        assert_eq!(index.definitions["Bump"][0].detail, "PROC Bump(num step)");
        assert_eq!(index.definitions["step"][0].kind, SymbolKind::Parameter);
    }

    #[test]
    fn test_global_reference_resolves_to_module_data() {
        let index = index(SOURCE);
        // `count` on line 4 refers to the module-level declaration.
        let def = index.find_definition_at(Position::new(4, 6)).unwrap();
        assert_eq!(def.def_span.start, Position::new(2, 9));
        assert_eq!(def.kind, SymbolKind::Data);
    }

    #[test]
    fn test_local_shadows_module_data() {
        let index = index(SOURCE);
        let def = index.find_definition_at(Position::new(8, 10)).unwrap();
        assert_eq!(def.kind, SymbolKind::LocalData);
        assert_eq!(def.def_span.start, Position::new(7, 13));
    }

    #[test]
    fn test_references_follow_binding() {
        let index = index(SOURCE);
        let refs = index.find_references_at(Position::new(2, 9), false);
        let lines: Vec<u32> = refs.iter().map(|r| r.span.start.line).collect();
        assert_eq!(lines, vec![4, 4]);

        let with_decl = index.find_references_at(Position::new(2, 9), true);
        assert_eq!(with_decl.len(), 3);
    }

    #[test]
    fn test_prefix_lookup_ignores_case() {
        let index = index(SOURCE);
        let names: Vec<&str> = index
            .definitions_with_prefix("b")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bump"]);
    }
}
