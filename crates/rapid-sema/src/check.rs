//! Semantic analyzer implementation.

use rapid_diagnostic::Diagnostic;
use rapid_syntax::{
    DeclKind, Expr, ExprKind, Ident, Module, Param, Program, Stmt, StmtKind,
};

use crate::errors;
use crate::scope::{Scope, Symbol, SymbolDecl};
use crate::types::{
    BOOL, BUILTIN_ROUTINES, NUM, PREDEFINED_DATA, RECORD, STRING, builtin_components,
    builtin_type, normalize_type,
};

/// The routine whose body is being analyzed.
#[derive(Debug, Clone, Copy)]
enum Routine<'r> {
    Proc,
    /// Function with its (normalized) return type.
    Func(&'r str),
    Trap,
}

/// The semantic analyzer.
///
/// Runs two passes per module: the first registers every module-level
/// declaration, the second walks initializers and routine bodies with
/// block-scoped symbol tables.
pub struct SemanticAnalyzer {
    diagnostics: Vec<Diagnostic>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Analyze every module of a program.
    pub fn analyze<'a>(&mut self, program: &'a Program) {
        let mut global = Scope::new();
        define_builtins(&mut global);

        for module in &program.modules {
            tracing::trace!(module = %module.name.name, decls = module.decls.len(), "analyzing module");
            let mut scope = Scope::child(&global);
            self.declare_module(module, &mut scope);
            self.check_module(module, &scope);
        }
    }

    // ========== Pass 1: declarations ==========

    fn declare_module<'a>(&mut self, module: &'a Module, scope: &mut Scope<'_, 'a>) {
        for decl in &module.decls {
            let symbol = match &decl.kind {
                DeclKind::Var(var) => Symbol::new(
                    &var.name,
                    Some(normalize_type(&var.ty.name)),
                    SymbolDecl::Var(var),
                )
                .with_const(var.is_const()),
                DeclKind::Proc(proc) => Symbol::new(&proc.name, None, SymbolDecl::Proc(proc)),
                DeclKind::Func(func) => Symbol::new(
                    &func.name,
                    Some(normalize_type(&func.return_ty.name)),
                    SymbolDecl::Func(func),
                ),
                DeclKind::Record(record) => Symbol::new(
                    &record.name,
                    Some(RECORD.to_string()),
                    SymbolDecl::Record(record),
                ),
                DeclKind::Trap(trap) => Symbol::new(&trap.name, None, SymbolDecl::Trap(trap)),
            };
            self.define(scope, symbol);
        }

        // Types are checked once every record of the module is known.
        for decl in &module.decls {
            if let DeclKind::Var(var) = &decl.kind {
                self.check_type_name(&var.ty, scope);
            }
        }
    }

    fn define<'a>(&mut self, scope: &mut Scope<'_, 'a>, symbol: Symbol<'a>) {
        let name = symbol.name.clone();
        let span = symbol.span.unwrap_or_default();
        if !scope.define(symbol) {
            let previous = scope.lookup_local(&name).and_then(|s| s.span);
            self.diagnostics
                .push(errors::already_defined(&name, span, previous));
        }
    }

    fn check_type_name(&mut self, ty: &Ident, scope: &Scope<'_, '_>) {
        if builtin_type(&ty.name).is_some() {
            return;
        }
        if scope.resolve(&ty.name).is_some_and(Symbol::is_record) {
            return;
        }
        self.diagnostics.push(errors::unknown_type(&ty.name, ty.span));
    }

    // ========== Pass 2: bodies ==========

    fn check_module<'a>(&mut self, module: &'a Module, scope: &Scope<'_, 'a>) {
        for decl in &module.decls {
            match &decl.kind {
                DeclKind::Var(var) => {
                    if let Some(init) = &var.init {
                        self.analyze_expr(init, scope);
                    }
                }
                DeclKind::Proc(proc) => {
                    self.check_routine(&proc.params, &proc.body, Routine::Proc, scope);
                }
                DeclKind::Func(func) => {
                    let return_ty = normalize_type(&func.return_ty.name);
                    self.check_routine(&func.params, &func.body, Routine::Func(&return_ty), scope);
                    if !contains_return(&func.body) {
                        self.diagnostics
                            .push(errors::missing_return(&func.name.name, func.name.span));
                    }
                }
                DeclKind::Trap(trap) => {
                    self.check_routine(&[], &trap.body, Routine::Trap, scope);
                }
                DeclKind::Record(_) => {}
            }
        }
    }

    fn check_routine<'a>(
        &mut self,
        params: &'a [Param],
        body: &'a [Stmt],
        routine: Routine<'_>,
        scope: &Scope<'_, 'a>,
    ) {
        let mut local = Scope::child(scope);
        for param in params {
            let symbol = Symbol::new(
                &param.name,
                Some(normalize_type(&param.ty.name)),
                SymbolDecl::Param(param),
            );
            self.define(&mut local, symbol);
        }
        self.check_body(body, &mut local, routine);
    }

    fn check_body<'a>(&mut self, body: &'a [Stmt], scope: &mut Scope<'_, 'a>, routine: Routine<'_>) {
        for stmt in body {
            self.check_stmt(stmt, scope, routine);
        }
    }

    /// Analyze a body inside a fresh child scope.
    fn check_nested<'a>(&mut self, body: &'a [Stmt], scope: &Scope<'_, 'a>, routine: Routine<'_>) {
        let mut inner = Scope::child(scope);
        self.check_body(body, &mut inner, routine);
    }

    fn check_stmt<'a>(&mut self, stmt: &'a Stmt, scope: &mut Scope<'_, 'a>, routine: Routine<'_>) {
        match &stmt.kind {
            StmtKind::Block(body) => self.check_nested(body, scope, routine),

            StmtKind::Assign { target, value } => {
                let target_ty = self.analyze_expr(target, scope);
                let value_ty = self.analyze_expr(value, scope);
                self.check_assignable(target, scope);
                if let (Some(target_ty), Some(value_ty)) = (target_ty, value_ty) {
                    if target_ty != value_ty {
                        self.diagnostics.push(errors::assignment_mismatch(
                            &target_ty, &value_ty, stmt.span,
                        ));
                    }
                }
            }

            StmtKind::Expr(expr) => {
                self.analyze_expr(expr, scope);
            }

            StmtKind::If {
                branches,
                else_body,
            } => {
                for branch in branches {
                    self.check_condition("IF", &branch.cond, scope);
                    self.check_nested(&branch.body, scope, routine);
                }
                if let Some(body) = else_body {
                    self.check_nested(body, scope, routine);
                }
            }

            StmtKind::While { cond, body } => {
                self.check_condition("WHILE", cond, scope);
                self.check_nested(body, scope, routine);
            }

            StmtKind::For {
                var,
                from,
                to,
                body,
            } => {
                self.analyze_expr(from, scope);
                self.analyze_expr(to, scope);
                let mut inner = Scope::child(scope);
                let symbol = Symbol::new(var, Some(NUM.to_string()), SymbolDecl::LoopVar(var))
                    .with_const(true);
                self.define(&mut inner, symbol);
                self.check_body(body, &mut inner, routine);
            }

            StmtKind::Return(value) => self.check_return(value.as_ref(), stmt, scope, routine),

            StmtKind::Move(mv) => {
                for expr in [&mv.target, &mv.speed, &mv.zone, &mv.tool] {
                    self.analyze_expr(expr, scope);
                }
                if let Some(wobj) = &mv.wobj {
                    self.analyze_expr(wobj, scope);
                }
            }

            StmtKind::Test {
                subject,
                cases,
                default,
            } => {
                let subject_ty = self.analyze_expr(subject, scope);
                for case in cases {
                    for value in &case.values {
                        let value_ty = self.analyze_expr(value, scope);
                        match (subject_ty.as_deref(), value_ty.as_deref()) {
                            (Some(expected), Some(found)) if expected != found => {
                                self.diagnostics
                                    .push(errors::case_mismatch(expected, found, value.span));
                            }
                            _ => {}
                        }
                    }
                    self.check_nested(&case.body, scope, routine);
                }
                if let Some(body) = default {
                    self.check_nested(body, scope, routine);
                }
            }

            StmtKind::Connect { trap, .. } => match scope.resolve(&trap.name) {
                None => self
                    .diagnostics
                    .push(errors::undefined_trap(&trap.name, trap.span, false)),
                Some(symbol) if !symbol.is_trap() => self
                    .diagnostics
                    .push(errors::undefined_trap(&trap.name, trap.span, true)),
                Some(_) => {}
            },

            StmtKind::Raise(_) => {}

            StmtKind::Local(var) => {
                if let Some(init) = &var.init {
                    self.analyze_expr(init, scope);
                }
                self.check_type_name(&var.ty, scope);
                let symbol = Symbol::new(
                    &var.name,
                    Some(normalize_type(&var.ty.name)),
                    SymbolDecl::Var(var),
                )
                .with_const(var.is_const());
                self.define(scope, symbol);
            }
        }
    }

    fn check_condition<'a>(&mut self, construct: &str, cond: &'a Expr, scope: &Scope<'_, 'a>) {
        if let Some(ty) = self.analyze_expr(cond, scope) {
            if ty != BOOL {
                self.diagnostics
                    .push(errors::non_bool_condition(construct, &ty, cond.span));
            }
        }
    }

    fn check_assignable(&mut self, target: &Expr, scope: &Scope<'_, '_>) {
        let ExprKind::Var(name) = &target.kind else {
            return;
        };
        let Some(symbol) = scope.resolve(&name.name) else {
            return;
        };
        if symbol.is_const {
            let what = match symbol.decl {
                SymbolDecl::LoopVar(_) => "loop variable",
                _ => "constant",
            };
            self.diagnostics
                .push(errors::assign_to_constant(&name.name, what, name.span));
        }
    }

    fn check_return<'a>(
        &mut self,
        value: Option<&'a Expr>,
        stmt: &Stmt,
        scope: &Scope<'_, 'a>,
        routine: Routine<'_>,
    ) {
        let Some(value) = value else {
            return;
        };
        let value_ty = self.analyze_expr(value, scope);
        match routine {
            Routine::Proc => self
                .diagnostics
                .push(errors::return_value_in("procedure", stmt.span)),
            Routine::Trap => self.diagnostics.push(errors::return_value_in("trap", stmt.span)),
            Routine::Func(expected) => {
                if let Some(found) = value_ty {
                    if found != expected {
                        self.diagnostics
                            .push(errors::return_mismatch(expected, &found, value.span));
                    }
                }
            }
        }
    }

    // ========== Expressions ==========

    /// Resolve names in an expression and compute its type name.
    /// `None` means the type is unknown and suppresses follow-up checks.
    fn analyze_expr<'a>(&mut self, expr: &'a Expr, scope: &Scope<'_, 'a>) -> Option<String> {
        match &expr.kind {
            ExprKind::Number(_) => Some(NUM.to_string()),
            ExprKind::Bool(_) => Some(BOOL.to_string()),
            ExprKind::String(_) => Some(STRING.to_string()),

            ExprKind::Var(name) => match scope.resolve(&name.name) {
                Some(symbol) => symbol.ty.clone(),
                None => {
                    self.diagnostics
                        .push(errors::undefined_variable(&name.name, name.span));
                    None
                }
            },

            ExprKind::Index { base, index } => {
                self.analyze_expr(base, scope);
                self.analyze_expr(index, scope);
                None
            }

            ExprKind::Field { base, field } => {
                let base_ty = self.analyze_expr(base, scope)?;
                self.field_type(&base_ty, field, scope)
            }

            ExprKind::Call { name, args } => {
                for arg in args {
                    self.analyze_expr(arg, scope);
                }
                match scope.resolve(&name.name) {
                    Some(symbol) => symbol.ty.clone(),
                    None => {
                        self.diagnostics
                            .push(errors::undefined_routine(&name.name, name.span));
                        None
                    }
                }
            }

            ExprKind::Unary { operand, .. } => self.analyze_expr(operand, scope),

            ExprKind::Binary { op, left, right } => {
                self.analyze_expr(left, scope);
                self.analyze_expr(right, scope);
                let ty = if op.is_arithmetic() { NUM } else { BOOL };
                Some(ty.to_string())
            }
        }
    }

    fn field_type(&mut self, ty: &str, field: &Ident, scope: &Scope<'_, '_>) -> Option<String> {
        if let Some(components) = builtin_components(ty) {
            let found = components
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&field.name));
            return match found {
                Some((_, field_ty)) => Some(field_ty.to_string()),
                None => {
                    self.diagnostics
                        .push(errors::unknown_field(ty, &field.name, field.span));
                    None
                }
            };
        }

        match scope.resolve(ty).map(|symbol| symbol.decl) {
            Some(SymbolDecl::Record(record)) => match record.field(&field.name) {
                Some(component) => Some(normalize_type(&component.ty.name)),
                None => {
                    self.diagnostics
                        .push(errors::unknown_field(ty, &field.name, field.span));
                    None
                }
            },
            _ => {
                self.diagnostics.push(errors::not_a_record(ty, field.span));
                None
            }
        }
    }
}

fn define_builtins(scope: &mut Scope<'_, '_>) {
    for (name, return_ty) in BUILTIN_ROUTINES {
        scope.define(Symbol::builtin(name, *return_ty, false));
    }
    for (name, ty) in PREDEFINED_DATA {
        scope.define(Symbol::builtin(name, Some(*ty), true));
    }
}

/// Whether a RETURN statement appears anywhere in the statements.
fn contains_return(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::Block(body) => contains_return(body),
        StmtKind::If {
            branches,
            else_body,
        } => {
            branches.iter().any(|b| contains_return(&b.body))
                || else_body.as_deref().is_some_and(contains_return)
        }
        StmtKind::While { body, .. } | StmtKind::For { body, .. } => contains_return(body),
        StmtKind::Test { cases, default, .. } => {
            cases.iter().any(|c| contains_return(&c.body))
                || default.as_deref().is_some_and(contains_return)
        }
        StmtKind::Assign { .. }
        | StmtKind::Expr(_)
        | StmtKind::Move(_)
        | StmtKind::Connect { .. }
        | StmtKind::Raise(_)
        | StmtKind::Local(_) => false,
    })
}
