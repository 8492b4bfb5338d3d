//! AST formatting.
//! AST 格式化。

use rapid_syntax::*;

use crate::{FormatConfig, Printer};

/// Binding strength of non-binary expressions.
const ATOM_PRECEDENCE: u8 = u8::MAX;

/// The formatter.
/// 格式化器。
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Format a program.
    /// 格式化程序。
    pub fn format(&self, program: &Program) -> String {
        let mut printer = Printer::new(self.config.clone());

        for (i, module) in program.modules.iter().enumerate() {
            if i > 0 {
                printer.blank_line();
            }
            self.format_module(&mut printer, module);
        }

        debug_assert_eq!(printer.current_indent(), 0);
        printer.finish()
    }

    fn format_module(&self, p: &mut Printer, module: &Module) {
        p.write("MODULE ");
        p.writeln(&module.name.name);
        p.indent();

        let mut previous: Option<&Decl> = None;
        for decl in &module.decls {
            let spaced = previous.is_some_and(|prev| {
                self.config.blank_lines_between_items && !(is_data(prev) && is_data(decl))
            });
            if spaced {
                p.blank_line();
            }
            self.format_decl(p, decl);
            previous = Some(decl);
        }

        p.dedent();
        p.writeln("ENDMODULE");
    }

    // ========== Declarations ==========

    fn format_decl(&self, p: &mut Printer, decl: &Decl) {
        match &decl.kind {
            DeclKind::Var(var) => self.format_var_decl(p, var),
            DeclKind::Proc(proc) => {
                p.write("PROC ");
                p.write(&proc.name.name);
                self.format_params(p, &proc.params);
                p.newline();
                self.format_body(p, &proc.body);
                p.writeln("ENDPROC");
            }
            DeclKind::Func(func) => {
                p.write("FUNC ");
                p.write(&func.return_ty.name);
                p.write(" ");
                p.write(&func.name.name);
                self.format_params(p, &func.params);
                p.newline();
                self.format_body(p, &func.body);
                p.writeln("ENDFUNC");
            }
            DeclKind::Trap(trap) => {
                p.write("TRAP ");
                p.writeln(&trap.name.name);
                self.format_body(p, &trap.body);
                p.writeln("ENDTRAP");
            }
            DeclKind::Record(record) => {
                p.write("RECORD ");
                p.writeln(&record.name.name);
                p.indent();
                for field in &record.fields {
                    p.write(&field.ty.name);
                    p.write(" ");
                    p.write(&field.name.name);
                    p.writeln(";");
                }
                p.dedent();
                p.writeln("ENDRECORD");
            }
        }
    }

    fn format_var_decl(&self, p: &mut Printer, var: &VarDecl) {
        p.write(var.storage.keyword());
        p.write(" ");
        p.write(&var.ty.name);
        p.write(" ");
        p.write(&var.name.name);
        if let Some(init) = &var.init {
            p.write(" := ");
            p.write(&self.expr(init));
        }
        p.writeln(";");
    }

    fn format_params(&self, p: &mut Printer, params: &[Param]) {
        p.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                p.write(", ");
            }
            if let Some(mode) = param.mode.keyword() {
                p.write(mode);
                p.write(" ");
            }
            p.write(&param.ty.name);
            p.write(" ");
            p.write(&param.name.name);
        }
        p.write(")");
    }

    fn format_body(&self, p: &mut Printer, body: &[Stmt]) {
        p.indent();
        for stmt in body {
            self.format_stmt(p, stmt);
        }
        p.dedent();
    }

    // ========== Statements ==========

    fn format_stmt(&self, p: &mut Printer, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.format_stmt(p, stmt);
                }
            }
            StmtKind::Assign { target, value } => {
                p.write(&self.expr(target));
                p.write(" := ");
                p.write(&self.expr(value));
                p.writeln(";");
            }
            StmtKind::Expr(expr) => self.format_expr_stmt(p, expr),
            StmtKind::If {
                branches,
                else_body,
            } => {
                for (i, branch) in branches.iter().enumerate() {
                    p.write(if i == 0 { "IF " } else { "ELSEIF " });
                    p.write(&self.expr(&branch.cond));
                    p.writeln(" THEN");
                    self.format_body(p, &branch.body);
                }
                if let Some(body) = else_body {
                    p.writeln("ELSE");
                    self.format_body(p, body);
                }
                p.writeln("ENDIF");
            }
            StmtKind::While { cond, body } => {
                p.write("WHILE ");
                p.writeln(&self.expr(cond));
                self.format_body(p, body);
                p.writeln("ENDWHILE");
            }
            StmtKind::For {
                var,
                from,
                to,
                body,
            } => {
                p.write("FOR ");
                p.write(&var.name);
                p.write(" FROM ");
                p.write(&self.expr(from));
                p.write(" TO ");
                p.writeln(&self.expr(to));
                self.format_body(p, body);
                p.writeln("ENDFOR");
            }
            StmtKind::Return(value) => {
                p.write("RETURN");
                if let Some(value) = value {
                    p.write(" ");
                    p.write(&self.expr(value));
                }
                p.writeln(";");
            }
            StmtKind::Move(mv) => {
                p.write(mv.kind.instruction());
                p.write(" ");
                let mut args: Vec<String> = [&mv.target, &mv.speed, &mv.zone, &mv.tool]
                    .into_iter()
                    .map(|e| self.expr(e))
                    .collect();
                if let Some(wobj) = &mv.wobj {
                    if let Some(tool) = args.last_mut() {
                        tool.push_str("\\WObj:=");
                        tool.push_str(&self.expr(wobj));
                    }
                }
                self.write_list(p, &args);
                p.writeln(";");
            }
            StmtKind::Test {
                subject,
                cases,
                default,
            } => {
                p.write("TEST ");
                p.writeln(&self.expr(subject));
                p.indent();
                for case in cases {
                    let values: Vec<String> = case.values.iter().map(|v| self.expr(v)).collect();
                    p.write("CASE ");
                    p.write(&values.join(", "));
                    p.writeln(":");
                    self.format_body(p, &case.body);
                }
                if let Some(body) = default {
                    p.writeln("DEFAULT:");
                    self.format_body(p, body);
                }
                p.dedent();
                p.writeln("ENDTEST");
            }
            StmtKind::Connect { trap, error } => {
                p.write("CONNECT ");
                p.write(&trap.name);
                p.write(" WITH ");
                p.write(&error.name);
                p.writeln(";");
            }
            StmtKind::Raise(error) => {
                p.write("RAISE ");
                p.write(&error.name);
                p.writeln(";");
            }
            StmtKind::Local(var) => self.format_var_decl(p, var),
        }
    }

    /// Procedure calls use the `Name arg, arg;` form whenever it reads back
    /// as the same call.
    fn format_expr_stmt(&self, p: &mut Printer, expr: &Expr) {
        if let ExprKind::Call { name, args } = &expr.kind {
            let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
            let bare = !name.name.contains('.')
                && args
                    .first()
                    .is_some_and(|first| !first.starts_with(['(', '-', '+']));
            if bare {
                p.write(&name.name);
                p.write(" ");
                self.write_list(p, &args);
                p.writeln(";");
                return;
            }
        }
        p.write(&self.expr(expr));
        p.writeln(";");
    }

    /// Write comma-separated items, one per line when they don't fit.
    fn write_list(&self, p: &mut Printer, items: &[String]) {
        let joined = items.join(", ");
        let fits = !p.would_exceed_width(joined.chars().count() + 1);
        if fits || !p.config().break_long_lists || items.len() < 2 {
            p.write(&joined);
            return;
        }

        p.indent();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                p.write(",");
                p.newline();
            }
            p.write(item);
        }
        p.dedent();
    }

    // ========== Expressions ==========

    /// Render an expression, adding parentheses only where precedence needs them.
    /// 渲染表达式，仅在优先级需要时添加括号。
    pub fn expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Number(value) => format_number(*value),
            ExprKind::Bool(true) => "TRUE".to_string(),
            ExprKind::Bool(false) => "FALSE".to_string(),
            ExprKind::String(s) => format!("\"{}\"", s),
            ExprKind::Var(name) => name.name.clone(),
            ExprKind::Index { base, index } => {
                format!("{}[{}]", self.expr(base), self.expr(index))
            }
            ExprKind::Field { base, field } => format!("{}.{}", self.expr(base), field.name),
            ExprKind::Call { name, args } => {
                let args: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
                format!("{}({})", name.name, args.join(", "))
            }
            ExprKind::Unary { op, operand } => {
                let inner = self.expr(operand);
                let inner = if precedence(operand) == ATOM_PRECEDENCE {
                    inner
                } else {
                    format!("({})", inner)
                };
                match op {
                    UnaryOp::Not => format!("NOT {}", inner),
                    _ => format!("{}{}", op.as_str(), inner),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                let left_str = self.operand(left, precedence(left) < prec);
                let right_str = self.operand(right, precedence(right) <= prec);
                format!("{} {} {}", left_str, op.as_str(), right_str)
            }
        }
    }

    fn operand(&self, expr: &Expr, parens: bool) -> String {
        if parens {
            format!("({})", self.expr(expr))
        } else {
            self.expr(expr)
        }
    }
}

fn is_data(decl: &Decl) -> bool {
    matches!(decl.kind, DeclKind::Var(_))
}

fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Binary { op, .. } => op.precedence(),
        _ => ATOM_PRECEDENCE,
    }
}

/// Integral values print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
