//! The RAPID parser.

use rapid_common::{Position, Span};
use rapid_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use rapid_lexer::{Token, TokenKind};
use rapid_syntax::*;

use crate::error::{PResult, ParseError};

/// The RAPID parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(Position::START);
            tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parse a complete program.
    pub fn parse_program(&mut self) -> PResult<Program> {
        let start = self.current_span();
        let mut modules = Vec::new();

        while !self.at_end() {
            modules.push(self.parse_module()?);
        }

        let span = match modules.last() {
            Some(last) => start.merge(last.span),
            None => start,
        };
        Ok(Program { modules, span })
    }

    fn parse_module(&mut self) -> PResult<Module> {
        let start = self.expect(TokenKind::Module)?.span;
        let name = self.expect_ident("module name")?;

        let mut decls = Vec::new();
        while !self.check(TokenKind::EndModule) && !self.at_end() {
            decls.push(self.parse_decl()?);
        }

        let end = self.expect(TokenKind::EndModule)?.span;
        Ok(Module {
            name,
            decls,
            span: start.merge(end),
        })
    }

    // ========== Declarations ==========

    fn parse_decl(&mut self) -> PResult<Decl> {
        match self.current_kind() {
            TokenKind::Var | TokenKind::Pers | TokenKind::Const => {
                let (var, span) = self.parse_var_decl()?;
                Ok(Decl::new(DeclKind::Var(var), span))
            }
            TokenKind::Proc => self.parse_proc(),
            TokenKind::Func => self.parse_func(),
            TokenKind::Record => self.parse_record(),
            TokenKind::Trap => self.parse_trap(),
            _ => {
                let found = self.current().describe();
                Err(self.fail(
                    format!("expected declaration, found {}", found),
                    ErrorCode::UnexpectedToken,
                ))
            }
        }
    }

    /// `VAR|PERS|CONST type name [:= expr];`
    fn parse_var_decl(&mut self) -> PResult<(VarDecl, Span)> {
        let start = self.current_span();
        let storage = match self.current_kind() {
            TokenKind::Pers => Storage::Pers,
            TokenKind::Const => Storage::Const,
            _ => Storage::Var,
        };
        self.advance();

        let ty = self.expect_ident("data type")?;
        let name = self.expect_ident("data name")?;
        let init = if self.eat(TokenKind::ColonEq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end = self.expect(TokenKind::Semicolon)?.span;

        Ok((
            VarDecl {
                storage,
                ty,
                name,
                init,
            },
            start.merge(end),
        ))
    }

    fn parse_proc(&mut self) -> PResult<Decl> {
        let start = self.expect(TokenKind::Proc)?.span;
        let name = self.expect_ident("procedure name")?;
        let params = self.parse_params()?;
        let body = self.parse_body(&[TokenKind::EndProc])?;
        let end = self.expect(TokenKind::EndProc)?.span;

        Ok(Decl::new(
            DeclKind::Proc(ProcDecl { name, params, body }),
            start.merge(end),
        ))
    }

    fn parse_func(&mut self) -> PResult<Decl> {
        let start = self.expect(TokenKind::Func)?.span;
        let return_ty = self.expect_ident("return type")?;
        let name = self.expect_ident("function name")?;
        let params = self.parse_params()?;
        let body = self.parse_body(&[TokenKind::EndFunc])?;
        let end = self.expect(TokenKind::EndFunc)?.span;

        Ok(Decl::new(
            DeclKind::Func(FuncDecl {
                return_ty,
                name,
                params,
                body,
            }),
            start.merge(end),
        ))
    }

    fn parse_trap(&mut self) -> PResult<Decl> {
        let start = self.expect(TokenKind::Trap)?.span;
        let name = self.expect_ident("trap name")?;
        let body = self.parse_body(&[TokenKind::EndTrap])?;
        let end = self.expect(TokenKind::EndTrap)?.span;

        Ok(Decl::new(
            DeclKind::Trap(TrapDecl { name, body }),
            start.merge(end),
        ))
    }

    /// `RECORD name (type a, type b);` or `RECORD name type a; type b; ENDRECORD`
    fn parse_record(&mut self) -> PResult<Decl> {
        let start = self.expect(TokenKind::Record)?.span;
        let name = self.expect_ident("record name")?;
        let mut fields = Vec::new();

        let end = if self.eat(TokenKind::LParen) {
            while !self.check(TokenKind::RParen) {
                fields.push(self.parse_record_field()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
            self.expect(TokenKind::Semicolon)?.span
        } else {
            while !self.check(TokenKind::EndRecord) && !self.at_end() {
                fields.push(self.parse_record_field()?);
                self.expect(TokenKind::Semicolon)?;
            }
            self.expect(TokenKind::EndRecord)?.span
        };

        Ok(Decl::new(
            DeclKind::Record(RecordDecl { name, fields }),
            start.merge(end),
        ))
    }

    fn parse_record_field(&mut self) -> PResult<RecordField> {
        let ty = self.expect_ident("component type")?;
        let name = self.expect_ident("component name")?;
        let span = ty.span.merge(name.span);
        Ok(RecordField { ty, name, span })
    }

    // ========== Helpers ==========

    /// Optional `( [INOUT|VAR|PERS] type name, ... )`.
    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        let mut params = Vec::new();
        if !self.eat(TokenKind::LParen) {
            return Ok(params);
        }

        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_param(&mut self) -> PResult<Param> {
        let start = self.current_span();
        let mode = match self.current_kind() {
            TokenKind::Var => ParamMode::Var,
            TokenKind::Pers => ParamMode::Pers,
            TokenKind::Ident
                if self.current().text.eq_ignore_ascii_case("INOUT")
                    && self.peek_kind(1) == TokenKind::Ident =>
            {
                ParamMode::InOut
            }
            _ => ParamMode::In,
        };
        if mode != ParamMode::In {
            self.advance();
        }

        let ty = self.expect_ident("parameter type")?;
        let name = self.expect_ident("parameter name")?;
        let span = start.merge(name.span);
        Ok(Param {
            mode,
            ty,
            name,
            span,
        })
    }

    /// Statements up to (not including) one of the terminators.
    fn parse_body(&mut self, terminators: &[TokenKind]) -> PResult<Vec<Stmt>> {
        let mut body = Vec::new();
        while !terminators.iter().any(|t| self.check(*t)) && !self.at_end() {
            body.push(self.parse_stmt()?);
        }
        Ok(body)
    }

    fn expect_ident(&mut self, what: &str) -> PResult<Ident> {
        if self.check(TokenKind::Ident) {
            let token = self.current().clone();
            self.advance();
            Ok(Ident::new(token.text, token.span))
        } else {
            let found = self.current().describe();
            Err(self.fail(
                format!("expected {}, found {}", what, found),
                ErrorCode::UnexpectedToken,
            ))
        }
    }

    // ========== Statement Parsing ==========

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        match self.current_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::MoveJ | TokenKind::MoveL | TokenKind::MoveC => self.parse_move(),
            TokenKind::Test => self.parse_test(),
            TokenKind::Connect => self.parse_connect(),
            TokenKind::Raise => self.parse_raise(),
            TokenKind::Var | TokenKind::Pers | TokenKind::Const => {
                let (var, span) = self.parse_var_decl()?;
                Ok(Stmt::new(StmtKind::Local(var), span))
            }
            _ => self.parse_simple_stmt(),
        }
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::If)?.span;
        let mut branches = vec![self.parse_if_branch(start)?];

        while self.check(TokenKind::ElseIf) {
            let branch_start = self.current_span();
            self.advance();
            branches.push(self.parse_if_branch(branch_start)?);
        }

        let else_body = if self.eat(TokenKind::Else) {
            Some(self.parse_body(&[TokenKind::EndIf])?)
        } else {
            None
        };

        let end = self.expect(TokenKind::EndIf)?.span;
        Ok(Stmt::new(
            StmtKind::If {
                branches,
                else_body,
            },
            start.merge(end),
        ))
    }

    /// `cond THEN body`, the keyword before it already consumed.
    fn parse_if_branch(&mut self, start: Span) -> PResult<IfBranch> {
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let body = self.parse_body(&[TokenKind::ElseIf, TokenKind::Else, TokenKind::EndIf])?;
        let end = body.last().map(|s| s.span).unwrap_or(cond.span);
        Ok(IfBranch {
            cond,
            body,
            span: start.merge(end),
        })
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::While)?.span;
        let cond = self.parse_expr()?;
        let body = self.parse_body(&[TokenKind::EndWhile])?;
        let end = self.expect(TokenKind::EndWhile)?.span;
        Ok(Stmt::new(StmtKind::While { cond, body }, start.merge(end)))
    }

    fn parse_for(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::For)?.span;
        let var = self.expect_ident("loop variable")?;
        self.expect(TokenKind::From)?;
        let from = self.parse_expr()?;
        self.expect(TokenKind::To)?;
        let to = self.parse_expr()?;
        let body = self.parse_body(&[TokenKind::EndFor])?;
        let end = self.expect(TokenKind::EndFor)?.span;
        Ok(Stmt::new(
            StmtKind::For {
                var,
                from,
                to,
                body,
            },
            start.merge(end),
        ))
    }

    fn parse_return(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Return)?.span;
        let value = if self.check(TokenKind::Semicolon)
            || self.check(TokenKind::EndProc)
            || self.check(TokenKind::EndFunc)
        {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Return(value), start.merge(end)))
    }

    /// `MoveL target, speed, zone, tool {\Switch[:=expr]};`
    fn parse_move(&mut self) -> PResult<Stmt> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::MoveJ => MoveKind::Joint,
            TokenKind::MoveC => MoveKind::Circular,
            _ => MoveKind::Linear,
        };
        self.advance();

        let target = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let speed = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let zone = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let tool = self.parse_expr()?;

        let mut wobj = None;
        while self.eat(TokenKind::Backslash) {
            let switch = self.expect_ident("optional argument name")?;
            let value = if self.eat(TokenKind::ColonEq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            if switch.name.eq_ignore_ascii_case("WObj") {
                wobj = value;
            }
        }

        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(
            StmtKind::Move(MoveStmt {
                kind,
                target,
                speed,
                zone,
                tool,
                wobj,
            }),
            start.merge(end),
        ))
    }

    fn parse_test(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Test)?.span;
        let subject = self.parse_expr()?;
        let mut cases = Vec::new();
        let mut default = None;
        let arm_ends = [TokenKind::Case, TokenKind::Default, TokenKind::EndTest];

        loop {
            if self.check(TokenKind::Case) {
                let case_start = self.current_span();
                self.advance();
                let mut values = vec![self.parse_expr()?];
                while self.eat(TokenKind::Comma) {
                    values.push(self.parse_expr()?);
                }
                let colon = self.expect(TokenKind::Colon)?.span;
                let body = self.parse_body(&arm_ends)?;
                let end = body.last().map(|s| s.span).unwrap_or(colon);
                cases.push(TestCase {
                    values,
                    body,
                    span: case_start.merge(end),
                });
            } else if self.eat(TokenKind::Default) {
                self.expect(TokenKind::Colon)?;
                default = Some(self.parse_body(&arm_ends)?);
            } else {
                break;
            }
        }

        let end = self.expect(TokenKind::EndTest)?.span;
        Ok(Stmt::new(
            StmtKind::Test {
                subject,
                cases,
                default,
            },
            start.merge(end),
        ))
    }

    fn parse_connect(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Connect)?.span;
        let trap = self.expect_ident("trap name")?;
        self.expect(TokenKind::With)?;
        let error = self.expect_ident("error name")?;
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Connect { trap, error }, start.merge(end)))
    }

    fn parse_raise(&mut self) -> PResult<Stmt> {
        let start = self.expect(TokenKind::Raise)?.span;
        let error = self.expect_ident("error name")?;
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Raise(error), start.merge(end)))
    }

    /// Assignment, expression statement, or `Proc arg, arg;` call.
    fn parse_simple_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span();
        let expr = self.parse_expr()?;

        if self.eat(TokenKind::ColonEq) {
            let value = self.parse_expr()?;
            let end = self.expect(TokenKind::Semicolon)?.span;
            return Ok(Stmt::new(
                StmtKind::Assign {
                    target: expr,
                    value,
                },
                start.merge(end),
            ));
        }

        let expr = match expr.kind {
            ExprKind::Var(name) if self.at_expr_start() => {
                let mut args = vec![self.parse_expr()?];
                while self.eat(TokenKind::Comma) {
                    args.push(self.parse_expr()?);
                }
                let span = args.iter().fold(name.span, |span, arg| span.merge(arg.span));
                Expr::new(ExprKind::Call { name, args }, span)
            }
            kind => Expr::new(kind, expr.span),
        };

        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Expr(expr), start.merge(end)))
    }

    fn at_expr_start(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Ident
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::Not
        )
    }

    // ========== Expression Parsing ==========

    pub fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_and_expr()?;

        while self.eat(TokenKind::Or) {
            let right = self.parse_and_expr()?;
            left = binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_equality_expr()?;

        while self.eat(TokenKind::And) {
            let right = self.parse_equality_expr()?;
            left = binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_comparison_expr()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::Neq => BinOp::Neq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_comparison_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_additive_expr()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_multiplicative_expr()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> PResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> PResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary_expr(),
        };
        let start = self.current_span();
        self.advance();
        let operand = self.parse_unary_expr()?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_primary_expr(&mut self) -> PResult<Expr> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                match token.text.parse::<f64>() {
                    Ok(value) => Ok(Expr::new(ExprKind::Number(value), token.span)),
                    Err(_) => Err(self.fail_at(
                        token.span,
                        format!("invalid number `{}`", token.text),
                        ErrorCode::ExpectedExpression,
                    )),
                }
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(true), token.span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(false), token.span))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::new(ExprKind::String(token.text), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident => self.parse_ident_chain(),
            _ => Err(self.fail(
                format!("expected expression, found {}", token.describe()),
                ErrorCode::ExpectedExpression,
            )),
        }
    }

    /// A name followed by any number of `(args)`, `[index]` and `.field` suffixes.
    fn parse_ident_chain(&mut self) -> PResult<Expr> {
        let token = self.current().clone();
        self.advance();

        let mut expr = if token.text.contains('.') && self.check(TokenKind::LParen) {
            Expr::new(ExprKind::Var(Ident::new(token.text, token.span)), token.span)
        } else {
            let mut parts = self.split_dotted(&token)?.into_iter();
            let head = parts.next().ok_or_else(|| {
                self.fail_at(token.span, "expected identifier", ErrorCode::MalformedName)
            })?;
            let base = Expr::new(ExprKind::Var(head.clone()), head.span);
            parts.fold(base, field_access)
        };

        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    let ExprKind::Var(name) = &expr.kind else {
                        return Err(self.fail(
                            "only named routines can be called",
                            ErrorCode::InvalidCallTarget,
                        ));
                    };
                    let name = name.clone();
                    self.advance();
                    let args = self.parse_args()?;
                    let end = self.expect(TokenKind::RParen)?.span;
                    let span = expr.span.merge(end);
                    expr = Expr::new(ExprKind::Call { name, args }, span);
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let end = self.expect(TokenKind::RBracket)?.span;
                    let span = expr.span.merge(end);
                    expr = Expr::new(
                        ExprKind::Index {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    // `a[1].to` lexes its component as the TO keyword.
                    let kind = self.current_kind();
                    if kind != TokenKind::Ident && !kind.is_keyword() {
                        let found = self.current().describe();
                        return Err(self.fail(
                            format!("expected component name, found {}", found),
                            ErrorCode::UnexpectedToken,
                        ));
                    }
                    let field = self.current().clone();
                    self.advance();
                    for part in self.split_dotted(&field)? {
                        expr = field_access(expr, part);
                    }
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Split a word such as `p.trans.x` into its dot-separated names.
    fn split_dotted(&mut self, token: &Token) -> PResult<Vec<Ident>> {
        let mut parts = Vec::new();
        let mut col = token.span.start;
        for segment in token.text.split('.') {
            let len = segment.chars().count() as u32;
            if len == 0 {
                return Err(self.fail_at(
                    token.span,
                    format!("malformed name `{}`", token.text),
                    ErrorCode::MalformedName,
                ));
            }
            parts.push(Ident::new(segment, Span::new(col, col.offset(len))));
            col = col.offset(len + 1);
        }
        Ok(parts)
    }

    fn parse_args(&mut self) -> PResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn peek_kind(&self, n: usize) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)].kind
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            let token = self.current().clone();
            self.advance();
            return Ok(token);
        }
        let expected = match kind {
            TokenKind::Ident => "identifier".to_string(),
            kind => format!("`{}`", kind),
        };
        let found = self.current().describe();
        Err(self.fail(
            format!("expected {}, found {}", expected, found),
            ErrorCode::UnexpectedToken,
        ))
    }

    /// Record a syntax error at the current token and produce the abort value.
    fn fail(&mut self, message: impl Into<String>, code: ErrorCode) -> ParseError {
        let span = self.current_span();
        self.fail_at(span, message, code)
    }

    fn fail_at(&mut self, span: Span, message: impl Into<String>, code: ErrorCode) -> ParseError {
        let message = message.into();
        tracing::debug!(%span, "parse aborted: {}", message);
        self.diagnostics.push(
            Diagnostic::error(DiagnosticKind::Parser, span, message.clone())
                .with_code(code)
                .with_label(Label::new(span, "here")),
        );
        ParseError { message, span }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn field_access(base: Expr, field: Ident) -> Expr {
    let span = base.span.merge(field.span);
    Expr::new(
        ExprKind::Field {
            base: Box::new(base),
            field,
        },
        span,
    )
}
