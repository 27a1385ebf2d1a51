// Common test utilities: arena builders for constructor-body shapes.
#![allow(dead_code)]

use ctorlint::ast::*;
use ctorlint::{ValidationResult, ViolationKind};

pub fn lit_int(a: &mut AstArena, v: i64) -> ExprId {
    a.alloc_expr(Expr::Literal(Literal::Integer(v)))
}

pub fn ident(a: &mut AstArena, name: &str) -> ExprId {
    a.alloc_expr(Expr::Identifier(name.to_string()))
}

pub fn this_ref(a: &mut AstArena) -> ExprId {
    a.alloc_expr(Expr::This(ThisExpr { qualifier: None }))
}

pub fn qualified_this(a: &mut AstArena, outer: &str) -> ExprId {
    a.alloc_expr(Expr::This(ThisExpr { qualifier: Some(outer.to_string()) }))
}

pub fn super_ref(a: &mut AstArena) -> ExprId {
    a.alloc_expr(Expr::Super(SuperExpr { qualifier: None }))
}

pub fn qualified_super(a: &mut AstArena, iface: &str) -> ExprId {
    a.alloc_expr(Expr::Super(SuperExpr { qualifier: Some(iface.to_string()) }))
}

pub fn field_access(a: &mut AstArena, target: Option<ExprId>, name: &str) -> ExprId {
    a.alloc_expr(Expr::FieldAccess(FieldAccessExpr { target, name: name.to_string() }))
}

pub fn call(a: &mut AstArena, target: Option<ExprId>, name: &str, args: Vec<ExprId>) -> ExprId {
    a.alloc_expr(Expr::MethodCall(MethodCallExpr { target, name: name.to_string(), arguments: args }))
}

pub fn new_plain(a: &mut AstArena, type_name: &str, args: Vec<ExprId>) -> ExprId {
    a.alloc_expr(Expr::New(NewExpr {
        type_name: type_name.to_string(),
        arguments: args,
        needs_enclosing_instance: false,
        anonymous_body: None,
    }))
}

pub fn new_inner(a: &mut AstArena, type_name: &str) -> ExprId {
    a.alloc_expr(Expr::New(NewExpr {
        type_name: type_name.to_string(),
        arguments: vec![],
        needs_enclosing_instance: true,
        anonymous_body: None,
    }))
}

pub fn new_anonymous(a: &mut AstArena, type_name: &str, init_stmts: Vec<StmtId>) -> ExprId {
    a.alloc_expr(Expr::New(NewExpr {
        type_name: type_name.to_string(),
        arguments: vec![],
        needs_enclosing_instance: false,
        anonymous_body: Some(init_stmts),
    }))
}

pub fn lambda(a: &mut AstArena, body: StmtId) -> ExprId {
    a.alloc_expr(Expr::Lambda(LambdaExpr { body }))
}

pub fn expr_stmt(a: &mut AstArena, e: ExprId) -> StmtId {
    a.alloc_stmt(Stmt::Expression(e))
}

pub fn local(a: &mut AstArena, name: &str, init: Option<ExprId>) -> StmtId {
    a.alloc_stmt(Stmt::Declaration(LocalDecl { name: name.to_string(), init }))
}

pub fn ret(a: &mut AstArena, value: Option<ExprId>) -> StmtId {
    a.alloc_stmt(Stmt::Return(value))
}

pub fn delegate(a: &mut AstArena, target: DelegationTarget, args: Vec<ExprId>) -> StmtId {
    a.alloc_stmt(Stmt::DelegatingCall(DelegatingCall { target, args }))
}

pub fn block(a: &mut AstArena, stmts: Vec<StmtId>) -> StmtId {
    a.alloc_stmt(Stmt::Block(stmts))
}

pub fn if_stmt(a: &mut AstArena, condition: ExprId, then_branch: StmtId, else_branch: Option<StmtId>) -> StmtId {
    a.alloc_stmt(Stmt::If(IfStmt { condition, then_branch, else_branch }))
}

/// The single violation kind of a result expected to hold exactly one.
pub fn only_kind(result: &ValidationResult) -> ViolationKind {
    let violations = result.violations();
    assert_eq!(violations.len(), 1, "expected exactly one violation, got {violations:?}");
    violations[0].kind
}

pub fn kinds(result: &ValidationResult) -> Vec<ViolationKind> {
    result.violations().iter().map(|v| v.kind).collect()
}
