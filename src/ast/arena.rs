use super::{Expr, ExprId, Stmt, StmtId};
use crate::error::{Error, Result};

/// Flat storage for one constructor body's statement and expression nodes.
///
/// Ids handed out by `alloc_*` are stable for the lifetime of the arena.
/// Lookups are checked: a dangling id is an internal-invariant error, not a
/// panic, so a malformed tree aborts the validation pass without taking the
/// process down.
#[derive(Debug, Clone, Default)]
pub struct AstArena {
    stmts: Vec<Stmt>,
    exprs: Vec<Expr>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn stmt(&self, id: StmtId) -> Result<&Stmt> {
        self.stmts
            .get(id.index())
            .ok_or_else(|| Error::malformed(format!("dangling statement id {}", id.index())))
    }

    pub fn expr(&self, id: ExprId) -> Result<&Expr> {
        self.exprs
            .get(id.index())
            .ok_or_else(|| Error::malformed(format!("dangling expression id {}", id.index())))
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}
