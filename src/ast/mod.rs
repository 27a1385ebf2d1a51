//! Abstract syntax model for constructor bodies.
//!
//! Nodes are closed tagged unions stored in an [`AstArena`], with children
//! referenced by index ([`StmtId`], [`ExprId`]) rather than by owning
//! pointers, so anonymous-class bodies that capture enclosing constructs
//! cannot form ownership cycles. Producing this tree (lexing, parsing) is an
//! external collaborator's responsibility; the arena is never mutated during
//! validation.

mod arena;
mod nodes;

pub use arena::*;
pub use nodes::*;

/// Index of a statement in an [`AstArena`].
///
/// Doubles as the opaque per-statement identifier that violations carry
/// through to the diagnostic reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtId(pub(crate) u32);

/// Index of an expression in an [`AstArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub(crate) u32);

impl StmtId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
