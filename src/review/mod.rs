//! Constructor-prologue review pass.
//!
//! Decides whether the statements preceding an explicit `this(...)` or
//! `super(...)` delegation are permitted, and whether the delegation itself
//! is present, unconditional, and legal for the enclosing type.

use crate::ast::{AstArena, ClassDecl, StmtId};
use crate::error::Result;

mod classify;
mod prologue;

pub use classify::{classify_expr, ThisLikeness};
pub use prologue::{validate, MAX_NESTING_DEPTH};

/// The diagnostic taxonomy. Every violation is compile-time-reportable; none
/// are ever raised as panics.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("cannot reference 'this' or 'super' before the delegating constructor call")]
    IllegalThisOrSuperReference,
    #[error("cannot return before the delegating constructor call")]
    IllegalReturnBeforeDelegation,
    #[error("cannot create an inner-class instance before the delegating constructor call")]
    IllegalInstanceCreationBeforeDelegation,
    #[error("constructor must delegate explicitly with 'this(...)' or 'super(...)'")]
    MissingDelegation,
    #[error("delegating constructor call is only allowed at the head of a constructor body")]
    MisplacedDelegation,
    #[error("record constructors may not invoke 'super(...)'")]
    IllegalSuperInRecord,
    #[error("'this(...)' may not reference the instance under construction in its arguments")]
    SelfReferentialDelegation,
}

/// One diagnostic, tied to the offending statement's arena id.
///
/// A statement triggering several rules reports its most specific kind once;
/// see DESIGN.md for the deterministic priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub stmt: StmtId,
    pub kind: ViolationKind,
}

/// Outcome of validating one body (or one whole class).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Ok,
    Violations(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Ok => &[],
            ValidationResult::Violations(v) => v,
        }
    }
}

impl From<Vec<Violation>> for ValidationResult {
    fn from(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            ValidationResult::Ok
        } else {
            ValidationResult::Violations(violations)
        }
    }
}

/// Review every executable member body of a class declaration.
///
/// Builds the right [`crate::ast::ConstructorContext`] per member, so
/// delegating calls inside ordinary methods and instance-initializer blocks
/// are caught without the caller assembling contexts by hand.
pub fn review_class(arena: &AstArena, class: &ClassDecl) -> Result<ValidationResult> {
    log::debug!("review start: class={} members={}", class.name, class.members.len());
    let mut all = Vec::new();
    for member in &class.members {
        let ctx = class.context_for(member);
        if let ValidationResult::Violations(v) = validate(&ctx, arena, member.body())? {
            all.extend(v);
        }
    }
    log::debug!("review end: class={} violations={}", class.name, all.len());
    Ok(ValidationResult::from(all))
}
