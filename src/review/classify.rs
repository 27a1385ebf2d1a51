use crate::ast::{ConstructorContext, Expr};

/// How an expression node relates to the instance under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThisLikeness {
    /// Does not denote the instance under construction.
    NotThisLike,
    /// Denotes `this`: bare, qualified `Outer.this`, or implicit via an
    /// unqualified instance member reference.
    ThisLike,
    /// Dispatches through `super`, bare or qualified `Iface.super`.
    SuperDispatch,
}

/// Classify a single expression node against the validation context.
///
/// This is the one place that knows what counts as "this-like"; the rule
/// engine never inspects expression shapes for this question itself. The
/// classification is shallow by design: receivers and arguments are walked
/// by the caller, which re-classifies each node it visits.
pub fn classify_expr(ctx: &ConstructorContext, expr: &Expr) -> ThisLikeness {
    match expr {
        Expr::This(_) => ThisLikeness::ThisLike,
        Expr::Super(_) => ThisLikeness::SuperDispatch,
        // Unqualified names resolve to an instance field through an implicit
        // `this` when they shadow nothing local; locals and parameters are
        // whatever the field set does not claim.
        Expr::Identifier(name) if ctx.instance_fields.contains(name) => ThisLikeness::ThisLike,
        // A missing receiver is an implicit `this` receiver.
        Expr::FieldAccess(f) if f.target.is_none() => ThisLikeness::ThisLike,
        Expr::MethodCall(m) if m.target.is_none() => ThisLikeness::ThisLike,
        _ => ThisLikeness::NotThisLike,
    }
}
