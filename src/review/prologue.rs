use log::debug;

use crate::ast::{
    AstArena, ConstructorContext, DelegatingCall, DelegationTarget, EnclosingBody, Expr, ExprId, Stmt, StmtId,
    TypeKind,
};
use crate::error::{Error, Result};

use super::classify::{classify_expr, ThisLikeness};
use super::{ValidationResult, Violation, ViolationKind};

/// Recursion bound over statement and expression nesting. Also terminates
/// cyclic id graphs, which count as malformed input.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Validate one member body against the prologue rules.
///
/// `body` must resolve to a `Stmt::Block`. The returned `Err` covers only
/// malformed input (dangling ids, non-block body, nesting past
/// [`MAX_NESTING_DEPTH`]); illegal-but-well-formed input comes back as
/// [`ValidationResult::Violations`], one violation per offending statement.
pub fn validate(ctx: &ConstructorContext, arena: &AstArena, body: StmtId) -> Result<ValidationResult> {
    debug!("prologue validation start: enclosing={:?} type={:?}", ctx.enclosing, ctx.type_kind);
    let top: Vec<StmtId> = match arena.stmt(body)? {
        Stmt::Block(stmts) => stmts.clone(),
        _ => return Err(Error::malformed("member body must be a block statement")),
    };
    let mut out = Vec::new();
    match ctx.enclosing {
        // Outside a constructor nothing is restricted except delegating
        // calls, which are illegal anywhere in these bodies.
        EnclosingBody::Method | EnclosingBody::InitializerBlock => {
            for &sid in &top {
                flag_nested_delegations(ctx, arena, sid, 0, false, &mut out)?;
            }
        }
        EnclosingBody::Constructor { canonical } => {
            validate_constructor_body(ctx, arena, body, &top, canonical, &mut out)?;
        }
    }
    debug!("prologue validation end: violations={}", out.len());
    Ok(ValidationResult::from(out))
}

fn validate_constructor_body(
    ctx: &ConstructorContext,
    arena: &AstArena,
    body: StmtId,
    top: &[StmtId],
    canonical: bool,
    out: &mut Vec<Violation>,
) -> Result<()> {
    // Locate the top-level delegating call. When there is none, the implicit
    // super() runs at the head of the body, so every statement executes past
    // delegation and only rule 4 (required-but-missing) can fire.
    let mut delegation_at = None;
    for (i, &sid) in top.iter().enumerate() {
        if matches!(arena.stmt(sid)?, Stmt::DelegatingCall(_)) {
            delegation_at = Some(i);
            break;
        }
    }

    let Some(call_index) = delegation_at else {
        for &sid in top {
            flag_nested_delegations(ctx, arena, sid, 0, false, out)?;
        }
        let required = match ctx.type_kind {
            // A non-canonical record constructor must delegate via this(...).
            TypeKind::Record => !canonical,
            TypeKind::Class => ctx.requires_explicit_super,
        };
        if required {
            out.push(Violation { stmt: body, kind: ViolationKind::MissingDelegation });
        }
        return Ok(());
    };

    for &sid in &top[..call_index] {
        check_prologue_stmt(ctx, arena, sid, 0, out)?;
    }
    let call_id = top[call_index];
    if let Stmt::DelegatingCall(call) = arena.stmt(call_id)? {
        check_delegating_call(ctx, arena, call_id, call, canonical, out)?;
    }
    // Past the delegation the prologue restrictions are lifted; only further
    // delegating calls (including a second top-level one) remain illegal.
    for &sid in &top[call_index + 1..] {
        flag_nested_delegations(ctx, arena, sid, 0, false, out)?;
    }
    Ok(())
}

/// Rules 3 and 7: the delegating call statement itself.
fn check_delegating_call(
    ctx: &ConstructorContext,
    arena: &AstArena,
    sid: StmtId,
    call: &DelegatingCall,
    canonical: bool,
    out: &mut Vec<Violation>,
) -> Result<()> {
    // Argument subtrees run before the delegation completes, so they are
    // still in the before-delegation state. Class bodies in the arguments
    // have their own `this`; lambdas do not, so their mentions still count.
    // Delegating calls hidden inside either are flagged on their own ids.
    let mut scan = ExprScan::default();
    for &arg in &call.args {
        scan_expr(ctx, arena, arg, 1, false, BodyPolicy::OwnThis, &mut scan, out)?;
    }

    let kind = if ctx.type_kind == TypeKind::Record {
        match call.target {
            DelegationTarget::Super => Some(ViolationKind::IllegalSuperInRecord),
            // The canonical constructor delegates implicitly; no explicit
            // delegation of any form is legal there.
            DelegationTarget::This if canonical => Some(ViolationKind::MisplacedDelegation),
            DelegationTarget::This => argument_kind(call.target, &scan),
        }
    } else {
        argument_kind(call.target, &scan)
    };
    if let Some(kind) = kind {
        out.push(Violation { stmt: sid, kind });
    }
    Ok(())
}

fn argument_kind(target: DelegationTarget, scan: &ExprScan) -> Option<ViolationKind> {
    if scan.saw_this_like {
        Some(match target {
            DelegationTarget::This => ViolationKind::SelfReferentialDelegation,
            DelegationTarget::Super => ViolationKind::IllegalThisOrSuperReference,
        })
    } else if scan.saw_enclosing_creation {
        Some(ViolationKind::IllegalInstanceCreationBeforeDelegation)
    } else {
        None
    }
}

/// Kind for a delegating call found anywhere other than the head of a
/// constructor body. An explicit super() in a record constructor trips both
/// the record rule and the placement rule; the record rule is the more
/// specific kind. Inside a nested class body the call belongs to that class,
/// not the record, so the placement rule wins again.
fn nested_delegation_kind(ctx: &ConstructorContext, call: &DelegatingCall, in_class_body: bool) -> ViolationKind {
    if !in_class_body
        && ctx.type_kind == TypeKind::Record
        && call.target == DelegationTarget::Super
        && matches!(ctx.enclosing, EnclosingBody::Constructor { .. })
    {
        ViolationKind::IllegalSuperInRecord
    } else {
        ViolationKind::MisplacedDelegation
    }
}

/// Rules 1 and 2: one statement of the prologue prefix. Nested blocks and
/// ifs recurse; every other construct is either on the allow-list or flagged
/// with its most specific kind.
fn check_prologue_stmt(
    ctx: &ConstructorContext,
    arena: &AstArena,
    sid: StmtId,
    depth: usize,
    out: &mut Vec<Violation>,
) -> Result<()> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    }
    match arena.stmt(sid)? {
        Stmt::Expression(eid) => {
            // Only literal-only expression statements are on the allow-list.
            if matches!(arena.expr(*eid)?, Expr::Literal(_)) {
                return Ok(());
            }
            let mut scan = ExprScan::default();
            scan_expr(ctx, arena, *eid, depth + 1, false, BodyPolicy::CaptureThis, &mut scan, out)?;
            let kind = if scan.saw_enclosing_creation {
                ViolationKind::IllegalInstanceCreationBeforeDelegation
            } else {
                // Without a symbol table a receiverless or type-qualified
                // call cannot be proven static, so anything short of a
                // literal counts as touching the instance under construction.
                ViolationKind::IllegalThisOrSuperReference
            };
            out.push(Violation { stmt: sid, kind });
        }
        Stmt::Declaration(decl) => {
            // Local declarations are allowed as long as the initializer never
            // reaches this/super, directly or through an implicit receiver.
            if let Some(init) = decl.init {
                let mut scan = ExprScan::default();
                scan_expr(ctx, arena, init, depth + 1, false, BodyPolicy::CaptureThis, &mut scan, out)?;
                if scan.saw_this_like {
                    out.push(Violation { stmt: sid, kind: ViolationKind::IllegalThisOrSuperReference });
                } else if scan.saw_enclosing_creation {
                    out.push(Violation { stmt: sid, kind: ViolationKind::IllegalInstanceCreationBeforeDelegation });
                }
            }
        }
        Stmt::Return(value) => {
            out.push(Violation { stmt: sid, kind: ViolationKind::IllegalReturnBeforeDelegation });
            // The return is this statement's verdict, but its value can still
            // hide a delegating call inside a nested body.
            if let Some(eid) = value {
                let mut scan = ExprScan::default();
                scan_expr(ctx, arena, *eid, depth + 1, false, BodyPolicy::OwnThis, &mut scan, out)?;
            }
        }
        Stmt::DelegatingCall(call) => {
            // Reached only through a nested block or branch; the top-level
            // call is handled by the caller. Never legal here.
            out.push(Violation { stmt: sid, kind: nested_delegation_kind(ctx, call, false) });
            let mut scan = ExprScan::default();
            for &arg in &call.args {
                scan_expr(ctx, arena, arg, depth + 1, false, BodyPolicy::OwnThis, &mut scan, out)?;
            }
        }
        Stmt::Block(stmts) => {
            for &inner in stmts {
                check_prologue_stmt(ctx, arena, inner, depth + 1, out)?;
            }
        }
        Stmt::If(if_stmt) => {
            let mut scan = ExprScan::default();
            scan_expr(ctx, arena, if_stmt.condition, depth + 1, false, BodyPolicy::CaptureThis, &mut scan, out)?;
            if scan.saw_this_like {
                out.push(Violation { stmt: sid, kind: ViolationKind::IllegalThisOrSuperReference });
            } else if scan.saw_enclosing_creation {
                out.push(Violation { stmt: sid, kind: ViolationKind::IllegalInstanceCreationBeforeDelegation });
            }
            check_prologue_stmt(ctx, arena, if_stmt.then_branch, depth + 1, out)?;
            if let Some(else_branch) = if_stmt.else_branch {
                check_prologue_stmt(ctx, arena, else_branch, depth + 1, out)?;
            }
        }
        Stmt::LocalClass(local) => {
            // A local class declaration is fine as long as its body neither
            // mentions this/super of the enclosing instance nor hides a
            // delegating call.
            let mut scan = ExprScan::default();
            scan_body_stmts(ctx, arena, &local.body, depth + 1, true, BodyPolicy::CaptureThis, &mut scan, out)?;
            if scan.saw_this_like {
                out.push(Violation { stmt: sid, kind: ViolationKind::IllegalThisOrSuperReference });
            }
        }
    }
    Ok(())
}

/// After-delegation / non-constructor mode: everything is permitted except
/// delegating calls, wherever they hide. `in_class_body` is true once the
/// walk has entered a nested class body, whose delegations are that class's
/// problem rather than the record rule's.
fn flag_nested_delegations(
    ctx: &ConstructorContext,
    arena: &AstArena,
    sid: StmtId,
    depth: usize,
    in_class_body: bool,
    out: &mut Vec<Violation>,
) -> Result<()> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    }
    let mut scan = ExprScan::default();
    match arena.stmt(sid)? {
        Stmt::DelegatingCall(call) => {
            out.push(Violation { stmt: sid, kind: nested_delegation_kind(ctx, call, in_class_body) });
            for &arg in &call.args {
                scan_expr(ctx, arena, arg, depth + 1, in_class_body, BodyPolicy::OwnThis, &mut scan, out)?;
            }
        }
        Stmt::Expression(eid) => {
            scan_expr(ctx, arena, *eid, depth + 1, in_class_body, BodyPolicy::OwnThis, &mut scan, out)?;
        }
        Stmt::Declaration(decl) => {
            if let Some(init) = decl.init {
                scan_expr(ctx, arena, init, depth + 1, in_class_body, BodyPolicy::OwnThis, &mut scan, out)?;
            }
        }
        Stmt::Return(value) => {
            if let Some(eid) = value {
                scan_expr(ctx, arena, *eid, depth + 1, in_class_body, BodyPolicy::OwnThis, &mut scan, out)?;
            }
        }
        Stmt::If(if_stmt) => {
            scan_expr(ctx, arena, if_stmt.condition, depth + 1, in_class_body, BodyPolicy::OwnThis, &mut scan, out)?;
            flag_nested_delegations(ctx, arena, if_stmt.then_branch, depth + 1, in_class_body, out)?;
            if let Some(else_branch) = if_stmt.else_branch {
                flag_nested_delegations(ctx, arena, else_branch, depth + 1, in_class_body, out)?;
            }
        }
        Stmt::Block(stmts) => {
            for &inner in stmts {
                flag_nested_delegations(ctx, arena, inner, depth + 1, in_class_body, out)?;
            }
        }
        Stmt::LocalClass(local) => {
            for &inner in &local.body {
                flag_nested_delegations(ctx, arena, inner, depth + 1, true, out)?;
            }
        }
    }
    Ok(())
}

/// How explicit this/super mentions inside a nested class body relate to the
/// instance under construction. Lambdas are not class bodies: they have no
/// `this` of their own, so the walk treats them as transparent and this
/// policy never applies to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyPolicy {
    /// Prologue statements: an explicit `this`/`super` inside a nested class
    /// body still taints the statement (rule 2).
    CaptureThis,
    /// Delegation arguments and after-delegation code: a nested class body's
    /// `this` is its own instance and never taints anything.
    OwnThis,
}

#[derive(Debug, Default)]
struct ExprScan {
    saw_this_like: bool,
    saw_enclosing_creation: bool,
}

/// Walk an expression tree, recording this-likeness and enclosing-instance
/// creations, and flagging delegating calls hidden inside nested bodies.
fn scan_expr(
    ctx: &ConstructorContext,
    arena: &AstArena,
    eid: ExprId,
    depth: usize,
    in_class_body: bool,
    policy: BodyPolicy,
    scan: &mut ExprScan,
    out: &mut Vec<Violation>,
) -> Result<()> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    }
    let expr = arena.expr(eid)?;
    match classify_expr(ctx, expr) {
        ThisLikeness::NotThisLike => {}
        ThisLikeness::ThisLike | ThisLikeness::SuperDispatch => {
            let counts = if !in_class_body {
                true
            } else {
                // Inside a nested class body, implicit receivers belong to
                // the nested instance; only explicit this/super mentions
                // count, and only while the prologue rules apply.
                policy == BodyPolicy::CaptureThis && matches!(expr, Expr::This(_) | Expr::Super(_))
            };
            if counts {
                scan.saw_this_like = true;
            }
        }
    }
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) | Expr::This(_) | Expr::Super(_) => {}
        Expr::FieldAccess(f) => {
            if let Some(target) = f.target {
                scan_expr(ctx, arena, target, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Expr::MethodCall(m) => {
            if let Some(target) = m.target {
                scan_expr(ctx, arena, target, depth + 1, in_class_body, policy, scan, out)?;
            }
            for &arg in &m.arguments {
                scan_expr(ctx, arena, arg, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Expr::New(creation) => {
            if creation.needs_enclosing_instance && !in_class_body {
                scan.saw_enclosing_creation = true;
            }
            for &arg in &creation.arguments {
                scan_expr(ctx, arena, arg, depth + 1, in_class_body, policy, scan, out)?;
            }
            if let Some(body) = &creation.anonymous_body {
                scan_body_stmts(ctx, arena, body, depth + 1, true, policy, scan, out)?;
            }
        }
        Expr::Lambda(lambda) => {
            // A lambda body executes in the enclosing scope's `this`.
            scan_body_stmt(ctx, arena, lambda.body, depth + 1, in_class_body, policy, scan, out)?;
        }
    }
    Ok(())
}

fn scan_body_stmts(
    ctx: &ConstructorContext,
    arena: &AstArena,
    stmts: &[StmtId],
    depth: usize,
    in_class_body: bool,
    policy: BodyPolicy,
    scan: &mut ExprScan,
    out: &mut Vec<Violation>,
) -> Result<()> {
    for &sid in stmts {
        scan_body_stmt(ctx, arena, sid, depth, in_class_body, policy, scan, out)?;
    }
    Ok(())
}

/// Statement walker for code nested inside an expression body. Delegating
/// calls found here are always misplaced and are reported on their own ids.
fn scan_body_stmt(
    ctx: &ConstructorContext,
    arena: &AstArena,
    sid: StmtId,
    depth: usize,
    in_class_body: bool,
    policy: BodyPolicy,
    scan: &mut ExprScan,
    out: &mut Vec<Violation>,
) -> Result<()> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    }
    match arena.stmt(sid)? {
        Stmt::DelegatingCall(call) => {
            out.push(Violation { stmt: sid, kind: nested_delegation_kind(ctx, call, in_class_body) });
            for &arg in &call.args {
                scan_expr(ctx, arena, arg, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Stmt::Expression(eid) => {
            scan_expr(ctx, arena, *eid, depth + 1, in_class_body, policy, scan, out)?;
        }
        Stmt::Declaration(decl) => {
            if let Some(init) = decl.init {
                scan_expr(ctx, arena, init, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Stmt::Return(value) => {
            if let Some(eid) = value {
                scan_expr(ctx, arena, *eid, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Stmt::If(if_stmt) => {
            scan_expr(ctx, arena, if_stmt.condition, depth + 1, in_class_body, policy, scan, out)?;
            scan_body_stmt(ctx, arena, if_stmt.then_branch, depth + 1, in_class_body, policy, scan, out)?;
            if let Some(else_branch) = if_stmt.else_branch {
                scan_body_stmt(ctx, arena, else_branch, depth + 1, in_class_body, policy, scan, out)?;
            }
        }
        Stmt::Block(stmts) => {
            scan_body_stmts(ctx, arena, stmts, depth + 1, in_class_body, policy, scan, out)?;
        }
        Stmt::LocalClass(local) => {
            scan_body_stmts(ctx, arena, &local.body, depth + 1, true, policy, scan, out)?;
        }
    }
    Ok(())
}
