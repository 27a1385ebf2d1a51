use std::collections::HashSet;

use super::{ExprId, StmtId};

/// Target of an explicit constructor invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationTarget {
    This,
    Super,
}

/// Kind of the type declaring the body under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Record,
}

/// What kind of member body the validator is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosingBody {
    /// A constructor. `canonical` is only meaningful for record types.
    Constructor { canonical: bool },
    /// An ordinary (non-constructor) method.
    Method,
    /// An instance-initializer block.
    InitializerBlock,
}

// Statements

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExprId),
    Declaration(LocalDecl),
    If(IfStmt),
    Return(Option<ExprId>),
    DelegatingCall(DelegatingCall),
    /// Declaration of a local class; its body statements run per instance.
    LocalClass(LocalClassDecl),
    Block(Vec<StmtId>),
}

#[derive(Debug, Clone)]
pub struct LocalDecl {
    pub name: String,
    pub init: Option<ExprId>,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprId,
    pub then_branch: StmtId,
    pub else_branch: Option<StmtId>,
}

/// Explicit `this(...)` or `super(...)` constructor invocation statement.
#[derive(Debug, Clone)]
pub struct DelegatingCall {
    pub target: DelegationTarget,
    pub args: Vec<ExprId>,
}

#[derive(Debug, Clone)]
pub struct LocalClassDecl {
    pub name: String,
    pub body: Vec<StmtId>,
}

// Expressions

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    /// Unqualified name: a local variable or parameter, or an instance field
    /// accessed through an implicit `this` (disambiguated against the
    /// context's field set).
    Identifier(String),
    FieldAccess(FieldAccessExpr),
    MethodCall(MethodCallExpr),
    /// `this` or qualified `Outer.this`.
    This(ThisExpr),
    /// `super` or qualified `Iface.super` (default-method dispatch).
    Super(SuperExpr),
    New(NewExpr),
    Lambda(LambdaExpr),
}

#[derive(Debug, Clone)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Char(char),
    Null,
}

#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    /// `None` means an implicit `this` receiver.
    pub target: Option<ExprId>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    /// `None` means an implicit `this` receiver.
    pub target: Option<ExprId>,
    pub name: String,
    pub arguments: Vec<ExprId>,
}

#[derive(Debug, Clone)]
pub struct ThisExpr {
    pub qualifier: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SuperExpr {
    pub qualifier: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub type_name: String,
    pub arguments: Vec<ExprId>,
    /// True for non-static inner classes, whose creation implicitly captures
    /// the enclosing `this`. Array dimensionality of the created type is
    /// irrelevant to every rule and is deliberately not modeled.
    pub needs_enclosing_instance: bool,
    /// Instance-initializer statements of an anonymous class body, if any.
    pub anonymous_body: Option<Vec<StmtId>>,
}

#[derive(Debug, Clone)]
pub struct LambdaExpr {
    pub body: StmtId,
}

// Validation context

/// Metadata about the enclosing type and member, built once per analyzed
/// body and discarded after the pass.
#[derive(Debug, Clone)]
pub struct ConstructorContext {
    pub type_kind: TypeKind,
    /// True when the direct superclass has no accessible no-arg constructor,
    /// so the constructor must delegate explicitly.
    pub requires_explicit_super: bool,
    /// Names of the declared instance fields; used to recognize implicit
    /// `this` in unqualified references.
    pub instance_fields: HashSet<String>,
    pub enclosing: EnclosingBody,
}

impl ConstructorContext {
    /// Context for a class constructor with no explicit-super requirement.
    pub fn class_constructor(fields: impl IntoIterator<Item = String>) -> Self {
        Self {
            type_kind: TypeKind::Class,
            requires_explicit_super: false,
            instance_fields: fields.into_iter().collect(),
            enclosing: EnclosingBody::Constructor { canonical: false },
        }
    }

    /// Context for a record constructor.
    pub fn record_constructor(canonical: bool, fields: impl IntoIterator<Item = String>) -> Self {
        Self {
            type_kind: TypeKind::Record,
            requires_explicit_super: false,
            instance_fields: fields.into_iter().collect(),
            enclosing: EnclosingBody::Constructor { canonical },
        }
    }
}

// Class-level model for the review entry point

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub kind: TypeKind,
    pub requires_explicit_super: bool,
    pub fields: Vec<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone)]
pub enum Member {
    Constructor { canonical: bool, body: StmtId },
    Method { name: String, body: StmtId },
    Initializer { body: StmtId },
}

impl ClassDecl {
    /// Build the validation context for one of this class's members.
    pub fn context_for(&self, member: &Member) -> ConstructorContext {
        let enclosing = match member {
            Member::Constructor { canonical, .. } => EnclosingBody::Constructor { canonical: *canonical },
            Member::Method { .. } => EnclosingBody::Method,
            Member::Initializer { .. } => EnclosingBody::InitializerBlock,
        };
        ConstructorContext {
            type_kind: self.kind,
            requires_explicit_super: self.requires_explicit_super,
            instance_fields: self.fields.iter().cloned().collect(),
            enclosing,
        }
    }
}

impl Member {
    pub fn body(&self) -> StmtId {
        match self {
            Member::Constructor { body, .. } | Member::Method { body, .. } | Member::Initializer { body } => *body,
        }
    }
}
