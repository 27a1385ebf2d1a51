//! ctorlint
//!
//! A constructor-prologue validator for Java-style constructor bodies: given
//! an already-parsed statement tree and the enclosing type's metadata, it
//! decides whether an explicit `this(...)`/`super(...)` delegation is
//! present, unconditionally reachable, and preceded only by allow-listed
//! statements.
//!
//! ## Architecture
//!
//! - **ast**: arena-backed statement/expression model plus the per-body
//!   validation context
//! - **review**: the validation pass (classification + prologue rule engine)
//! - **error**: internal-invariant errors of the pass itself
//!
//! ## Validation Flow
//!
//! ```text
//! AST + ConstructorContext → review::validate → ValidationResult
//!                                  ↓
//!                  BeforeDelegation → AfterDelegation
//! ```
//!
//! Producing the tree (lexing, parsing) and rendering diagnostics with
//! source positions are external collaborators' responsibilities; violations
//! carry the offending statement's arena id for the reporter to resolve.

pub mod ast;
pub mod error;
pub mod review;

pub use error::{Error, Result};
pub use review::{review_class, validate, ValidationResult, Violation, ViolationKind};
