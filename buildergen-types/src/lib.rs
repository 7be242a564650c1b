//! Shared DTOs (schemas-as-code) for the buildergen workspace.
//!
//! # Design constraints
//! - Source classes arrive from a host as JSON; generated classes may be emitted as JSON.
//! - Declarations are plain values: the engine copies them, it never edits a host's original.
//! - Prefer adding optional fields over changing semantics.

pub mod decl;
pub mod member;
pub mod ty;

pub use decl::{Annotation, Expression, FieldDeclaration, Modifier, SourceClass};
pub use member::{
    ConstructorDecl, GeneratedClass, GeneratedMember, MemberKind, MethodDecl, Parameter, Statement,
};
pub use ty::{PrimitiveType, TypeParseError, TypeRef, WildcardBound};

/// Schema identifiers.
pub mod schema {
    pub const BUILDERGEN_SOURCE_V1: &str = "buildergen.source.v1";
    pub const BUILDERGEN_CLASS_V1: &str = "buildergen.class.v1";
}
