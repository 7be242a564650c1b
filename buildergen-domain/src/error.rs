//! Error types for buildergen-domain.
//!
//! Unclassified field types are not errors; only structural creation problems are.

use crate::ports::ClassId;
use thiserror::Error;

/// A class or member could not be created at the target location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationFailure {
    /// A declaration with the requested name already exists.
    #[error("a declaration named `{name}` already exists")]
    NameCollision { name: String },

    #[error("`{name}` is not a valid Java identifier")]
    InvalidIdentifier { name: String },

    #[error("target location `{location}` is read-only")]
    ReadOnlyLocation { location: String },

    /// The location refused to insert a member.
    #[error("{member} rejected: {reason}")]
    MemberRejected { member: String, reason: String },

    #[error("no class {id} at this location")]
    UnknownClass { id: ClassId },
}

/// Synthesis aborted; names the class that was being created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot create class {class_name}: {failure}")]
pub struct SynthesisError {
    pub class_name: String,

    #[source]
    pub failure: CreationFailure,
}

impl SynthesisError {
    pub fn new(class_name: impl Into<String>, failure: CreationFailure) -> Self {
        Self {
            class_name: class_name.into(),
            failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_error_names_the_class() {
        let err = SynthesisError::new(
            "PersonBuilder",
            CreationFailure::NameCollision {
                name: "PersonBuilder".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("cannot create class PersonBuilder"));
        assert!(msg.contains("already exists"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
