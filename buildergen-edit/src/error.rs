//! Error types for buildergen-edit.
//!
//! Both variants mean no write session was opened; the model was not touched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Another session holds the model (only from `try_begin_write`).
    #[error("program model `{model}` is held by another write session")]
    Busy { model: String },

    /// A previous session panicked while holding the model.
    #[error("program model `{model}` was poisoned by a panicking write session")]
    Poisoned { model: String },
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;

    #[test]
    fn messages_name_the_model() {
        let busy = EditError::Busy {
            model: "src/main/java".to_string(),
        };
        assert!(busy.to_string().contains("src/main/java"));
        assert!(busy.to_string().contains("another write session"));

        let poisoned = EditError::Poisoned {
            model: "pkg".to_string(),
        };
        assert!(poisoned.to_string().contains("poisoned"));
    }
}
