use sigpatch_model::{MethodRef, ReturnKind, ReturnValue};
use thiserror::Error;

/// Rewrite failures. Every variant is a structural problem.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Model(#[from] sigpatch_model::Error),

    #[error("{0} has no body to rewrite")]
    MissingBody(MethodRef),

    #[error("{method} returns {expected}, cannot force {value}")]
    ReturnKindMismatch {
        method: MethodRef,
        expected: ReturnKind,
        value: ReturnValue,
    },

    #[error("{method} position {position} no longer reads the planned field")]
    StaleSite { method: MethodRef, position: usize },
}

pub type Result<T> = std::result::Result<T, RewriteError>;
