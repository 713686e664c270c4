use sigpatch_isa::{FieldRef, MethodRef, TypeDesc};
use thiserror::Error;

use crate::body::BodyError;
use crate::program::MethodId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model listing: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no method with id {0}")]
    UnknownMethod(MethodId),

    #[error("class {0} is defined more than once")]
    DuplicateClass(TypeDesc),

    #[error("field {0} is declared more than once")]
    DuplicateField(FieldRef),

    #[error("{0} has no body")]
    MissingBody(MethodRef),

    #[error("position {position} is out of bounds in {method} ({len} instructions)")]
    PositionOutOfBounds {
        method: MethodRef,
        position: usize,
        len: usize,
    },

    #[error("malformed body in {method}: {source}")]
    InvalidBody {
        method: MethodRef,
        #[source]
        source: BodyError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
