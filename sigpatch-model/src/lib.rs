//! Code unit model for sigpatch.
//!
//! A [`Program`] holds every class of a loaded application binary with its
//! fields, methods and method bodies. Entities are addressed by stable
//! indices ([`ClassId`], [`MethodId`]) and by binary-wide symbolic
//! identities ([`FieldRef`], [`MethodRef`]).

pub mod body;
pub mod builder;
pub mod class;
pub mod constant_pool;
pub mod error;
pub mod modifiers;
pub mod program;
pub mod types;

pub use body::{Body, BodyError};
pub use class::{Class, Field, Method};
pub use constant_pool::ConstantPool;
pub use error::{Error, Result};
pub use program::{ClassId, MethodId, Program};
pub use types::{ReturnKind, ReturnValue};

pub use sigpatch_isa::{FieldRef, Instruction, MethodRef, TypeDesc};
