//! Return kinds and forced return values.

use std::fmt;

use sigpatch_isa::TypeDesc;

/// Declared return kind of a method, derived from its return descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Void,
    Boolean,
    /// `int` and the narrower integral primitives.
    Integer,
    Object,
    /// `long`, `float`, `double`.
    Other,
}

impl ReturnKind {
    pub fn of(ty: &TypeDesc) -> Self {
        if ty.is_void() {
            ReturnKind::Void
        } else if ty.is_boolean() {
            ReturnKind::Boolean
        } else if ty.is_narrow_integer() {
            ReturnKind::Integer
        } else if ty.is_reference() {
            ReturnKind::Object
        } else {
            ReturnKind::Other
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnKind::Void => "void",
            ReturnKind::Boolean => "boolean",
            ReturnKind::Integer => "integer",
            ReturnKind::Object => "object",
            ReturnKind::Other => "wide/floating",
        })
    }
}

/// A value a method can be forced to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnValue {
    Void,
    Boolean(bool),
    Integer(i32),
    Null,
}

impl ReturnValue {
    pub fn kind(&self) -> ReturnKind {
        match self {
            ReturnValue::Void => ReturnKind::Void,
            ReturnValue::Boolean(_) => ReturnKind::Boolean,
            ReturnValue::Integer(_) => ReturnKind::Integer,
            ReturnValue::Null => ReturnKind::Object,
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnValue::Void => f.write_str("void"),
            ReturnValue::Boolean(b) => write!(f, "{b}"),
            ReturnValue::Integer(v) => write!(f, "{v}"),
            ReturnValue::Null => f.write_str("null"),
        }
    }
}
