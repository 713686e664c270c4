//! Type descriptors and symbolic field/method references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A type descriptor in JVM/Dalvik notation (`Z`, `I`, `Lcom/example/Foo;`, `[I`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDesc(String);

impl TypeDesc {
    pub const VOID: &'static str = "V";
    pub const BOOLEAN: &'static str = "Z";
    pub const INT: &'static str = "I";
    pub const BOXED_INTEGER: &'static str = "Ljava/lang/Integer;";

    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    pub fn void() -> Self {
        Self::new(Self::VOID)
    }

    pub fn boolean() -> Self {
        Self::new(Self::BOOLEAN)
    }

    pub fn int() -> Self {
        Self::new(Self::INT)
    }

    pub fn boxed_integer() -> Self {
        Self::new(Self::BOXED_INTEGER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_void(&self) -> bool {
        self.0 == Self::VOID
    }

    pub fn is_boolean(&self) -> bool {
        self.0 == Self::BOOLEAN
    }

    pub fn is_int(&self) -> bool {
        self.0 == Self::INT
    }

    /// `int` or one of the sub-int integral primitives.
    pub fn is_narrow_integer(&self) -> bool {
        matches!(self.0.as_str(), "I" | "S" | "B" | "C")
    }

    pub fn is_boxed_integer(&self) -> bool {
        self.0 == Self::BOXED_INTEGER
    }

    pub fn is_reference(&self) -> bool {
        self.0.starts_with('L') || self.0.starts_with('[')
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeDesc {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeDesc {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for TypeDesc {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeDesc {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Binary-wide field identity: owning class, name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldRef {
    pub owner: TypeDesc,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

impl FieldRef {
    pub fn new(
        owner: impl Into<TypeDesc>,
        name: impl Into<String>,
        ty: impl Into<TypeDesc>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}:{}", self.owner, self.name, self.ty)
    }
}

/// Binary-wide method identity: owning class, name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodRef {
    pub owner: TypeDesc,
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeDesc>,
    pub ret: TypeDesc,
}

impl MethodRef {
    pub fn new(
        owner: impl Into<TypeDesc>,
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        ret: impl Into<TypeDesc>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            params,
            ret: ret.into(),
        }
    }

    /// The `(params)ret` descriptor.
    pub fn descriptor(&self) -> String {
        let mut out = String::from("(");
        for p in &self.params {
            out.push_str(p.as_str());
        }
        out.push(')');
        out.push_str(self.ret.as_str());
        out
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}{}", self.owner, self.name, self.descriptor())
    }
}
