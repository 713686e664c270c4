//! Classes, fields and methods.

use serde::{Deserialize, Serialize};
use sigpatch_isa::{FieldRef, Instruction, MethodRef, TypeDesc};

use crate::body::Body;
use crate::modifiers::{ACC_ABSTRACT, ACC_NATIVE, ACC_STATIC};
use crate::types::ReturnKind;

/// A field declaration. Its owner is the enclosing [`Class`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    #[serde(default)]
    pub access_flags: u32,
}

impl Field {
    /// The binary-wide identity of this field when declared by `owner`.
    pub fn reference(&self, owner: &TypeDesc) -> FieldRef {
        FieldRef::new(owner.clone(), self.name.clone(), self.ty.clone())
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }
}

/// A method declaration with an optional body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeDesc>,
    pub ret: TypeDesc,
    #[serde(default)]
    pub access_flags: u32,
    /// Absent for abstract and native methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Method {
    pub fn reference(&self, owner: &TypeDesc) -> MethodRef {
        MethodRef::new(
            owner.clone(),
            self.name.clone(),
            self.params.clone(),
            self.ret.clone(),
        )
    }

    pub fn return_kind(&self) -> ReturnKind {
        ReturnKind::of(&self.ret)
    }

    /// The body's instructions, or an empty slice for bodyless methods.
    pub fn instructions(&self) -> &[Instruction] {
        match &self.body {
            Some(body) => body.instructions(),
            None => &[],
        }
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn is_abstract_or_native(&self) -> bool {
        self.access_flags & (ACC_ABSTRACT | ACC_NATIVE) != 0
    }

    /// `<init>` or `<clinit>`.
    pub fn is_constructor(&self) -> bool {
        self.name == "<init>" || self.name == "<clinit>"
    }

    /// Whether any instruction in the body reads `field`.
    pub fn reads_field(&self, field: &FieldRef) -> bool {
        self.instructions()
            .iter()
            .any(|insn| insn.field_read() == Some(field))
    }
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Class {
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<TypeDesc>,
    #[serde(default)]
    pub access_flags: u32,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Class {
    pub fn new(ty: impl Into<TypeDesc>) -> Self {
        Self {
            ty: ty.into(),
            super_class: None,
            access_flags: 0,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Identities of the declared fields, in declaration order.
    pub fn field_refs(&self) -> impl Iterator<Item = FieldRef> + '_ {
        self.fields.iter().map(|f| f.reference(&self.ty))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First method with the given name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}
