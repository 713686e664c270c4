//! The whole-program model and its mutation entry points.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sigpatch_isa::{Instruction, MethodRef, TypeDesc};

use crate::body::Body;
use crate::class::{Class, Method};
use crate::error::{Error, Result};

/// Index of a class within a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// Stable identity of a method: its class and its index in that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub class: ClassId,
    pub index: usize,
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}/method#{}", self.class.0, self.index)
    }
}

/// Serialized form of a program, before validation.
#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    classes: Vec<Class>,
}

/// A loaded application binary.
///
/// Read-only except through [`Program::replace_body`] and
/// [`Program::replace_instruction_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<String>,
    classes: Vec<Class>,
}

impl Program {
    /// Build a program, checking every structural invariant.
    pub fn new(package: Option<String>, classes: Vec<Class>) -> Result<Self> {
        let program = Self { package, classes };
        program.validate()?;
        Ok(program)
    }

    /// Parse a YAML model listing.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let listing: Listing = serde_yaml::from_slice(bytes)?;
        Self::new(listing.package, listing.classes)
    }

    /// Load a YAML model listing from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        // SAFETY: the mapping is read-only and dropped before returning.
        let map = unsafe { memmap2::Mmap::map(&file)? };
        let program = Self::from_slice(&map)?;
        log::debug!(
            "loaded {} classes from {}",
            program.classes.len(),
            path.display()
        );
        Ok(program)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Application package identifier, when known.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(ClassId)
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.0)
    }

    pub fn class_by_type(&self, ty: &TypeDesc) -> Option<(ClassId, &Class)> {
        self.classes
            .iter()
            .enumerate()
            .find(|(_, c)| &c.ty == ty)
            .map(|(i, c)| (ClassId(i), c))
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.classes.get(id.class.0)?.methods.get(id.index)
    }

    /// Symbolic identity of a method.
    pub fn method_ref(&self, id: MethodId) -> Option<MethodRef> {
        let class = self.classes.get(id.class.0)?;
        let method = class.methods.get(id.index)?;
        Some(method.reference(&class.ty))
    }

    /// Methods of one class, in declaration order.
    pub fn class_methods(&self, id: ClassId) -> impl Iterator<Item = (MethodId, &Method)> + '_ {
        self.classes
            .get(id.0)
            .into_iter()
            .flat_map(move |class| {
                class
                    .methods
                    .iter()
                    .enumerate()
                    .map(move |(index, m)| (MethodId { class: id, index }, m))
            })
    }

    /// Every method of every class, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = (MethodId, &Method)> + '_ {
        self.class_ids().flat_map(move |id| self.class_methods(id))
    }

    /// Check class uniqueness, field identity uniqueness and every body.
    pub fn validate(&self) -> Result<()> {
        let mut types = HashSet::new();
        for class in &self.classes {
            if !types.insert(&class.ty) {
                return Err(Error::DuplicateClass(class.ty.clone()));
            }
            let mut fields = HashSet::new();
            for field in &class.fields {
                if !fields.insert((&field.name, &field.ty)) {
                    return Err(Error::DuplicateField(field.reference(&class.ty)));
                }
            }
            for method in &class.methods {
                if let Some(body) = &method.body {
                    body.validate().map_err(|source| Error::InvalidBody {
                        method: method.reference(&class.ty),
                        source,
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Replace a method's whole body, returning the previous one.
    ///
    /// The method must already have a body; the new body is validated first
    /// and the program is left untouched on error.
    pub fn replace_body(&mut self, id: MethodId, body: Body) -> Result<Body> {
        let (owner, method) = self.locate_mut(id)?;
        if method.body.is_none() {
            return Err(Error::MissingBody(method.reference(&owner)));
        }
        body.validate().map_err(|source| Error::InvalidBody {
            method: method.reference(&owner),
            source,
        })?;
        let previous = method.body.replace(body);
        log::trace!("replaced body of {}", method.reference(&owner));
        previous.ok_or_else(|| Error::MissingBody(method.reference(&owner)))
    }

    /// Replace the instruction at `position`, returning the previous one.
    ///
    /// Positions of all other instructions are unchanged.
    pub fn replace_instruction_at(
        &mut self,
        id: MethodId,
        position: usize,
        insn: Instruction,
    ) -> Result<Instruction> {
        let (owner, method) = self.locate_mut(id)?;
        let method_ref = method.reference(&owner);
        let Some(body) = method.body.as_mut() else {
            return Err(Error::MissingBody(method_ref));
        };
        if position >= body.len() {
            return Err(Error::PositionOutOfBounds {
                method: method_ref,
                position,
                len: body.len(),
            });
        }
        body.check_instruction(position, &insn)
            .map_err(|source| Error::InvalidBody {
                method: method_ref,
                source,
            })?;
        Ok(std::mem::replace(&mut body.instructions[position], insn))
    }

    fn locate_mut(&mut self, id: MethodId) -> Result<(TypeDesc, &mut Method)> {
        let class = self
            .classes
            .get_mut(id.class.0)
            .ok_or(Error::UnknownMethod(id))?;
        let owner = class.ty.clone();
        let method = class
            .methods
            .get_mut(id.index)
            .ok_or(Error::UnknownMethod(id))?;
        Ok((owner, method))
    }
}
