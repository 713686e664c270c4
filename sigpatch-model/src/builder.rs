//! Fluent construction of programs, mainly for fixtures and tooling.
//!
//! ```
//! use sigpatch_isa::{insn, Reg, TypeDesc};
//! use sigpatch_model::builder::{ClassBuilder, MethodBuilder, ProgramBuilder};
//!
//! let program = ProgramBuilder::new()
//!     .package("com.example")
//!     .class(
//!         ClassBuilder::new("Lcom/example/Flags;")
//!             .field("enabled", "Z")
//!             .method(
//!                 MethodBuilder::new("isOn", vec![], TypeDesc::boolean())
//!                     .code([insn::const_int(Reg(0), 1), insn::ret(Reg(0))])
//!                     .build(),
//!             )
//!             .build(),
//!     )
//!     .build()?;
//! assert_eq!(program.classes().len(), 1);
//! # Ok::<(), sigpatch_model::Error>(())
//! ```

use sigpatch_isa::{Instruction, TypeDesc};

use crate::body::Body;
use crate::class::{Class, Field, Method};
use crate::error::Result;
use crate::modifiers::{ACC_ABSTRACT, ACC_CONSTRUCTOR, ACC_PUBLIC, ACC_STATIC};
use crate::program::Program;

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    package: Option<String>,
    classes: Vec<Class>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    pub fn classes(mut self, classes: impl IntoIterator<Item = Class>) -> Self {
        self.classes.extend(classes);
        self
    }

    pub fn build(self) -> Result<Program> {
        Program::new(self.package, self.classes)
    }
}

#[derive(Debug)]
pub struct ClassBuilder {
    class: Class,
}

impl ClassBuilder {
    pub fn new(ty: impl Into<TypeDesc>) -> Self {
        let mut class = Class::new(ty);
        class.access_flags = ACC_PUBLIC;
        class.super_class = Some(TypeDesc::new("Ljava/lang/Object;"));
        Self { class }
    }

    pub fn access_flags(mut self, flags: u32) -> Self {
        self.class.access_flags = flags;
        self
    }

    pub fn super_class(mut self, ty: impl Into<TypeDesc>) -> Self {
        self.class.super_class = Some(ty.into());
        self
    }

    pub fn field(self, name: impl Into<String>, ty: impl Into<TypeDesc>) -> Self {
        self.field_with_flags(name, ty, 0)
    }

    pub fn field_with_flags(
        mut self,
        name: impl Into<String>,
        ty: impl Into<TypeDesc>,
        access_flags: u32,
    ) -> Self {
        self.class.fields.push(Field {
            name: name.into(),
            ty: ty.into(),
            access_flags,
        });
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.class.methods.push(method);
        self
    }

    pub fn build(self) -> Class {
        self.class
    }
}

#[derive(Debug)]
pub struct MethodBuilder {
    method: Method,
    registers: Option<u16>,
    ins: Option<u16>,
    code: Option<Vec<Instruction>>,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>, params: Vec<TypeDesc>, ret: impl Into<TypeDesc>) -> Self {
        let name = name.into();
        let access_flags = if name == "<init>" || name == "<clinit>" {
            ACC_PUBLIC | ACC_CONSTRUCTOR
        } else {
            ACC_PUBLIC
        };
        Self {
            method: Method {
                name,
                params,
                ret: ret.into(),
                access_flags,
                body: None,
            },
            registers: None,
            ins: None,
            code: None,
        }
    }

    pub fn access_flags(mut self, flags: u32) -> Self {
        self.method.access_flags = flags;
        self
    }

    pub fn static_(mut self) -> Self {
        self.method.access_flags |= ACC_STATIC;
        self
    }

    /// Declare the method abstract; any code is dropped.
    pub fn abstract_(mut self) -> Self {
        self.method.access_flags |= ACC_ABSTRACT;
        self.code = None;
        self
    }

    pub fn registers(mut self, registers: u16) -> Self {
        self.registers = Some(registers);
        self
    }

    pub fn ins(mut self, ins: u16) -> Self {
        self.ins = Some(ins);
        self
    }

    pub fn code(mut self, code: impl IntoIterator<Item = Instruction>) -> Self {
        self.code = Some(code.into_iter().collect());
        self
    }

    /// Finish the method. Without explicit sizes, `ins` covers the
    /// parameters (plus `this`) and the frame covers every register used.
    pub fn build(self) -> Method {
        let mut method = self.method;
        if let Some(instructions) = self.code {
            let implicit_this = u16::from(method.access_flags & ACC_STATIC == 0);
            let ins = self
                .ins
                .unwrap_or(method.params.len() as u16 + implicit_this);
            let used = instructions
                .iter()
                .flat_map(|insn| insn.regs())
                .map(|r| r.0 + 1)
                .max()
                .unwrap_or(0);
            let registers = self.registers.unwrap_or(used.max(ins));
            method.body = Some(Body::new(registers, ins, instructions));
        }
        method
    }
}
