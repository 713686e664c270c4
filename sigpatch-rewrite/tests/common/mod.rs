#![allow(dead_code)]

use sigpatch_isa::{FieldRef, Instruction};
use sigpatch_model::builder::{ClassBuilder, MethodBuilder, ProgramBuilder};
use sigpatch_model::{ClassId, MethodId, Program};

pub const SETTINGS: &str = "Lcom/protonvpn/android/userstorage/LocalUserSettings;";

pub fn telemetry() -> FieldRef {
    FieldRef::new(SETTINGS, "telemetryEnabled", "Z")
}

pub fn id(class: usize, index: usize) -> MethodId {
    MethodId {
        class: ClassId(class),
        index,
    }
}

/// A program with one class holding one method per `(name, ret, code)`.
pub fn single_class(methods: Vec<(&str, &str, Vec<Instruction>)>) -> Program {
    let mut class = ClassBuilder::new("Lcom/example/Target;");
    for (name, ret, code) in methods {
        class = class.method(MethodBuilder::new(name, vec![], ret).code(code).build());
    }
    ProgramBuilder::new().class(class.build()).build().unwrap()
}
