//! Register-machine instruction set used by the sigpatch model.
//!
//! This crate provides opcode definitions with their operand formats and
//! flags, symbolic field/method references, and the [`Instruction`] value
//! type with shape validation.

pub mod insn;
mod instruction;
mod opcode;
mod types;

pub use bitflags;

pub use instruction::{Instruction, InstructionError, Label, Payload, Reg};
pub use opcode::{
    Format, Opcode, OpcodeClass, OpcodeFlags, OpcodeInfo, PayloadKind, RegCount, lookup,
    opcode_table,
};
pub use types::{FieldRef, MethodRef, TypeDesc};
