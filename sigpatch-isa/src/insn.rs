//! Instruction constructors.
//!
//! These do not validate; a body built from them is checked when it enters
//! a program.
//!
//! ```
//! use sigpatch_isa::{insn, Opcode, Reg};
//!
//! let load = insn::const_int(Reg(0), 1);
//! assert_eq!(load.opcode(), Opcode::Const4);
//! assert_eq!(load.to_string(), "const/4 v0, 0x1");
//! ```

use crate::instruction::{Instruction, Label, Payload, Reg};
use crate::opcode::Opcode;
use crate::types::{FieldRef, MethodRef, TypeDesc};

fn make(opcode: Opcode, regs: Vec<Reg>, payload: Payload) -> Instruction {
    Instruction {
        opcode,
        regs,
        payload,
    }
}

pub fn nop() -> Instruction {
    make(Opcode::Nop, vec![], Payload::None)
}

pub fn mov(dst: Reg, src: Reg) -> Instruction {
    make(Opcode::Move, vec![dst, src], Payload::None)
}

pub fn move_result(dst: Reg) -> Instruction {
    make(Opcode::MoveResult, vec![dst], Payload::None)
}

/// Load an integer literal using the narrowest constant form that encodes
/// both the register and the value.
pub fn const_int(dst: Reg, value: i32) -> Instruction {
    let opcode = if dst.0 < 16 && (-8..=7).contains(&value) {
        Opcode::Const4
    } else if i16::try_from(value).is_ok() {
        Opcode::Const16
    } else {
        Opcode::Const
    };
    make(opcode, vec![dst], Payload::Literal(i64::from(value)))
}

/// `const v, 0` in its narrowest form.
pub fn const_zero(dst: Reg) -> Instruction {
    const_int(dst, 0)
}

pub fn const_string(dst: Reg, value: impl Into<String>) -> Instruction {
    make(Opcode::ConstString, vec![dst], Payload::String(value.into()))
}

pub fn const_class(dst: Reg, ty: impl Into<TypeDesc>) -> Instruction {
    make(Opcode::ConstClass, vec![dst], Payload::Type(ty.into()))
}

/// Instance field read with an explicit opcode (`iget`, `iget-boolean`, ...).
pub fn iget_as(opcode: Opcode, dst: Reg, object: Reg, field: FieldRef) -> Instruction {
    make(opcode, vec![dst, object], Payload::Field(field))
}

pub fn iget(dst: Reg, object: Reg, field: FieldRef) -> Instruction {
    iget_as(Opcode::Iget, dst, object, field)
}

pub fn iget_boolean(dst: Reg, object: Reg, field: FieldRef) -> Instruction {
    iget_as(Opcode::IgetBoolean, dst, object, field)
}

pub fn iget_object(dst: Reg, object: Reg, field: FieldRef) -> Instruction {
    iget_as(Opcode::IgetObject, dst, object, field)
}

/// Static field read with an explicit opcode (`sget`, `sget-boolean`, ...).
pub fn sget_as(opcode: Opcode, dst: Reg, field: FieldRef) -> Instruction {
    make(opcode, vec![dst], Payload::Field(field))
}

pub fn sget_boolean(dst: Reg, field: FieldRef) -> Instruction {
    sget_as(Opcode::SgetBoolean, dst, field)
}

pub fn iput_as(opcode: Opcode, src: Reg, object: Reg, field: FieldRef) -> Instruction {
    make(opcode, vec![src, object], Payload::Field(field))
}

pub fn sput_as(opcode: Opcode, src: Reg, field: FieldRef) -> Instruction {
    make(opcode, vec![src], Payload::Field(field))
}

pub fn if_eqz(reg: Reg, target: Label) -> Instruction {
    make(Opcode::IfEqz, vec![reg], Payload::Target(target))
}

pub fn if_nez(reg: Reg, target: Label) -> Instruction {
    make(Opcode::IfNez, vec![reg], Payload::Target(target))
}

pub fn if_ne(a: Reg, b: Reg, target: Label) -> Instruction {
    make(Opcode::IfNe, vec![a, b], Payload::Target(target))
}

pub fn if_lt(a: Reg, b: Reg, target: Label) -> Instruction {
    make(Opcode::IfLt, vec![a, b], Payload::Target(target))
}

pub fn goto(target: Label) -> Instruction {
    make(Opcode::Goto, vec![], Payload::Target(target))
}

pub fn add_int_lit8(dst: Reg, src: Reg, value: i8) -> Instruction {
    make(
        Opcode::AddIntLit8,
        vec![dst, src],
        Payload::Literal(i64::from(value)),
    )
}

pub fn invoke(opcode: Opcode, args: Vec<Reg>, method: MethodRef) -> Instruction {
    make(opcode, args, Payload::Method(method))
}

pub fn invoke_virtual(args: Vec<Reg>, method: MethodRef) -> Instruction {
    invoke(Opcode::InvokeVirtual, args, method)
}

pub fn invoke_static(args: Vec<Reg>, method: MethodRef) -> Instruction {
    invoke(Opcode::InvokeStatic, args, method)
}

pub fn invoke_direct(args: Vec<Reg>, method: MethodRef) -> Instruction {
    invoke(Opcode::InvokeDirect, args, method)
}

pub fn new_instance(dst: Reg, ty: impl Into<TypeDesc>) -> Instruction {
    make(Opcode::NewInstance, vec![dst], Payload::Type(ty.into()))
}

/// `return` for boolean and integer values.
pub fn ret(src: Reg) -> Instruction {
    make(Opcode::Return, vec![src], Payload::None)
}

pub fn return_object(src: Reg) -> Instruction {
    make(Opcode::ReturnObject, vec![src], Payload::None)
}

pub fn return_void() -> Instruction {
    make(Opcode::ReturnVoid, vec![], Payload::None)
}

pub fn throw(src: Reg) -> Instruction {
    make(Opcode::Throw, vec![src], Payload::None)
}
