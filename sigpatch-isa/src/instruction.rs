use std::fmt;

use serde::{Deserialize, Serialize};

use crate::opcode::{Opcode, OpcodeClass, OpcodeFlags, PayloadKind, RegCount};
use crate::types::{FieldRef, MethodRef, TypeDesc};

/// Virtual register index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reg(pub u16);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Branch target, expressed as the index of the target instruction
/// within the method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Errors from [`Instruction::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstructionError {
    #[error("{opcode} expects {expected} register operand(s), got {actual}")]
    RegisterCount {
        opcode: Opcode,
        expected: RegCount,
        actual: usize,
    },
    #[error("{opcode} operand {reg} does not fit in {bits} bits")]
    RegisterWidth { opcode: Opcode, reg: Reg, bits: u8 },
    #[error("{opcode} expects a {expected} operand, got {actual}")]
    PayloadKind {
        opcode: Opcode,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{opcode} literal {value} does not fit in {bits} bits")]
    LiteralRange { opcode: Opcode, value: i64, bits: u8 },
    #[error("unknown opcode mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("{0} carries more than one non-register operand")]
    ConflictingPayload(Opcode),
}

/// The non-register operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    None,
    Literal(i64),
    String(String),
    Field(FieldRef),
    Method(MethodRef),
    Type(TypeDesc),
    Target(Label),
}

impl Payload {
    fn kind_name(&self) -> &'static str {
        match self {
            Payload::None => "empty",
            Payload::Literal(_) => "literal",
            Payload::String(_) => "string",
            Payload::Field(_) => "field",
            Payload::Method(_) => "method",
            Payload::Type(_) => "type",
            Payload::Target(_) => "branch target",
        }
    }
}

/// A single instruction: opcode, register operands and an optional payload.
///
/// Use the constructors in [`crate::insn`] or [`Instruction::new`]. The
/// operand shape is checked by [`Instruction::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction", into = "RawInstruction")]
pub struct Instruction {
    pub(crate) opcode: Opcode,
    pub(crate) regs: Vec<Reg>,
    pub(crate) payload: Payload,
}

impl Instruction {
    /// Build and validate an instruction.
    pub fn new(opcode: Opcode, regs: Vec<Reg>, payload: Payload) -> Result<Self, InstructionError> {
        let insn = Self {
            opcode,
            regs,
            payload,
        };
        insn.validate()?;
        Ok(insn)
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn class(&self) -> OpcodeClass {
        self.opcode.class()
    }

    pub fn flags(&self) -> OpcodeFlags {
        self.opcode.flags()
    }

    pub fn regs(&self) -> &[Reg] {
        &self.regs
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn literal(&self) -> Option<i64> {
        match self.payload {
            Payload::Literal(v) => Some(v),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&FieldRef> {
        match &self.payload {
            Payload::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn method(&self) -> Option<&MethodRef> {
        match &self.payload {
            Payload::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_ref(&self) -> Option<&TypeDesc> {
        match &self.payload {
            Payload::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<Label> {
        match self.payload {
            Payload::Target(l) => Some(l),
            _ => None,
        }
    }

    /// The register written by this instruction, if any.
    pub fn dest(&self) -> Option<Reg> {
        if self.flags().contains(OpcodeFlags::DEST) {
            self.regs.first().copied()
        } else {
            None
        }
    }

    /// The field read by this instruction, if it is a field read.
    pub fn field_read(&self) -> Option<&FieldRef> {
        if self.opcode.is_field_read() {
            self.field()
        } else {
            None
        }
    }

    /// Check the operands against the opcode's format.
    pub fn validate(&self) -> Result<(), InstructionError> {
        let format = self.opcode.format();

        if !format.regs.accepts(self.regs.len()) {
            return Err(InstructionError::RegisterCount {
                opcode: self.opcode,
                expected: format.regs,
                actual: self.regs.len(),
            });
        }
        let reg_limit = 1u32 << format.reg_bits;
        if let Some(&reg) = self.regs.iter().find(|r| u32::from(r.0) >= reg_limit) {
            return Err(InstructionError::RegisterWidth {
                opcode: self.opcode,
                reg,
                bits: format.reg_bits,
            });
        }

        let mismatch = || InstructionError::PayloadKind {
            opcode: self.opcode,
            expected: format.payload.name(),
            actual: self.payload.kind_name(),
        };
        match (format.payload, &self.payload) {
            (PayloadKind::None, Payload::None)
            | (PayloadKind::String, Payload::String(_))
            | (PayloadKind::Field, Payload::Field(_))
            | (PayloadKind::Method, Payload::Method(_))
            | (PayloadKind::Type, Payload::Type(_))
            | (PayloadKind::Target, Payload::Target(_)) => Ok(()),
            (PayloadKind::Literal { bits }, Payload::Literal(value)) => {
                let min = -(1i64 << (bits - 1));
                let max = (1i64 << (bits - 1)) - 1;
                if (min..=max).contains(value) {
                    Ok(())
                } else {
                    Err(InstructionError::LiteralRange {
                        opcode: self.opcode,
                        value: *value,
                        bits,
                    })
                }
            }
            _ => Err(mismatch()),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        let mut sep = " ";
        for reg in &self.regs {
            write!(f, "{sep}{reg}")?;
            sep = ", ";
        }
        match &self.payload {
            Payload::None => Ok(()),
            Payload::Literal(v) if *v < 0 => write!(f, "{sep}-{:#x}", v.unsigned_abs()),
            Payload::Literal(v) => write!(f, "{sep}{v:#x}"),
            Payload::String(s) => write!(f, "{sep}{s:?}"),
            Payload::Field(r) => write!(f, "{sep}{r}"),
            Payload::Method(r) => write!(f, "{sep}{r}"),
            Payload::Type(t) => write!(f, "{sep}{t}"),
            Payload::Target(l) => write!(f, "{sep}{l}"),
        }
    }
}

/// Flat serialized form of an [`Instruction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawInstruction {
    op: Opcode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    regs: Vec<Reg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    literal: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<FieldRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<MethodRef>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    ty: Option<TypeDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<Label>,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = InstructionError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        let mut payloads = Vec::with_capacity(1);
        if let Some(v) = raw.literal {
            payloads.push(Payload::Literal(v));
        }
        if let Some(s) = raw.string {
            payloads.push(Payload::String(s));
        }
        if let Some(r) = raw.field {
            payloads.push(Payload::Field(r));
        }
        if let Some(r) = raw.method {
            payloads.push(Payload::Method(r));
        }
        if let Some(t) = raw.ty {
            payloads.push(Payload::Type(t));
        }
        if let Some(l) = raw.target {
            payloads.push(Payload::Target(l));
        }
        if payloads.len() > 1 {
            return Err(InstructionError::ConflictingPayload(raw.op));
        }
        let payload = payloads.pop().unwrap_or(Payload::None);
        Instruction::new(raw.op, raw.regs, payload)
    }
}

impl From<Instruction> for RawInstruction {
    fn from(insn: Instruction) -> Self {
        let mut raw = RawInstruction {
            op: insn.opcode,
            regs: insn.regs,
            literal: None,
            string: None,
            field: None,
            method: None,
            ty: None,
            target: None,
        };
        match insn.payload {
            Payload::None => {}
            Payload::Literal(v) => raw.literal = Some(v),
            Payload::String(s) => raw.string = Some(s),
            Payload::Field(r) => raw.field = Some(r),
            Payload::Method(r) => raw.method = Some(r),
            Payload::Type(t) => raw.ty = Some(t),
            Payload::Target(l) => raw.target = Some(l),
        }
        raw
    }
}
