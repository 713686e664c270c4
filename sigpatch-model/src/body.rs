//! Method bodies and their structural checks.

use serde::{Deserialize, Serialize};
use sigpatch_isa::{Instruction, InstructionError, Label, Reg};

/// Structural problems in a method body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("body has no instructions")]
    Empty,
    #[error("{ins} incoming registers exceed the frame size of {registers}")]
    InsExceedRegisters { ins: u16, registers: u16 },
    #[error("instruction {position}: {source}")]
    Instruction {
        position: usize,
        #[source]
        source: InstructionError,
    },
    #[error("instruction {position}: {reg} is outside the frame of {registers} registers")]
    RegisterOutOfRange {
        position: usize,
        reg: Reg,
        registers: u16,
    },
    #[error("instruction {position}: branch target {target} out of range ({len} instructions)")]
    TargetOutOfRange {
        position: usize,
        target: Label,
        len: usize,
    },
}

/// The code of a concrete method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Body {
    /// Frame size: every register operand must be below this.
    pub registers: u16,
    /// Incoming argument registers, occupying the top of the frame.
    #[serde(default)]
    pub ins: u16,
    pub instructions: Vec<Instruction>,
}

impl Body {
    pub fn new(registers: u16, ins: u16, instructions: Vec<Instruction>) -> Self {
        Self {
            registers,
            ins,
            instructions,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check every instruction against the frame and the body length.
    pub fn validate(&self) -> Result<(), BodyError> {
        if self.instructions.is_empty() {
            return Err(BodyError::Empty);
        }
        if self.ins > self.registers {
            return Err(BodyError::InsExceedRegisters {
                ins: self.ins,
                registers: self.registers,
            });
        }
        for (position, insn) in self.instructions.iter().enumerate() {
            self.check_instruction(position, insn)?;
        }
        Ok(())
    }

    /// Check one instruction as if it sat at `position` in this body.
    pub fn check_instruction(&self, position: usize, insn: &Instruction) -> Result<(), BodyError> {
        insn.validate()
            .map_err(|source| BodyError::Instruction { position, source })?;
        if let Some(&reg) = insn.regs().iter().find(|r| r.0 >= self.registers) {
            return Err(BodyError::RegisterOutOfRange {
                position,
                reg,
                registers: self.registers,
            });
        }
        if let Some(target) = insn.target() {
            if target.0 as usize >= self.instructions.len() {
                return Err(BodyError::TargetOutOfRange {
                    position,
                    target,
                    len: self.instructions.len(),
                });
            }
        }
        Ok(())
    }
}
