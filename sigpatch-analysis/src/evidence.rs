//! The fixed evidence signal set.

use bitflags::bitflags;
use sigpatch_isa::Instruction;

bitflags! {
    /// Signals observed in a method body.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Evidence: u8 {
        /// Loads the integer literal 1.
        const LITERAL_1 = 1 << 0;
        /// Loads the integer literal 2.
        const LITERAL_2 = 1 << 1;
        /// Loads the integer literal 3.
        const LITERAL_3 = 1 << 2;
        /// Branches on a comparison against zero.
        const ZERO_TEST = 1 << 3;
    }
}

impl Evidence {
    pub fn collect(instructions: &[Instruction]) -> Self {
        instructions.iter().fold(Evidence::empty(), |acc, insn| {
            acc | Evidence::of_instruction(insn)
        })
    }

    fn of_instruction(insn: &Instruction) -> Self {
        if insn.opcode().is_zero_test() {
            return Evidence::ZERO_TEST;
        }
        match insn.literal() {
            Some(1) => Evidence::LITERAL_1,
            Some(2) => Evidence::LITERAL_2,
            Some(3) => Evidence::LITERAL_3,
            _ => Evidence::empty(),
        }
    }

    /// Number of signals present, 0 to 4.
    pub fn score(self) -> u32 {
        self.bits().count_ones()
    }
}
