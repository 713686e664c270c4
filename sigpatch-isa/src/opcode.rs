//! Opcode table and per-opcode metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InstructionError;

bitflags::bitflags! {
    /// Behavioural properties of an opcode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u16 {
        /// Carries an integer literal operand.
        const LITERAL = 1 << 0;
        /// Loads a string constant.
        const STRING = 1 << 1;
        /// Reads a field into its first register.
        const FIELD_READ = 1 << 2;
        /// Stores its first register into a field.
        const FIELD_WRITE = 1 << 3;
        /// Field access without an object register.
        const STATIC = 1 << 4;
        /// Transfers control to a label.
        const JUMP = 1 << 5;
        const CONDITIONAL = 1 << 6;
        /// Conditional branch comparing a single register against zero
        /// for (in)equality.
        const ZERO_TEST = 1 << 7;
        const RETURN = 1 << 8;
        const CALL = 1 << 9;
        const THROW = 1 << 10;
        /// The first register operand is written.
        const DEST = 1 << 11;
    }
}

/// Coarse opcode classification, one tag per opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeClass {
    Nop,
    Move,
    LiteralLoad,
    StringLoad,
    TypeLoad,
    FieldRead,
    FieldWrite,
    ConditionalBranch,
    Jump,
    Arithmetic,
    Call,
    Object,
    Return,
    Throw,
}

/// How many register operands an opcode takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegCount {
    Exact(u8),
    UpTo(u8),
}

impl RegCount {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            RegCount::Exact(k) => n == k as usize,
            RegCount::UpTo(k) => n <= k as usize,
        }
    }
}

impl fmt::Display for RegCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegCount::Exact(n) => write!(f, "{n}"),
            RegCount::UpTo(n) => write!(f, "at most {n}"),
        }
    }
}

/// Kind of the non-register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    None,
    /// Signed integer literal of the given bit width.
    Literal { bits: u8 },
    String,
    Field,
    Method,
    Type,
    Target,
}

impl PayloadKind {
    pub fn name(self) -> &'static str {
        match self {
            PayloadKind::None => "empty",
            PayloadKind::Literal { .. } => "literal",
            PayloadKind::String => "string",
            PayloadKind::Field => "field",
            PayloadKind::Method => "method",
            PayloadKind::Type => "type",
            PayloadKind::Target => "branch target",
        }
    }
}

/// Operand layout of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    pub regs: RegCount,
    /// Maximum register width in bits (4, 8 or 16).
    pub reg_bits: u8,
    pub payload: PayloadKind,
}

const fn format(regs: RegCount, reg_bits: u8, payload: PayloadKind) -> Format {
    Format {
        regs,
        reg_bits,
        payload,
    }
}

const F_NONE: Format = format(RegCount::Exact(0), 0, PayloadKind::None);
const F_R4R4: Format = format(RegCount::Exact(2), 4, PayloadKind::None);
const F_R8: Format = format(RegCount::Exact(1), 8, PayloadKind::None);
const F_R8R8R8: Format = format(RegCount::Exact(3), 8, PayloadKind::None);
const F_LIT4: Format = format(RegCount::Exact(1), 4, PayloadKind::Literal { bits: 4 });
const F_LIT16: Format = format(RegCount::Exact(1), 8, PayloadKind::Literal { bits: 16 });
const F_LIT32: Format = format(RegCount::Exact(1), 8, PayloadKind::Literal { bits: 32 });
const F_R8R8_LIT8: Format = format(RegCount::Exact(2), 8, PayloadKind::Literal { bits: 8 });
const F_STRING: Format = format(RegCount::Exact(1), 8, PayloadKind::String);
const F_TYPE: Format = format(RegCount::Exact(1), 8, PayloadKind::Type);
const F_IFIELD: Format = format(RegCount::Exact(2), 4, PayloadKind::Field);
const F_SFIELD: Format = format(RegCount::Exact(1), 8, PayloadKind::Field);
const F_IFZ: Format = format(RegCount::Exact(1), 8, PayloadKind::Target);
const F_IF: Format = format(RegCount::Exact(2), 4, PayloadKind::Target);
const F_GOTO: Format = format(RegCount::Exact(0), 0, PayloadKind::Target);
const F_INVOKE: Format = format(RegCount::UpTo(5), 4, PayloadKind::Method);

/// Static metadata for one opcode.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    opcode: Opcode,
    mnemonic: &'static str,
    class: OpcodeClass,
    flags: OpcodeFlags,
    format: Format,
}

impl OpcodeInfo {
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    pub fn class(&self) -> OpcodeClass {
        self.class
    }

    pub fn flags(&self) -> OpcodeFlags {
        self.flags
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

macro_rules! define_opcodes {
    ($($variant:ident => $mnemonic:literal, $class:ident, [$($flag:ident)|*], $format:expr;)*) => {
        /// Every opcode understood by the model.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Opcode {
            $($variant,)*
        }

        static OPCODE_TABLE: &[OpcodeInfo] = &[
            $(OpcodeInfo {
                opcode: Opcode::$variant,
                mnemonic: $mnemonic,
                class: OpcodeClass::$class,
                flags: OpcodeFlags::empty()$(.union(OpcodeFlags::$flag))*,
                format: $format,
            },)*
        ];
    };
}

define_opcodes! {
    Nop => "nop", Nop, [], F_NONE;
    Move => "move", Move, [DEST], F_R4R4;
    MoveResult => "move-result", Move, [DEST], F_R8;
    Const4 => "const/4", LiteralLoad, [LITERAL | DEST], F_LIT4;
    Const16 => "const/16", LiteralLoad, [LITERAL | DEST], F_LIT16;
    Const => "const", LiteralLoad, [LITERAL | DEST], F_LIT32;
    ConstString => "const-string", StringLoad, [STRING | DEST], F_STRING;
    ConstClass => "const-class", TypeLoad, [DEST], F_TYPE;

    Iget => "iget", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    IgetBoolean => "iget-boolean", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    IgetByte => "iget-byte", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    IgetChar => "iget-char", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    IgetShort => "iget-short", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    IgetObject => "iget-object", FieldRead, [FIELD_READ | DEST], F_IFIELD;
    Iput => "iput", FieldWrite, [FIELD_WRITE], F_IFIELD;
    IputBoolean => "iput-boolean", FieldWrite, [FIELD_WRITE], F_IFIELD;
    IputByte => "iput-byte", FieldWrite, [FIELD_WRITE], F_IFIELD;
    IputChar => "iput-char", FieldWrite, [FIELD_WRITE], F_IFIELD;
    IputShort => "iput-short", FieldWrite, [FIELD_WRITE], F_IFIELD;
    IputObject => "iput-object", FieldWrite, [FIELD_WRITE], F_IFIELD;
    Sget => "sget", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    SgetBoolean => "sget-boolean", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    SgetByte => "sget-byte", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    SgetChar => "sget-char", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    SgetShort => "sget-short", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    SgetObject => "sget-object", FieldRead, [FIELD_READ | STATIC | DEST], F_SFIELD;
    Sput => "sput", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;
    SputBoolean => "sput-boolean", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;
    SputByte => "sput-byte", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;
    SputChar => "sput-char", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;
    SputShort => "sput-short", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;
    SputObject => "sput-object", FieldWrite, [FIELD_WRITE | STATIC], F_SFIELD;

    IfEqz => "if-eqz", ConditionalBranch, [JUMP | CONDITIONAL | ZERO_TEST], F_IFZ;
    IfNez => "if-nez", ConditionalBranch, [JUMP | CONDITIONAL | ZERO_TEST], F_IFZ;
    IfLtz => "if-ltz", ConditionalBranch, [JUMP | CONDITIONAL], F_IFZ;
    IfGez => "if-gez", ConditionalBranch, [JUMP | CONDITIONAL], F_IFZ;
    IfGtz => "if-gtz", ConditionalBranch, [JUMP | CONDITIONAL], F_IFZ;
    IfLez => "if-lez", ConditionalBranch, [JUMP | CONDITIONAL], F_IFZ;
    IfEq => "if-eq", ConditionalBranch, [JUMP | CONDITIONAL], F_IF;
    IfNe => "if-ne", ConditionalBranch, [JUMP | CONDITIONAL], F_IF;
    IfLt => "if-lt", ConditionalBranch, [JUMP | CONDITIONAL], F_IF;
    IfGe => "if-ge", ConditionalBranch, [JUMP | CONDITIONAL], F_IF;
    Goto => "goto", Jump, [JUMP], F_GOTO;

    AddInt => "add-int", Arithmetic, [DEST], F_R8R8R8;
    AddIntLit8 => "add-int/lit8", Arithmetic, [LITERAL | DEST], F_R8R8_LIT8;

    InvokeVirtual => "invoke-virtual", Call, [CALL], F_INVOKE;
    InvokeSuper => "invoke-super", Call, [CALL], F_INVOKE;
    InvokeDirect => "invoke-direct", Call, [CALL], F_INVOKE;
    InvokeStatic => "invoke-static", Call, [CALL], F_INVOKE;
    InvokeInterface => "invoke-interface", Call, [CALL], F_INVOKE;

    NewInstance => "new-instance", Object, [DEST], F_TYPE;
    CheckCast => "check-cast", Object, [], F_TYPE;

    Return => "return", Return, [RETURN], F_R8;
    ReturnObject => "return-object", Return, [RETURN], F_R8;
    ReturnVoid => "return-void", Return, [RETURN], F_NONE;
    Throw => "throw", Throw, [THROW], F_R8;
}

/// All opcodes in declaration order.
pub fn opcode_table() -> &'static [OpcodeInfo] {
    OPCODE_TABLE
}

/// Find an opcode by mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE.iter().find(|info| info.mnemonic == mnemonic)
}

impl Opcode {
    #[inline]
    pub fn info(self) -> &'static OpcodeInfo {
        &OPCODE_TABLE[self as usize]
    }

    #[inline]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    #[inline]
    pub fn class(self) -> OpcodeClass {
        self.info().class
    }

    #[inline]
    pub fn flags(self) -> OpcodeFlags {
        self.info().flags
    }

    #[inline]
    pub fn format(self) -> Format {
        self.info().format
    }

    pub fn is_field_read(self) -> bool {
        self.flags().contains(OpcodeFlags::FIELD_READ)
    }

    /// Field reads that produce a boolean (`iget-boolean`, `sget-boolean`).
    pub fn is_boolean_field_read(self) -> bool {
        matches!(self, Opcode::IgetBoolean | Opcode::SgetBoolean)
    }

    pub fn is_zero_test(self) -> bool {
        self.flags().contains(OpcodeFlags::ZERO_TEST)
    }

    pub fn is_return(self) -> bool {
        self.flags().contains(OpcodeFlags::RETURN)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = InstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s)
            .map(|info| info.opcode)
            .ok_or_else(|| InstructionError::UnknownMnemonic(s.to_string()))
    }
}

impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.mnemonic())
    }
}

impl<'de> Deserialize<'de> for Opcode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
