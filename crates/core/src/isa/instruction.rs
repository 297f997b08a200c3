//! Instruction field extraction and operand values.
//!
//! Provides bit extraction for the fixed-position fields of a 32-bit RISC-V
//! encoding and the operand record a quiz round fills in.

use serde::{Deserialize, Serialize};

use crate::isa::format::Format;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit shift of the destination register field.
const RD_SHIFT: u32 = 7;
/// Bit shift of the funct3 field.
const FUNCT3_SHIFT: u32 = 12;
/// Bit shift of the first source register field.
const RS1_SHIFT: u32 = 15;
/// Bit shift of the second source register field.
const RS2_SHIFT: u32 = 20;
/// Bit shift of the funct7 field.
const FUNCT7_SHIFT: u32 = 25;

/// Extraction of the fixed-position fields of an encoded instruction.
///
/// The positions are the same in every format; whether a field is meaningful
/// depends on the format (an I-type word has no `rs2`, its bits belong to the
/// immediate).
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> u8;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> u8;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> u8;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u8 {
        ((self >> RD_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rs1(&self) -> u8 {
        ((self >> RS1_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rs2(&self) -> u8 {
        ((self >> RS2_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }
}

/// Concrete register indices and immediate of one instruction instance.
///
/// The immediate is the logical value: a signed offset for I/S/B/J and the
/// raw 20-bit field value for U.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operands {
    /// Destination register index.
    pub rd: u8,
    /// First source register index.
    pub rs1: u8,
    /// Second source register index.
    pub rs2: u8,
    /// Logical immediate value.
    pub imm: i32,
}

impl Operands {
    /// Zeroes every operand that `format` does not encode.
    ///
    /// Two operand sets that assemble to the same word under `format` are
    /// equal after normalization.
    pub const fn normalized(self, format: Format) -> Self {
        match format {
            Format::R => Self { imm: 0, ..self },
            Format::I => Self { rs2: 0, ..self },
            Format::S | Format::B => Self { rd: 0, ..self },
            Format::U | Format::J => Self {
                rd: self.rd,
                rs1: 0,
                rs2: 0,
                imm: self.imm,
            },
        }
    }
}
