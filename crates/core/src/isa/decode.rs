//! RISC-V Instruction Decoder.
//!
//! Recovers the operands of a 32-bit word once its format is known. This is
//! the inverse of [`crate::isa::encode::assemble`]: the scattered immediate
//! groups are reassembled in bit-position order and sign-extended.
//!
//! U-type immediates are returned as the raw 20-bit field, matching how the
//! drills treat them on the encoding side.

use crate::common::bits::sign_extend;
use crate::common::error::ValidationError;
use crate::isa::format::Format;
use crate::isa::instruction::{InstructionBits, Operands};
use crate::isa::layout::{
    B_IMM_4_1, B_IMM_10_5, B_IMM_11, B_IMM_12, J_IMM_10_1, J_IMM_11, J_IMM_19_12, J_IMM_20,
};
use crate::isa::registry::{InstructionDescriptor, InstructionRegistry};

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Total number of bits in I-Type and S-Type immediates.
const IMM12_BITS: u32 = 12;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Position of the S-Type high field within the immediate.
const S_IMM_HIGH_POS: u32 = 5;

/// Total number of bits in the B-Type immediate.
const B_IMM_BITS: u32 = 13;

/// Bit shift for B-Type `imm[12]` (instruction bit 31).
const B_IMM_12_SHIFT: u32 = 31;

/// Bit shift for B-Type `imm[11]` (instruction bit 7).
const B_IMM_11_SHIFT: u32 = 7;

/// Bit shift for B-Type `imm[10:5]` (instruction bits 25-30).
const B_IMM_10_5_SHIFT: u32 = 25;

/// Bit mask for B-Type `imm[10:5]` (6 bits).
const B_IMM_10_5_MASK: u32 = 0x3F;

/// Bit shift for B-Type `imm[4:1]` (instruction bits 8-11).
const B_IMM_4_1_SHIFT: u32 = 8;

/// Bit mask for B-Type `imm[4:1]` (4 bits).
const B_IMM_4_1_MASK: u32 = 0xF;

/// Total number of bits in the J-Type immediate.
const J_IMM_BITS: u32 = 21;

/// Bit shift for J-Type `imm[20]` (instruction bit 31).
const J_IMM_20_SHIFT: u32 = 31;

/// Bit shift for J-Type `imm[19:12]` (instruction bits 12-19).
const J_IMM_19_12_SHIFT: u32 = 12;

/// Bit mask for J-Type `imm[19:12]` (8 bits).
const J_IMM_19_12_MASK: u32 = 0xFF;

/// Bit shift for J-Type `imm[11]` (instruction bit 20).
const J_IMM_11_SHIFT: u32 = 20;

/// Bit shift for J-Type `imm[10:1]` (instruction bits 21-30).
const J_IMM_10_1_SHIFT: u32 = 21;

/// Bit mask for J-Type `imm[10:1]` (10 bits).
const J_IMM_10_1_MASK: u32 = 0x3FF;

/// Mask for a single-bit immediate field.
const BIT_MASK: u32 = 1;

/// Bit shift for extracting the U-Type immediate field (bits 12-31).
const U_IMM_SHIFT: u32 = 12;

/// Bit mask for the raw U-Type field.
const U_IMM_MASK: u32 = 0xF_FFFF;

/// Decodes the I-Type immediate, `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn decode_i_type_imm(word: u32) -> Result<i32, ValidationError> {
    sign_extend(i64::from(word >> I_IMM_SHIFT), IMM12_BITS)
}

/// Decodes the S-Type immediate, `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn decode_s_type_imm(word: u32) -> Result<i32, ValidationError> {
    let low = (word >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (word >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    sign_extend(i64::from((high << S_IMM_HIGH_POS) | low), IMM12_BITS)
}

/// Decodes the B-Type immediate,
/// `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
fn decode_b_type_imm(word: u32) -> Result<i32, ValidationError> {
    let combined = (((word >> B_IMM_12_SHIFT) & BIT_MASK) << B_IMM_12.lo)
        | (((word >> B_IMM_11_SHIFT) & BIT_MASK) << B_IMM_11.lo)
        | (((word >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK) << B_IMM_10_5.lo)
        | (((word >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK) << B_IMM_4_1.lo);
    sign_extend(i64::from(combined), B_IMM_BITS)
}

/// Decodes the raw U-Type field, `imm[31:12] | rd | opcode`.
const fn decode_u_type_imm(word: u32) -> i32 {
    ((word >> U_IMM_SHIFT) & U_IMM_MASK) as i32
}

/// Decodes the J-Type immediate,
/// `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
fn decode_j_type_imm(word: u32) -> Result<i32, ValidationError> {
    let combined = (((word >> J_IMM_20_SHIFT) & BIT_MASK) << J_IMM_20.lo)
        | (((word >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK) << J_IMM_19_12.lo)
        | (((word >> J_IMM_11_SHIFT) & BIT_MASK) << J_IMM_11.lo)
        | (((word >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK) << J_IMM_10_1.lo);
    sign_extend(i64::from(combined), J_IMM_BITS)
}

/// Decodes the logical immediate of `word` under `format`. R-type yields 0.
///
/// # Errors
///
/// Propagates [`ValidationError`] from sign extension.
pub fn decode_immediate(format: Format, word: u32) -> Result<i32, ValidationError> {
    match format {
        Format::R => Ok(0),
        Format::I => decode_i_type_imm(word),
        Format::S => decode_s_type_imm(word),
        Format::B => decode_b_type_imm(word),
        Format::U => Ok(decode_u_type_imm(word)),
        Format::J => decode_j_type_imm(word),
    }
}

/// Decodes the operands `format` encodes in `word`; the rest are zero.
///
/// # Errors
///
/// Propagates [`ValidationError`] from sign extension.
pub fn decode_operands(format: Format, word: u32) -> Result<Operands, ValidationError> {
    let raw = Operands {
        rd: word.rd(),
        rs1: word.rs1(),
        rs2: word.rs2(),
        imm: decode_immediate(format, word)?,
    };
    Ok(raw.normalized(format))
}

/// Identifies `word` in `registry` and decodes its operands.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownEncoding`] if no registered instruction
/// matches the word's opcode and funct fields.
pub fn decode(
    registry: &InstructionRegistry,
    word: u32,
) -> Result<(InstructionDescriptor, Operands), ValidationError> {
    let desc = registry
        .identify(word)
        .ok_or(ValidationError::UnknownEncoding(word))?;
    let operands = decode_operands(desc.format(), word)?;
    Ok((desc.clone(), operands))
}
