//! Ground-truth instruction assembly.
//!
//! Produces the canonical answer key for an instruction instance: the ordered
//! per-field binary strings, the 32-bit binary word, and its hex form.
//!
//! Each layout slot is resolved by what it names. Fixed and register slots
//! come from the descriptor and operands; immediate slots are paired with the
//! swizzled group carrying the same immediate bits, never by position.

use serde::Serialize;
use tracing::debug;

use crate::common::bits::{WORD_BITS, parse_binary, to_binary, to_hex};
use crate::common::error::ValidationError;
use crate::isa::instruction::Operands;
use crate::isa::layout::{FUNCT3_BITS, FUNCT7_BITS, Field, OPCODE_BITS, REG_BITS};
use crate::isa::registry::InstructionDescriptor;
use crate::isa::swizzle::{self, ImmGroup};

/// One slot of an assembled instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedField {
    /// Qualified slot name (`rs1`, `imm[11:5]`, ...).
    pub name: String,
    /// Slot value as a fixed-width binary string.
    pub bits: String,
}

/// Canonical encoding of one instruction instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroundTruth {
    /// Slots in layout order, MSB first.
    pub fields: Vec<EncodedField>,
    /// Concatenated 32-character binary word.
    pub binary: String,
    /// 8-character lowercase hex word.
    pub hex: String,
    /// The word as an integer.
    pub word: u32,
}

impl GroundTruth {
    /// Slot names in layout order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Slot binary strings in layout order.
    pub fn field_bits(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.bits.as_str()).collect()
    }
}

/// Formats a fixed-width unsigned field.
fn field_bits(value: u32, width: u32) -> Result<String, ValidationError> {
    to_binary(i64::from(value), width)
}

fn funct(
    value: Option<u32>,
    desc: &InstructionDescriptor,
    field: &'static str,
) -> Result<u32, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingFunct {
        mnemonic: desc.mnemonic().to_owned(),
        field,
    })
}

/// Assembles `desc` with `operands` into its ground-truth encoding.
///
/// Register indices are masked to 5 bits; the immediate is swizzled per the
/// descriptor's format.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the descriptor lacks a funct field its
/// layout requires, a layout immediate slot has no swizzled group, or the
/// assembled word is not 32 bits wide.
pub fn assemble(
    desc: &InstructionDescriptor,
    operands: &Operands,
) -> Result<GroundTruth, ValidationError> {
    let layout = desc.layout();
    let groups: Vec<ImmGroup> = swizzle::swizzle(desc.format(), operands.imm)?;

    let mut fields = Vec::with_capacity(layout.fields().len());
    let mut binary = String::with_capacity(WORD_BITS as usize);

    for &field in layout.fields() {
        let bits = match field {
            Field::Opcode => field_bits(desc.opcode(), OPCODE_BITS)?,
            Field::Funct3 => field_bits(funct(desc.funct3(), desc, "funct3")?, FUNCT3_BITS)?,
            Field::Funct7 => field_bits(funct(desc.funct7(), desc, "funct7")?, FUNCT7_BITS)?,
            Field::Rs1 => field_bits(u32::from(operands.rs1), REG_BITS)?,
            Field::Rs2 => field_bits(u32::from(operands.rs2), REG_BITS)?,
            Field::Rd => field_bits(u32::from(operands.rd), REG_BITS)?,
            Field::Imm(slice) => groups
                .iter()
                .find(|g| g.slice == slice)
                .map(|g| g.bits.clone())
                .ok_or_else(|| ValidationError::MissingImmediate {
                    format: desc.format(),
                    slot: slice.to_string(),
                })?,
        };
        binary.push_str(&bits);
        fields.push(EncodedField {
            name: field.name(),
            bits,
        });
    }

    if binary.len() != WORD_BITS as usize {
        return Err(ValidationError::WordWidth(binary.len()));
    }

    let word = parse_binary(&binary)?;
    let hex = to_hex(i64::from(word));
    debug!(mnemonic = desc.mnemonic(), %hex, "assembled instruction");

    Ok(GroundTruth {
        fields,
        binary,
        hex,
        word,
    })
}
