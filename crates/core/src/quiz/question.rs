//! Quiz questions.
//!
//! A question is one instruction from the active pool with freshly drawn
//! register and immediate values. It is created per round and dropped once
//! graded.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::debug;

use crate::common::error::{ConfigError, ValidationError};
use crate::isa::decode::decode;
use crate::isa::encode::{GroundTruth, assemble};
use crate::isa::format::Format;
use crate::isa::instruction::Operands;
use crate::isa::registry::{InstructionDescriptor, InstructionRegistry};

/// Source register indices drawn for every question.
const SOURCE_REGS: RangeInclusive<u8> = 0..=31;

/// Destination register indices; x0 is excluded since writes to it are discarded.
const DEST_REGS: RangeInclusive<u8> = 1..=31;

/// Immediate range for I/S-type questions.
const SIGNED_IMM: RangeInclusive<i32> = -99..=99;

/// Half of the immediate range for B/J-type questions; values are doubled.
const EVEN_IMM_HALVES: RangeInclusive<i32> = -49..=49;

/// Raw field range for U-type questions.
const UPPER_IMM: RangeInclusive<i32> = 0..=99;

/// One quiz round: an instruction and concrete operand values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The instruction being drilled.
    pub instruction: InstructionDescriptor,
    /// Register indices and immediate.
    pub operands: Operands,
}

impl Question {
    /// Creates a question from an instruction and its operands.
    pub const fn new(instruction: InstructionDescriptor, operands: Operands) -> Self {
        Self {
            instruction,
            operands,
        }
    }

    /// Format of the drilled instruction.
    pub const fn format(&self) -> Format {
        self.instruction.format()
    }

    /// Canonical assembly rendering, see [`format_assembly`].
    pub fn assembly(&self) -> String {
        format_assembly(self)
    }

    /// Canonical encoding, see [`compute_ground_truth`].
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] from assembly.
    pub fn ground_truth(&self) -> Result<GroundTruth, ValidationError> {
        compute_ground_truth(self)
    }

    /// Reconstructs the question a 32-bit word encodes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownEncoding`] if the word matches no
    /// registered instruction.
    pub fn decode(registry: &InstructionRegistry, word: u32) -> Result<Self, ValidationError> {
        let (instruction, operands) = decode(registry, word)?;
        Ok(Self::new(instruction, operands))
    }
}

/// Inclusive range of immediates generated for `format`.
///
/// B and J values are additionally restricted to even numbers.
pub fn immediate_range(format: Format) -> RangeInclusive<i32> {
    match format {
        Format::R => 0..=0,
        Format::I | Format::S => SIGNED_IMM,
        Format::B | Format::J => (EVEN_IMM_HALVES.start() * 2)..=(EVEN_IMM_HALVES.end() * 2),
        Format::U => UPPER_IMM,
    }
}

fn draw_immediate<R: Rng + ?Sized>(format: Format, rng: &mut R) -> i32 {
    match format {
        Format::R => 0,
        Format::I | Format::S => rng.gen_range(SIGNED_IMM),
        Format::B | Format::J => rng.gen_range(EVEN_IMM_HALVES) * 2,
        Format::U => rng.gen_range(UPPER_IMM),
    }
}

/// Picks an instruction from `pool` and draws operand values for it.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyPool`] if `pool` is empty.
pub fn generate_question<R: Rng + ?Sized>(
    pool: &[InstructionDescriptor],
    rng: &mut R,
) -> Result<Question, ConfigError> {
    let instruction = pool.choose(rng).ok_or(ConfigError::EmptyPool)?.clone();
    let operands = Operands {
        rs1: rng.gen_range(SOURCE_REGS),
        rs2: rng.gen_range(SOURCE_REGS),
        rd: rng.gen_range(DEST_REGS),
        imm: draw_immediate(instruction.format(), rng),
    };
    debug!(
        mnemonic = instruction.mnemonic(),
        ?operands,
        "generated question"
    );
    Ok(Question::new(instruction, operands))
}

/// Renders the question in canonical assembly syntax.
///
/// ```text
/// R:          add x3, x1, x2
/// I (offset): lw x2, 8(x1)
/// I:          addi x2, x1, 10
/// S:          sw x2, 8(x1)
/// B:          beq x1, x2, 4
/// U/J:        lui x1, 1
/// ```
pub fn format_assembly(question: &Question) -> String {
    let name = question.instruction.mnemonic();
    let Operands { rd, rs1, rs2, imm } = question.operands;
    match question.format() {
        Format::R => format!("{name} x{rd}, x{rs1}, x{rs2}"),
        Format::I if question.instruction.uses_offset_syntax() => {
            format!("{name} x{rd}, {imm}(x{rs1})")
        }
        Format::I => format!("{name} x{rd}, x{rs1}, {imm}"),
        Format::S => format!("{name} x{rs2}, {imm}(x{rs1})"),
        Format::B => format!("{name} x{rs1}, x{rs2}, {imm}"),
        Format::U | Format::J => format!("{name} x{rd}, {imm}"),
    }
}

/// Computes the canonical encoding the drills grade against.
///
/// # Errors
///
/// Propagates [`ValidationError`] from assembly; this only happens for a
/// descriptor missing a funct field its format requires.
pub fn compute_ground_truth(question: &Question) -> Result<GroundTruth, ValidationError> {
    assemble(&question.instruction, &question.operands)
}
