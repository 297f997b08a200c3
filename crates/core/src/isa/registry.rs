//! Instruction registry.
//!
//! A fixed catalog of RV32I base instructions, each described by its mnemonic,
//! format and opcode/funct values. Every entry is built through the validating
//! [`InstructionDescriptor::new`] constructor, so a typo in the table surfaces
//! as an error instead of a silently wrong encoding.

use serde::Serialize;
use tracing::warn;

use crate::common::error::{ConfigError, ValidationError};
use crate::isa::format::Format;
use crate::isa::instruction::InstructionBits;
use crate::isa::layout::FormatLayout;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Largest opcode value (exclusive).
const OPCODE_LIMIT: u32 = 1 << 7;
/// Largest funct3 value (exclusive).
const FUNCT3_LIMIT: u32 = 1 << 3;
/// Largest funct7 value (exclusive).
const FUNCT7_LIMIT: u32 = 1 << 7;

/// Mnemonics written `rd, imm(rs1)` rather than `rd, rs1, imm`.
const OFFSET_SYNTAX: &[&str] = &["lb", "lh", "lw", "lbu", "lhu", "jalr"];

/// Raw registry row: mnemonic, format letter, opcode, funct3, funct7.
type Row = (&'static str, &'static str, u32, Option<u32>, Option<u32>);

#[rustfmt::skip]
const BASE_TABLE: &[Row] = &[
    // ── R-type ────────────────────────────────────────
    ("add",   "R", opcodes::OP_REG,    Some(funct3::ADD_SUB), Some(funct7::DEFAULT)),
    ("sub",   "R", opcodes::OP_REG,    Some(funct3::ADD_SUB), Some(funct7::ALT)),
    ("sll",   "R", opcodes::OP_REG,    Some(funct3::SLL),     Some(funct7::DEFAULT)),
    ("slt",   "R", opcodes::OP_REG,    Some(funct3::SLT),     Some(funct7::DEFAULT)),
    ("sltu",  "R", opcodes::OP_REG,    Some(funct3::SLTU),    Some(funct7::DEFAULT)),
    ("xor",   "R", opcodes::OP_REG,    Some(funct3::XOR),     Some(funct7::DEFAULT)),
    ("srl",   "R", opcodes::OP_REG,    Some(funct3::SRL_SRA), Some(funct7::DEFAULT)),
    ("sra",   "R", opcodes::OP_REG,    Some(funct3::SRL_SRA), Some(funct7::ALT)),
    ("or",    "R", opcodes::OP_REG,    Some(funct3::OR),      Some(funct7::DEFAULT)),
    ("and",   "R", opcodes::OP_REG,    Some(funct3::AND),     Some(funct7::DEFAULT)),
    // ── I-type ────────────────────────────────────────
    ("addi",  "I", opcodes::OP_IMM,    Some(funct3::ADD_SUB), None),
    ("lw",    "I", opcodes::OP_LOAD,   Some(funct3::LW),      None),
    ("slti",  "I", opcodes::OP_IMM,    Some(funct3::SLT),     None),
    ("sltiu", "I", opcodes::OP_IMM,    Some(funct3::SLTU),    None),
    ("xori",  "I", opcodes::OP_IMM,    Some(funct3::XOR),     None),
    ("ori",   "I", opcodes::OP_IMM,    Some(funct3::OR),      None),
    ("andi",  "I", opcodes::OP_IMM,    Some(funct3::AND),     None),
    ("lb",    "I", opcodes::OP_LOAD,   Some(funct3::LB),      None),
    ("lh",    "I", opcodes::OP_LOAD,   Some(funct3::LH),      None),
    ("lbu",   "I", opcodes::OP_LOAD,   Some(funct3::LBU),     None),
    ("lhu",   "I", opcodes::OP_LOAD,   Some(funct3::LHU),     None),
    ("jalr",  "I", opcodes::OP_JALR,   Some(funct3::JALR),    None),
    // ── S-type ────────────────────────────────────────
    ("sw",    "S", opcodes::OP_STORE,  Some(funct3::SW),      None),
    ("sb",    "S", opcodes::OP_STORE,  Some(funct3::SB),      None),
    ("sh",    "S", opcodes::OP_STORE,  Some(funct3::SH),      None),
    // ── B-type ────────────────────────────────────────
    ("beq",   "B", opcodes::OP_BRANCH, Some(funct3::BEQ),     None),
    ("bne",   "B", opcodes::OP_BRANCH, Some(funct3::BNE),     None),
    ("blt",   "B", opcodes::OP_BRANCH, Some(funct3::BLT),     None),
    ("bge",   "B", opcodes::OP_BRANCH, Some(funct3::BGE),     None),
    ("bltu",  "B", opcodes::OP_BRANCH, Some(funct3::BLTU),    None),
    ("bgeu",  "B", opcodes::OP_BRANCH, Some(funct3::BGEU),    None),
    // ── U-type ────────────────────────────────────────
    ("lui",   "U", opcodes::OP_LUI,    None,                  None),
    ("auipc", "U", opcodes::OP_AUIPC,  None,                  None),
    // ── J-type ────────────────────────────────────────
    ("jal",   "J", opcodes::OP_JAL,    None,                  None),
];

/// Immutable description of one instruction's fixed encoding fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstructionDescriptor {
    mnemonic: String,
    format: Format,
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
}

impl InstructionDescriptor {
    /// Creates a descriptor, normalizing the mnemonic to lowercase and the
    /// format letter to uppercase.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the mnemonic is empty, the format is not
    /// one of `RISBUJ`, the opcode does not fit in 7 bits, or a supplied
    /// funct3/funct7 does not fit in 3/7 bits.
    pub fn new(
        mnemonic: &str,
        format: &str,
        opcode: u32,
        funct3: Option<u32>,
        funct7: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let mnemonic = mnemonic.trim();
        if mnemonic.is_empty() {
            return Err(ValidationError::EmptyMnemonic);
        }
        let format = Format::from_letter(format)
            .ok_or_else(|| ValidationError::UnknownFormat(format.to_owned()))?;
        if opcode >= OPCODE_LIMIT {
            return Err(ValidationError::OpcodeOutOfRange(opcode));
        }
        if let Some(f3) = funct3.filter(|&f3| f3 >= FUNCT3_LIMIT) {
            return Err(ValidationError::Funct3OutOfRange(f3));
        }
        if let Some(f7) = funct7.filter(|&f7| f7 >= FUNCT7_LIMIT) {
            return Err(ValidationError::Funct7OutOfRange(f7));
        }

        Ok(Self {
            mnemonic: mnemonic.to_lowercase(),
            format,
            opcode,
            funct3,
            funct7,
        })
    }

    /// Lowercase mnemonic.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Instruction format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// 7-bit major opcode.
    pub const fn opcode(&self) -> u32 {
        self.opcode
    }

    /// 3-bit minor opcode, if the instruction has one.
    pub const fn funct3(&self) -> Option<u32> {
        self.funct3
    }

    /// 7-bit funct7, if the instruction has one.
    pub const fn funct7(&self) -> Option<u32> {
        self.funct7
    }

    /// Field layout of the instruction's format.
    pub const fn layout(&self) -> FormatLayout {
        FormatLayout::of(self.format)
    }

    /// Whether the assembly form is `rd, imm(rs1)` (loads and `jalr`).
    pub fn uses_offset_syntax(&self) -> bool {
        self.format == Format::I && OFFSET_SYNTAX.contains(&self.mnemonic.as_str())
    }

    /// Whether `word` carries this instruction's opcode and funct fields.
    pub fn matches_word(&self, word: u32) -> bool {
        word.opcode() == self.opcode
            && self.funct3.is_none_or(|f3| word.funct3() == f3)
            && self.funct7.is_none_or(|f7| word.funct7() == f7)
    }
}

/// Validated, ordered catalog of instruction descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRegistry {
    instructions: Vec<InstructionDescriptor>,
}

impl InstructionRegistry {
    /// Builds the built-in RV32I catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by a table row.
    pub fn base() -> Result<Self, ValidationError> {
        let instructions = BASE_TABLE
            .iter()
            .map(|&(mnemonic, format, opcode, f3, f7)| {
                InstructionDescriptor::new(mnemonic, format, opcode, f3, f7)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { instructions })
    }

    /// Wraps an already validated list of descriptors.
    pub const fn from_descriptors(instructions: Vec<InstructionDescriptor>) -> Self {
        Self { instructions }
    }

    /// All descriptors in registry order.
    pub fn instructions(&self) -> &[InstructionDescriptor] {
        &self.instructions
    }

    /// Number of registered instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Looks up a descriptor by mnemonic, ignoring case.
    pub fn find(&self, mnemonic: &str) -> Option<&InstructionDescriptor> {
        let wanted = mnemonic.trim().to_lowercase();
        self.instructions.iter().find(|d| d.mnemonic == wanted)
    }

    /// Returns the descriptors whose format is any of `formats`, in registry order.
    ///
    /// Letters are matched case-insensitively. Entries that are not a format
    /// letter are ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySelection`] if no descriptor matches.
    pub fn filter<S: AsRef<str>>(
        &self,
        formats: &[S],
    ) -> Result<Vec<InstructionDescriptor>, ConfigError> {
        let mut wanted = Vec::with_capacity(formats.len());
        for entry in formats {
            match Format::from_letter(entry.as_ref()) {
                Some(format) => wanted.push(format),
                None => warn!(entry = entry.as_ref(), "ignoring unknown instruction format"),
            }
        }

        let pool: Vec<_> = self
            .instructions
            .iter()
            .filter(|d| wanted.contains(&d.format))
            .cloned()
            .collect();

        if pool.is_empty() {
            return Err(ConfigError::EmptySelection {
                requested: formats.iter().map(|s| s.as_ref().to_owned()).collect(),
            });
        }
        Ok(pool)
    }

    /// Finds the descriptor whose opcode and funct fields match `word`.
    pub fn identify(&self, word: u32) -> Option<&InstructionDescriptor> {
        self.instructions.iter().find(|d| d.matches_word(word))
    }
}

/// Filters the built-in registry by format letters.
///
/// # Errors
///
/// Returns [`ConfigError::EmptySelection`] if nothing matches, or
/// [`ConfigError::Registry`] if the built-in table fails validation.
pub fn filter_instructions<S: AsRef<str>>(
    formats: &[S],
) -> Result<Vec<InstructionDescriptor>, ConfigError> {
    InstructionRegistry::base()?.filter(formats)
}
