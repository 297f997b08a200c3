//! Canonical field layouts of the base instruction formats.
//!
//! Each layout lists the fields of a 32-bit instruction from bit 31 down to
//! bit 0. The order is fixed by the ISA:
//!
//! ```text
//! R: funct7     | rs2        | rs1 | funct3 | rd         | opcode
//! I: imm[11:0]               | rs1 | funct3 | rd         | opcode
//! S: imm[11:5]  | rs2        | rs1 | funct3 | imm[4:0]   | opcode
//! B: imm[12|10:5] | rs2      | rs1 | funct3 | imm[4:1|11] | opcode
//! U: imm[31:12]                               | rd         | opcode
//! J: imm[20|10:1|11|19:12]                    | rd         | opcode
//! ```
//!
//! Immediate slots are named by the bits of the logical immediate they carry,
//! so the assembler can pair each slot with its swizzled group by name.

use std::fmt;

use crate::common::bits::WORD_BITS;
use crate::common::error::ValidationError;
use crate::isa::format::Format;

/// Width of the opcode field.
pub const OPCODE_BITS: u32 = 7;
/// Width of the funct3 field.
pub const FUNCT3_BITS: u32 = 3;
/// Width of the funct7 field.
pub const FUNCT7_BITS: u32 = 7;
/// Width of a register index field.
pub const REG_BITS: u32 = 5;

/// A contiguous run of bits `hi..=lo` of the logical immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImmSlice {
    /// Most significant immediate bit carried.
    pub hi: u8,
    /// Least significant immediate bit carried.
    pub lo: u8,
}

impl ImmSlice {
    /// Creates a slice carrying immediate bits `hi..=lo`.
    pub const fn new(hi: u8, lo: u8) -> Self {
        Self { hi, lo }
    }

    /// Creates a slice carrying the single immediate bit `bit`.
    pub const fn bit(bit: u8) -> Self {
        Self { hi: bit, lo: bit }
    }

    /// Number of bits in the slice.
    pub const fn width(self) -> u32 {
        (self.hi - self.lo) as u32 + 1
    }
}

impl fmt::Display for ImmSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi == self.lo {
            write!(f, "imm[{}]", self.hi)
        } else {
            write!(f, "imm[{}:{}]", self.hi, self.lo)
        }
    }
}

/// I-type immediate, `imm[11:0]`.
pub const I_IMM: ImmSlice = ImmSlice::new(11, 0);
/// S-type upper immediate, `imm[11:5]`.
pub const S_IMM_11_5: ImmSlice = ImmSlice::new(11, 5);
/// S-type lower immediate, `imm[4:0]`.
pub const S_IMM_4_0: ImmSlice = ImmSlice::new(4, 0);
/// B-type sign bit, `imm[12]`.
pub const B_IMM_12: ImmSlice = ImmSlice::bit(12);
/// B-type `imm[10:5]`.
pub const B_IMM_10_5: ImmSlice = ImmSlice::new(10, 5);
/// B-type `imm[4:1]`.
pub const B_IMM_4_1: ImmSlice = ImmSlice::new(4, 1);
/// B-type `imm[11]`, emitted after `imm[4:1]`.
pub const B_IMM_11: ImmSlice = ImmSlice::bit(11);
/// U-type immediate, named `imm[31:12]` after the instruction bits it fills.
///
/// The one exception to slots naming logical-immediate bits: the U operand is
/// the raw 20-bit upper field, so this slot carries its bits 19:0 unshifted.
pub const U_IMM: ImmSlice = ImmSlice::new(31, 12);
/// J-type sign bit, `imm[20]`.
pub const J_IMM_20: ImmSlice = ImmSlice::bit(20);
/// J-type `imm[10:1]`.
pub const J_IMM_10_1: ImmSlice = ImmSlice::new(10, 1);
/// J-type `imm[11]`.
pub const J_IMM_11: ImmSlice = ImmSlice::bit(11);
/// J-type `imm[19:12]`.
pub const J_IMM_19_12: ImmSlice = ImmSlice::new(19, 12);

/// One slot of an instruction layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Major opcode, bits 6-0.
    Opcode,
    /// Minor opcode.
    Funct3,
    /// Additional R-type opcode bits.
    Funct7,
    /// First source register.
    Rs1,
    /// Second source register.
    Rs2,
    /// Destination register.
    Rd,
    /// Part of the immediate.
    Imm(ImmSlice),
}

impl Field {
    /// Number of instruction bits the slot occupies.
    pub const fn width(self) -> u32 {
        match self {
            Self::Opcode => OPCODE_BITS,
            Self::Funct3 => FUNCT3_BITS,
            Self::Funct7 => FUNCT7_BITS,
            Self::Rs1 | Self::Rs2 | Self::Rd => REG_BITS,
            Self::Imm(slice) => slice.width(),
        }
    }

    /// Whether the slot carries immediate bits.
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Imm(_))
    }

    /// Qualified slot name, e.g. `rs1` or `imm[11:5]`.
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opcode => f.write_str("opcode"),
            Self::Funct3 => f.write_str("funct3"),
            Self::Funct7 => f.write_str("funct7"),
            Self::Rs1 => f.write_str("rs1"),
            Self::Rs2 => f.write_str("rs2"),
            Self::Rd => f.write_str("rd"),
            Self::Imm(slice) => fmt::Display::fmt(slice, f),
        }
    }
}

const R_FIELDS: &[Field] = &[
    Field::Funct7,
    Field::Rs2,
    Field::Rs1,
    Field::Funct3,
    Field::Rd,
    Field::Opcode,
];

const I_FIELDS: &[Field] = &[
    Field::Imm(I_IMM),
    Field::Rs1,
    Field::Funct3,
    Field::Rd,
    Field::Opcode,
];

const S_FIELDS: &[Field] = &[
    Field::Imm(S_IMM_11_5),
    Field::Rs2,
    Field::Rs1,
    Field::Funct3,
    Field::Imm(S_IMM_4_0),
    Field::Opcode,
];

const B_FIELDS: &[Field] = &[
    Field::Imm(B_IMM_12),
    Field::Imm(B_IMM_10_5),
    Field::Rs2,
    Field::Rs1,
    Field::Funct3,
    Field::Imm(B_IMM_4_1),
    Field::Imm(B_IMM_11),
    Field::Opcode,
];

const U_FIELDS: &[Field] = &[Field::Imm(U_IMM), Field::Rd, Field::Opcode];

const J_FIELDS: &[Field] = &[
    Field::Imm(J_IMM_20),
    Field::Imm(J_IMM_10_1),
    Field::Imm(J_IMM_11),
    Field::Imm(J_IMM_19_12),
    Field::Rd,
    Field::Opcode,
];

/// Ordered field layout of one format, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLayout {
    format: Format,
    fields: &'static [Field],
}

impl FormatLayout {
    /// Returns the canonical layout of `format`.
    pub const fn of(format: Format) -> Self {
        let fields = match format {
            Format::R => R_FIELDS,
            Format::I => I_FIELDS,
            Format::S => S_FIELDS,
            Format::B => B_FIELDS,
            Format::U => U_FIELDS,
            Format::J => J_FIELDS,
        };
        Self { format, fields }
    }

    /// The format this layout belongs to.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Slots from bit 31 down to bit 0.
    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Qualified slot names in layout order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    /// Slot widths in layout order.
    pub fn bit_widths(&self) -> Vec<u32> {
        self.fields.iter().map(|f| f.width()).collect()
    }

    /// `(name, width)` pairs in layout order.
    pub fn entries(&self) -> Vec<(String, u32)> {
        self.fields.iter().map(|f| (f.name(), f.width())).collect()
    }

    /// Whether the layout contains `field`.
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Sum of all slot widths.
    pub fn total_bits(&self) -> u32 {
        self.fields.iter().map(|f| f.width()).sum()
    }

    /// Checks that the layout spans exactly one instruction word.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LayoutWidth`] if the widths do not sum to 32.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bits = self.total_bits();
        if bits == WORD_BITS {
            Ok(())
        } else {
            Err(ValidationError::LayoutWidth {
                format: self.format,
                bits,
            })
        }
    }
}
