//! R-type `funct7` values (bits 31-25).
//!
//! Only two values occur in the base integer set: the default encoding and
//! the alternate one that turns ADD into SUB and SRL into SRA.

/// ADD, SLL, SLT, SLTU, XOR, SRL, OR, AND.
pub const DEFAULT: u32 = 0b000_0000;

/// SUB and SRA; bit 30 set.
pub const ALT: u32 = 0b010_0000;
