//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the RV32I encoding constants, the base instruction formats and
//! their field layouts, the instruction registry, and the encode/decode paths.
//!
//! # Data Flow
//!
//! The registry supplies a descriptor and its layout, the swizzler splits the
//! immediate into the groups the format requires, and the encoder walks the
//! layout to produce the final word. The decoder runs the same path backwards.

/// Instruction decoding for the six base formats.
pub mod decode;

/// Ground-truth assembly of an instruction instance.
pub mod encode;

/// Base instruction format letters.
pub mod format;

/// Field extraction and operand values.
pub mod instruction;

/// Canonical per-format field layouts.
pub mod layout;

/// Validated instruction catalog.
pub mod registry;

/// Base integer instruction set encoding constants.
pub mod rv32i;

/// Immediate decomposition into per-format bit groups.
pub mod swizzle;
