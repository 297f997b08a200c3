//! Configuration and validation error definitions.
//!
//! Two error families are distinguished:
//! 1. **Configuration errors:** Caused by user choices (format selection, config files).
//!    These are recoverable by asking the user again.
//! 2. **Validation errors:** Caused by malformed arguments to the core (bad descriptor
//!    fields, out-of-range widths, broken layouts). These indicate a defect in the caller.
//!
//! A wrong drill answer is neither; graders report it as a negative verdict.

use std::path::PathBuf;

use thiserror::Error;

use crate::isa::format::Format;

/// Errors arising from drill configuration and instruction selection.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested format letters matched no instruction in the registry.
    #[error("no instructions found for formats {requested:?}")]
    EmptySelection {
        /// The format letters as supplied by the caller.
        requested: Vec<String>,
    },

    /// A format letter is not one of R, I, S, B, U, J.
    #[error("invalid instruction format `{0}` (expected one of R, I, S, B, U, J)")]
    InvalidFormat(String),

    /// A question was requested from an empty instruction pool.
    #[error("instruction pool is empty; select instruction formats first")]
    EmptyPool,

    /// The built-in instruction table failed validation.
    #[error("invalid instruction registry: {0}")]
    Registry(#[from] ValidationError),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Load {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a drill config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors arising from malformed arguments or broken encoding invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An instruction descriptor was given an empty mnemonic.
    #[error("mnemonic must be a non-empty string")]
    EmptyMnemonic,

    /// An instruction descriptor was given an unknown format letter.
    #[error("format must be one of R, I, S, B, U, J, got `{0}`")]
    UnknownFormat(String),

    /// The opcode does not fit in 7 bits.
    #[error("opcode must be a 7-bit integer, got {0:#x}")]
    OpcodeOutOfRange(u32),

    /// The funct3 value does not fit in 3 bits.
    #[error("funct3 must be a 3-bit integer, got {0:#x}")]
    Funct3OutOfRange(u32),

    /// The funct7 value does not fit in 7 bits.
    #[error("funct7 must be a 7-bit integer, got {0:#x}")]
    Funct7OutOfRange(u32),

    /// A binary field width outside `[1, 64]` was requested.
    #[error("binary width must be in range [1, 64], got {0}")]
    InvalidWidth(u32),

    /// A sign-extension width outside `[1, 32]` was requested.
    #[error("sign-extension width must be in range [1, 32], got {0}")]
    InvalidSignWidth(u32),

    /// A string that should hold only `0`/`1` digits (at most 32 of them) does not.
    #[error("malformed binary string `{0}`")]
    MalformedBinary(String),

    /// A format layout does not span exactly 32 bits.
    #[error("{format}-type layout spans {bits} bits, expected 32")]
    LayoutWidth {
        /// Offending format.
        format: Format,
        /// Sum of the layout's field widths.
        bits: u32,
    },

    /// A layout names an immediate slot that the swizzler did not produce.
    #[error("{format}-type swizzle produced no group for slot {slot}")]
    MissingImmediate {
        /// Offending format.
        format: Format,
        /// Qualified name of the unmatched slot.
        slot: String,
    },

    /// A layout requires a funct field that the descriptor does not carry.
    #[error("instruction `{mnemonic}` has no {field} but its layout requires one")]
    MissingFunct {
        /// Mnemonic of the descriptor.
        mnemonic: String,
        /// `funct3` or `funct7`.
        field: &'static str,
    },

    /// The assembled word is not exactly 32 characters long.
    #[error("assembled word is {0} bits wide, expected 32")]
    WordWidth(usize),

    /// A 32-bit word does not match any instruction in the registry.
    #[error("no registered instruction encodes as {0:#010x}")]
    UnknownEncoding(u32),
}
