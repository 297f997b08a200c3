//! Common utilities and types used throughout the encoding core.
//!
//! This module provides the building blocks shared by the ISA and quiz layers:
//! 1. **Bit Formatting:** Fixed-width binary strings, 8-digit hex, binary parsing, sign extension.
//! 2. **Error Handling:** Configuration and validation error types.

/// Fixed-width binary/hex formatting and sign extension.
pub mod bits;

/// Error types for configuration and validation failures.
pub mod error;

pub use bits::{parse_binary, sign_extend, to_binary, to_hex};
pub use error::{ConfigError, ValidationError};
