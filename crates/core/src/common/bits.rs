//! Fixed-width bit formatting.
//!
//! Every field of an instruction is shown to the user as a zero-padded binary
//! string, and the whole word as eight lowercase hex digits. Negative values
//! are masked to the requested width, which yields their two's-complement
//! bit pattern.

use crate::common::error::ValidationError;

/// Width of a RISC-V base instruction in bits.
pub const WORD_BITS: u32 = 32;

/// Widest field `to_binary` can format.
const MAX_BINARY_WIDTH: u32 = 64;

/// Mask selecting the low 32 bits of a value.
const WORD_MASK: u64 = 0xFFFF_FFFF;

/// Masks `value` to its low `width` bits.
#[inline]
fn low_bits(value: i64, width: u32) -> u64 {
    let raw = value as u64;
    if width >= MAX_BINARY_WIDTH {
        raw
    } else {
        raw & ((1u64 << width) - 1)
    }
}

/// Formats `value` as a `width`-character binary string, MSB first.
///
/// The value is masked to `width` bits before formatting, so negative inputs
/// produce their two's-complement truncation.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidWidth`] if `width` is zero or wider than 64.
///
/// # Examples
///
/// ```
/// use rvtutor_core::common::to_binary;
/// assert_eq!(to_binary(5, 4).unwrap(), "0101");
/// assert_eq!(to_binary(-1, 3).unwrap(), "111");
/// ```
pub fn to_binary(value: i64, width: u32) -> Result<String, ValidationError> {
    if width == 0 || width > MAX_BINARY_WIDTH {
        return Err(ValidationError::InvalidWidth(width));
    }
    Ok(format!(
        "{:0width$b}",
        low_bits(value, width),
        width = width as usize
    ))
}

/// Formats the low 32 bits of `value` as exactly 8 lowercase hex digits.
pub fn to_hex(value: i64) -> String {
    format!("{:08x}", (value as u64) & WORD_MASK)
}

/// Interprets the low `width` bits of `value` as a two's-complement number.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidSignWidth`] if `width` is outside `[1, 32]`.
pub fn sign_extend(value: i64, width: u32) -> Result<i32, ValidationError> {
    if width == 0 || width > WORD_BITS {
        return Err(ValidationError::InvalidSignWidth(width));
    }
    let shift = WORD_BITS - width;
    Ok(((value as u32) << shift) as i32 >> shift)
}

/// Parses a string of at most 32 binary digits into a word.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedBinary`] if the string is empty, longer
/// than 32 characters, or contains anything other than `0` and `1`.
pub fn parse_binary(bits: &str) -> Result<u32, ValidationError> {
    let well_formed = !bits.is_empty()
        && bits.len() <= WORD_BITS as usize
        && bits.bytes().all(|b| b == b'0' || b == b'1');
    if !well_formed {
        return Err(ValidationError::MalformedBinary(bits.to_owned()));
    }
    u32::from_str_radix(bits, 2).map_err(|_| ValidationError::MalformedBinary(bits.to_owned()))
}
