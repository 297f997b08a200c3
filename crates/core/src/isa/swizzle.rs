//! Immediate swizzling.
//!
//! The S, B and J formats scatter the immediate across non-contiguous slots,
//! and B/J additionally permute the bit groups so that the sign bit always
//! sits in instruction bit 31. Each function here takes the logical immediate
//! and returns its groups in emission order (the order the slots appear in
//! the format layout), each tagged with the immediate bits it carries.
//!
//! ```text
//! S: imm[11:5] imm[4:0]
//! B: imm[12] imm[10:5] imm[4:1] imm[11]
//! J: imm[20] imm[10:1] imm[11] imm[19:12]
//! ```
//!
//! Masking uses unsigned operations on the two's-complement pattern, so
//! negative immediates produce the encoded bits directly.

use crate::common::bits::to_binary;
use crate::common::error::ValidationError;
use crate::isa::format::Format;
use crate::isa::layout::{
    B_IMM_4_1, B_IMM_10_5, B_IMM_11, B_IMM_12, I_IMM, ImmSlice, J_IMM_10_1, J_IMM_11, J_IMM_19_12,
    J_IMM_20, S_IMM_4_0, S_IMM_11_5, U_IMM,
};

/// Mask of the 12-bit I/S-type immediate.
const IMM12_MASK: u32 = 0xFFF;

/// Mask of the 13-bit B-type immediate with bit 0 cleared.
const B_IMM_MASK: u32 = 0x1FFE;

/// Mask of the 21-bit J-type immediate with bit 0 cleared.
const J_IMM_MASK: u32 = 0x1F_FFFE;

/// Mask of the raw 20-bit U-type field.
const U_IMM_MASK: u32 = 0xF_FFFF;

/// One swizzled immediate group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmGroup {
    /// Immediate bits carried by the group.
    pub slice: ImmSlice,
    /// Group value as a binary string of `slice.width()` characters.
    pub bits: String,
}

impl ImmGroup {
    /// Extracts `slice` from an already masked immediate.
    fn extract(masked: u32, slice: ImmSlice) -> Result<Self, ValidationError> {
        let value = (masked >> slice.lo) & ((1u32 << slice.width()) - 1);
        Self::with_value(slice, value)
    }

    fn with_value(slice: ImmSlice, value: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            slice,
            bits: to_binary(i64::from(value), slice.width())?,
        })
    }
}

/// I-type: the low 12 bits as a single group.
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn i_type(imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    Ok(vec![ImmGroup::extract(imm as u32 & IMM12_MASK, I_IMM)?])
}

/// S-type: `imm[11:5]` (7 bits) then `imm[4:0]` (5 bits).
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn s_type(imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    let val = imm as u32 & IMM12_MASK;
    Ok(vec![
        ImmGroup::extract(val, S_IMM_11_5)?,
        ImmGroup::extract(val, S_IMM_4_0)?,
    ])
}

/// B-type: `imm[12]`, `imm[10:5]`, `imm[4:1]`, `imm[11]`.
///
/// Bit 0 is dropped; branch targets are always even.
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn b_type(imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    let val = imm as u32 & B_IMM_MASK;
    Ok(vec![
        ImmGroup::extract(val, B_IMM_12)?,
        ImmGroup::extract(val, B_IMM_10_5)?,
        ImmGroup::extract(val, B_IMM_4_1)?,
        ImmGroup::extract(val, B_IMM_11)?,
    ])
}

/// U-type: the low 20 bits as a single group.
///
/// The immediate is the raw field value, not an address to be shifted.
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn u_type(imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    Ok(vec![ImmGroup::with_value(U_IMM, imm as u32 & U_IMM_MASK)?])
}

/// J-type: `imm[20]`, `imm[10:1]`, `imm[11]`, `imm[19:12]`.
///
/// Bit 0 is dropped; jump targets are always even.
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn j_type(imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    let val = imm as u32 & J_IMM_MASK;
    Ok(vec![
        ImmGroup::extract(val, J_IMM_20)?,
        ImmGroup::extract(val, J_IMM_10_1)?,
        ImmGroup::extract(val, J_IMM_11)?,
        ImmGroup::extract(val, J_IMM_19_12)?,
    ])
}

/// Swizzles `imm` for `format`. R-type carries no immediate.
///
/// # Errors
///
/// Propagates [`ValidationError`] from bit formatting.
pub fn swizzle(format: Format, imm: i32) -> Result<Vec<ImmGroup>, ValidationError> {
    match format {
        Format::R => Ok(Vec::new()),
        Format::I => i_type(imm),
        Format::S => s_type(imm),
        Format::B => b_type(imm),
        Format::U => u_type(imm),
        Format::J => j_type(imm),
    }
}
