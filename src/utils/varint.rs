//! Unsigned variable-length integers.
//!
//! Multiformats prefix their values with codes encoded as unsigned LEB128:
//! seven bits per octet, least significant group first, with the high bit
//! of every octet but the last set. The content-hash codec uses this for
//! its protocol codes.
//!
//! Only values that fit into a `u64` are supported. Following the
//! multiformats rules, an encoding may be at most nine octets long and must
//! be minimal, i.e., it must not end in a zero octet unless the value is
//! zero itself.

use core::fmt;

/// The maximum number of octets of an encoded value.
pub const MAX_LEN: usize = 9;

/// The largest value that can be encoded, i.e., 2^63 - 1.
pub const MAX_VALUE: u64 = (1 << 63) - 1;

//------------ Convenience Functions -----------------------------------------

/// Appends the encoding of `value` to `target`.
///
/// Values up to [`MAX_VALUE`] fit into [`MAX_LEN`] octets. Larger values
/// are encoded in ten octets which [`split_from`] refuses.
pub fn encode_into(mut value: u64, target: &mut Vec<u8>) {
    debug_assert!(value <= MAX_VALUE, "varint value too large");
    loop {
        let octet = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            target.push(octet);
            return;
        }
        target.push(octet | 0x80);
    }
}

/// Returns the encoding of `value` as a vec.
///
/// The same limit as for [`encode_into`] applies.
pub fn encode_vec(value: u64) -> Vec<u8> {
    let mut res = Vec::with_capacity(MAX_LEN);
    encode_into(value, &mut res);
    res
}

/// Splits a value from the beginning of an octets slice.
///
/// On success, returns the value and the remainder of the slice.
pub fn split_from(slice: &[u8]) -> Result<(u64, &[u8]), DecodeError> {
    let mut value = 0u64;
    for (idx, &octet) in slice.iter().enumerate() {
        if idx == MAX_LEN {
            return Err(DecodeError::Overlong);
        }
        value |= u64::from(octet & 0x7F) << (7 * idx);
        if octet & 0x80 == 0 {
            if octet == 0 && idx > 0 {
                return Err(DecodeError::NotMinimal);
            }
            return Ok((value, &slice[idx + 1..]));
        }
    }
    Err(DecodeError::ShortInput)
}

//============ Error Types ===================================================

//------------ DecodeError ---------------------------------------------------

/// An encoded integer could not be decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The input ended before the final octet.
    ShortInput,

    /// The encoding exceeds the maximum length.
    Overlong,

    /// The encoding has superfluous trailing zero groups.
    NotMinimal,
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::ShortInput => f.write_str("unexpected end of input"),
            DecodeError::Overlong => f.write_str("varint too long"),
            DecodeError::NotMinimal => f.write_str("varint not minimal"),
        }
    }
}

impl std::error::Error for DecodeError {}

//============ Testing =======================================================
