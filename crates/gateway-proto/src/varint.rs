//! Base-128 varints.
//!
//! Seven bits per byte, least-significant group first, high bit set on every
//! byte except the last. A `u64` never needs more than 10 bytes.
//!
//! `int32` values are not zig-zag encoded: they are sign-extended to 64 bits
//! and the two's-complement pattern is written as an unsigned varint, so
//! negative numbers always take the full 10 bytes.

use bytes::{Buf, BufMut};

use crate::errors::{ProtocolError, Result};

/// Longest legal varint, in bytes
pub const MAX_VARINT_LEN: usize = 10;

/// Read one varint from the front of `buf`.
///
/// Fails with [`ProtocolError::Truncated`] if the buffer runs out while the
/// continuation bit is still set, and with [`ProtocolError::VarintOverflow`]
/// if the value does not fit in 64 bits.
pub fn read_varint<B: Buf>(buf: &mut B) -> Result<u64> {
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(ProtocolError::Truncated);
        }
        let byte = buf.get_u8();

        // Tenth byte may only contribute the single top bit.
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(ProtocolError::VarintOverflow);
        }

        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(ProtocolError::VarintOverflow)
}

/// Append `value` to `buf` as a varint.
pub fn write_varint<B: BufMut>(buf: &mut B, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes [`write_varint`] emits for `value`.
pub const fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Two's-complement reinterpretation of an `int32` for the wire.
pub const fn int32_to_wire(value: i32) -> u64 {
    value as i64 as u64
}

/// Truncate a wire varint to `int32`, keeping the low 32 bits.
pub const fn int32_from_wire(value: u64) -> i32 {
    value as i32
}
