//! Field tags and wire types.
//!
//! Every field on the wire starts with a varint tag
//! `(field_number << 3) | wire_type`. The wire type alone is enough to find
//! the end of a field, which is what lets the decoder carry fields it does
//! not understand.

use bytes::{Buf, BufMut};

use crate::{
    errors::{ProtocolError, Result},
    varint::{read_varint, varint_len, write_varint},
};

/// How the bytes following a tag are laid out.
///
/// Only these four codes are accepted. Group start/end (3 and 4) are
/// deprecated and rejected along with 6 and 7, so a proto2 group such as
/// `4b 50 01 4c` fails with [`ProtocolError::InvalidWireType`]. Decoders that
/// still understand groups would keep it as an unknown field instead; peers
/// that send groups cannot talk through this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint
    Varint = 0,
    /// Eight little-endian bytes
    Fixed64 = 1,
    /// Varint length followed by that many bytes
    LengthDelimited = 2,
    /// Four little-endian bytes
    Fixed32 = 5,
}

impl WireType {
    /// Parse the low three bits of a tag.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            other => Err(ProtocolError::InvalidWireType(other)),
        }
    }

    /// Numeric code as it appears in the tag
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

/// A decoded field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Field number from the schema
    pub field_number: u32,
    /// Layout of the payload that follows
    pub wire_type: WireType,
}

impl Tag {
    /// Create a tag
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self { field_number, wire_type }
    }

    /// Tag value before varint encoding
    pub const fn key(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type.code() as u64
    }

    /// Read a tag varint and split it.
    ///
    /// Tags wider than 32 bits are rejected as [`ProtocolError::VarintOverflow`].
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        let key = read_varint(buf)?;
        let key = u32::try_from(key).map_err(|_| ProtocolError::VarintOverflow)?;
        let wire_type = WireType::from_code((key & 0x7) as u8)?;
        Ok(Self { field_number: key >> 3, wire_type })
    }

    /// Append the tag varint to `buf`.
    pub fn encode<B: BufMut>(self, buf: &mut B) {
        write_varint(buf, self.key());
    }

    /// Encoded size of the tag
    pub const fn encoded_len(self) -> usize {
        varint_len(self.key())
    }
}

/// Advance `buf` past one field payload of the given wire type.
///
/// Nothing is interpreted; this only validates that the payload is complete.
pub fn skip_payload<B: Buf>(wire_type: WireType, buf: &mut B) -> Result<()> {
    match wire_type {
        WireType::Varint => read_varint(buf).map(|_| ()),
        WireType::Fixed64 => skip_exact(buf, 8),
        WireType::Fixed32 => skip_exact(buf, 4),
        WireType::LengthDelimited => {
            let declared = read_varint(buf)?;
            let remaining = buf.remaining();
            match usize::try_from(declared) {
                Ok(len) if len <= remaining => {
                    buf.advance(len);
                    Ok(())
                },
                _ => Err(ProtocolError::LengthOverrun { declared, remaining }),
            }
        },
    }
}

fn skip_exact<B: Buf>(buf: &mut B, len: usize) -> Result<()> {
    if buf.remaining() < len {
        return Err(ProtocolError::Truncated);
    }
    buf.advance(len);
    Ok(())
}
