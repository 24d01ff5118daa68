//! Encode/decode entry points shared by every message type.
//!
//! A message is a sequence of tagged fields with no outer framing. When a
//! parent message embeds one, it wraps it as a length-delimited field, so
//! the length-delimited helpers here read and write a varint length prefix
//! followed by exactly that many bytes.

use bytes::{Buf, BufMut};

use crate::{
    config::DecodeConfig,
    errors::{ProtocolError, Result},
    varint::{read_varint, varint_len, write_varint},
};

/// A schema message that can be written to and read from the wire.
pub trait Message: Sized {
    /// Exact number of bytes [`Message::encode`] will write.
    fn encoded_len(&self) -> usize;

    /// Write every present field, then any retained unknown fields.
    fn encode<B: BufMut>(&self, buf: &mut B);

    /// Parse `input` as one complete message, without a size check.
    ///
    /// Implementations must consume all of `input` or fail.
    fn decode_fields(input: &[u8], config: &DecodeConfig) -> Result<Self>;

    /// Encode into a freshly allocated buffer.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode(&mut out);
        out
    }

    /// Decode a whole buffer with the default configuration.
    fn decode(input: &[u8]) -> Result<Self> {
        Self::decode_with(input, &DecodeConfig::default())
    }

    /// Decode a whole buffer.
    ///
    /// All-or-nothing: any malformed field fails the entire message.
    fn decode_with(input: &[u8], config: &DecodeConfig) -> Result<Self> {
        check_size(input.len() as u64, config)?;
        Self::decode_fields(input, config).inspect_err(|err| {
            tracing::debug!(len = input.len(), %err, "message decode failed");
        })
    }

    /// Size of the length-delimited form, prefix included
    fn encoded_len_delimited(&self) -> usize {
        let len = self.encoded_len();
        varint_len(len as u64) + len
    }

    /// Write a varint length prefix followed by the message.
    fn encode_length_delimited<B: BufMut>(&self, buf: &mut B) {
        write_varint(buf, self.encoded_len() as u64);
        self.encode(buf);
    }

    /// Read a varint length prefix, then decode exactly that many bytes.
    ///
    /// On success `buf` is left just past the message, ready for the
    /// parent's next field.
    fn decode_length_delimited<B: Buf>(buf: &mut B) -> Result<Self> {
        Self::decode_length_delimited_with(buf, &DecodeConfig::default())
    }

    /// [`Message::decode_length_delimited`] with explicit options.
    fn decode_length_delimited_with<B: Buf>(buf: &mut B, config: &DecodeConfig) -> Result<Self> {
        let declared = read_varint(buf)?;
        check_size(declared, config)?;

        let remaining = buf.remaining();
        let len = usize::try_from(declared)
            .ok()
            .filter(|len| *len <= remaining)
            .ok_or(ProtocolError::LengthOverrun { declared, remaining })?;

        let body = buf.copy_to_bytes(len);
        Self::decode_with(&body, config)
    }
}

fn check_size(size: u64, config: &DecodeConfig) -> Result<()> {
    match config.max_message_len {
        Some(max) if size > max as u64 => Err(ProtocolError::MessageTooLarge { size, max }),
        _ => Ok(()),
    }
}
