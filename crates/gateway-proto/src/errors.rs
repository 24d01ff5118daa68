//! Decode errors.
//!
//! Encoding never fails, so every variant here describes malformed input
//! seen while decoding. Unknown fields and unknown enum codes are not errors.

use thiserror::Error;

/// Result alias used throughout the codec
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Malformed-input errors reported by the decoder.
///
/// Decoding is all-or-nothing: when any of these is returned, no partial
/// record is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Buffer ended in the middle of a tag, varint, or fixed-width value
    #[error("input truncated")]
    Truncated,

    /// Wire type code is not one of varint (0), fixed64 (1),
    /// length-delimited (2) or fixed32 (5).
    ///
    /// Also returned for a known field with the wrong wire type when
    /// [`DecodeConfig::strict_wire_types`](crate::DecodeConfig::strict_wire_types)
    /// is enabled.
    #[error("invalid wire type: {0}")]
    InvalidWireType(u8),

    /// Length-delimited field claims more bytes than remain
    #[error("length-delimited field declares {declared} bytes, only {remaining} remain")]
    LengthOverrun {
        /// Length carried by the prefix
        declared: u64,
        /// Bytes actually left in the buffer
        remaining: usize,
    },

    /// Varint longer than 10 bytes or wider than its target integer
    #[error("varint overflow")]
    VarintOverflow,

    /// Input exceeds the configured maximum message length
    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge {
        /// Size of the rejected message
        size: u64,
        /// Configured limit
        max: usize,
    },
}
