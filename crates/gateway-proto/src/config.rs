//! Decoder options.

/// 16 MiB cap for callers that want one, e.g. when reading from a socket
/// into a buffer sized by the peer.
pub const FRAME_MAX_MESSAGE_LEN: usize = 16 * 1024 * 1024;

/// Decoder configuration
///
/// `Default` gives the lenient behaviour every standard implementation of
/// the wire format follows: a known field arriving with an unexpected wire
/// type is kept as an unknown field rather than rejected, and there is no
/// size limit beyond the input itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Reject known fields whose wire type does not match the schema
    pub strict_wire_types: bool,
    /// Largest message accepted, top-level or nested. `None` means unlimited.
    pub max_message_len: Option<usize>,
}

impl DecodeConfig {
    /// No size limit, strict wire type checking enabled
    pub fn strict() -> Self {
        Self { strict_wire_types: true, ..Self::default() }
    }

    /// Reject messages longer than `max` bytes
    pub fn with_max_message_len(mut self, max: usize) -> Self {
        self.max_message_len = Some(max);
        self
    }
}
