//! Opaque storage for fields the schema does not know about.

use std::fmt;

use bytes::{BufMut, BytesMut};

/// Raw tag+payload bytes of unrecognised fields, in the order they were read.
///
/// The codec never looks inside. Everything retained here is written back
/// unchanged after the known fields on the next encode.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    raw: BytesMut,
}

impl UnknownFields {
    /// Empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained bytes, exactly as they appeared on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Total retained size in bytes
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True if nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Drop all retained bytes
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub(crate) fn push_field(&mut self, field: &[u8]) {
        self.raw.extend_from_slice(field);
    }

    pub(crate) fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }
}

impl AsRef<[u8]> for UnknownFields {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for UnknownFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownFields").field("len", &self.raw.len()).finish()
    }
}
