//! Token accounting record shared by the client and the gateway.
//!
//! ```text
//! field 1  prompt_tokens      optional int32  (varint)
//! field 2  completion_tokens  optional int32  (varint)
//! field 3  total_tokens       optional int32  (varint)
//! ```
//!
//! All three fields track presence explicitly. A present zero is encoded as
//! a tag plus `0x00`; an absent field is not encoded at all.

use std::fmt;

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::{
    config::DecodeConfig,
    errors::{ProtocolError, Result},
    message::Message,
    unknown::UnknownFields,
    varint::{int32_from_wire, int32_to_wire, read_varint, varint_len, write_varint},
    wire::{Tag, WireType, skip_payload},
};

/// Token counts for a single request.
///
/// The codec does not check that `total_tokens` equals the sum of the other
/// two; see [`Usage::is_consistent`] for callers that want to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt_tokens: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    completion_tokens: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_tokens: Option<i32>,

    #[serde(skip)]
    unknown: UnknownFields,
}

impl Usage {
    /// Field number of `prompt_tokens`
    pub const PROMPT_TOKENS: u32 = 1;
    /// Field number of `completion_tokens`
    pub const COMPLETION_TOKENS: u32 = 2;
    /// Field number of `total_tokens`
    pub const TOTAL_TOKENS: u32 = 3;

    /// Empty record, every field absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a record field by field
    pub fn builder() -> UsageBuilder {
        UsageBuilder::default()
    }

    /// Tokens consumed by the prompt, 0 if unset
    pub fn prompt_tokens(&self) -> i32 {
        self.prompt_tokens.unwrap_or_default()
    }

    /// Tokens produced by the completion, 0 if unset
    pub fn completion_tokens(&self) -> i32 {
        self.completion_tokens.unwrap_or_default()
    }

    /// Total tokens for the request, 0 if unset
    pub fn total_tokens(&self) -> i32 {
        self.total_tokens.unwrap_or_default()
    }

    /// `prompt_tokens` with presence
    pub fn prompt_tokens_opt(&self) -> Option<i32> {
        self.prompt_tokens
    }

    /// `completion_tokens` with presence
    pub fn completion_tokens_opt(&self) -> Option<i32> {
        self.completion_tokens
    }

    /// `total_tokens` with presence
    pub fn total_tokens_opt(&self) -> Option<i32> {
        self.total_tokens
    }

    /// Whether `prompt_tokens` was set
    pub fn has_prompt_tokens(&self) -> bool {
        self.prompt_tokens.is_some()
    }

    /// Whether `completion_tokens` was set
    pub fn has_completion_tokens(&self) -> bool {
        self.completion_tokens.is_some()
    }

    /// Whether `total_tokens` was set
    pub fn has_total_tokens(&self) -> bool {
        self.total_tokens.is_some()
    }

    /// Set `prompt_tokens`
    pub fn set_prompt_tokens(&mut self, value: i32) {
        self.prompt_tokens = Some(value);
    }

    /// Set `completion_tokens`
    pub fn set_completion_tokens(&mut self, value: i32) {
        self.completion_tokens = Some(value);
    }

    /// Set `total_tokens`
    pub fn set_total_tokens(&mut self, value: i32) {
        self.total_tokens = Some(value);
    }

    /// Mark `prompt_tokens` absent
    pub fn clear_prompt_tokens(&mut self) {
        self.prompt_tokens = None;
    }

    /// Mark `completion_tokens` absent
    pub fn clear_completion_tokens(&mut self) {
        self.completion_tokens = None;
    }

    /// Mark `total_tokens` absent
    pub fn clear_total_tokens(&mut self) {
        self.total_tokens = None;
    }

    /// Reset to the empty record, dropping unknown fields too
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Fields read from the wire that this schema does not define
    pub fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    /// Check `total_tokens == prompt_tokens + completion_tokens`.
    ///
    /// Returns `None` unless all three fields are present. A sum that
    /// overflows `i32` counts as inconsistent.
    pub fn is_consistent(&self) -> Option<bool> {
        let (prompt, completion, total) =
            (self.prompt_tokens?, self.completion_tokens?, self.total_tokens?);
        Some(prompt.checked_add(completion) == Some(total))
    }

    fn known_fields(&self) -> [(u32, Option<i32>); 3] {
        [
            (Self::PROMPT_TOKENS, self.prompt_tokens),
            (Self::COMPLETION_TOKENS, self.completion_tokens),
            (Self::TOTAL_TOKENS, self.total_tokens),
        ]
    }

    fn known_field_mut(&mut self, field_number: u32) -> Option<&mut Option<i32>> {
        match field_number {
            Self::PROMPT_TOKENS => Some(&mut self.prompt_tokens),
            Self::COMPLETION_TOKENS => Some(&mut self.completion_tokens),
            Self::TOTAL_TOKENS => Some(&mut self.total_tokens),
            _ => None,
        }
    }
}

impl Message for Usage {
    fn encoded_len(&self) -> usize {
        let known: usize = self
            .known_fields()
            .into_iter()
            .filter_map(|(field_number, value)| {
                let value = value?;
                Some(
                    Tag::new(field_number, WireType::Varint).encoded_len()
                        + varint_len(int32_to_wire(value)),
                )
            })
            .sum();
        known + self.unknown.len()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        for (field_number, value) in self.known_fields() {
            if let Some(value) = value {
                Tag::new(field_number, WireType::Varint).encode(buf);
                write_varint(buf, int32_to_wire(value));
            }
        }
        self.unknown.write_to(buf);
    }

    fn decode_fields(input: &[u8], config: &DecodeConfig) -> Result<Self> {
        let mut usage = Self::default();
        let mut cursor = input;

        while !cursor.is_empty() {
            let field_start = cursor;
            let tag = Tag::decode(&mut cursor)?;

            if let Some(slot) = usage.known_field_mut(tag.field_number) {
                if tag.wire_type == WireType::Varint {
                    // Repeated occurrences overwrite: last one wins.
                    *slot = Some(int32_from_wire(read_varint(&mut cursor)?));
                    continue;
                }
                if config.strict_wire_types {
                    return Err(ProtocolError::InvalidWireType(tag.wire_type.code()));
                }
            }

            skip_payload(tag.wire_type, &mut cursor)?;
            let field_len = field_start.len() - cursor.len();
            tracing::trace!(
                field_number = tag.field_number,
                wire_type = ?tag.wire_type,
                len = field_len,
                "retaining unknown field"
            );
            usage.unknown.push_field(&field_start[..field_len]);
        }

        Ok(usage)
    }
}

impl fmt::Display for Usage {
    /// Text-format rendering of the present fields, e.g.
    /// `prompt_tokens:3 total_tokens:7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["prompt_tokens", "completion_tokens", "total_tokens"];
        let mut first = true;
        for (name, (_, value)) in names.into_iter().zip(self.known_fields()) {
            if let Some(value) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{name}:{value}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Builder for [`Usage`].
///
/// Fields that are never set stay absent.
#[derive(Debug, Clone, Default)]
pub struct UsageBuilder {
    usage: Usage,
}

impl UsageBuilder {
    /// Set `prompt_tokens`
    pub fn prompt_tokens(mut self, value: i32) -> Self {
        self.usage.prompt_tokens = Some(value);
        self
    }

    /// Set `completion_tokens`
    pub fn completion_tokens(mut self, value: i32) -> Self {
        self.usage.completion_tokens = Some(value);
        self
    }

    /// Set `total_tokens`
    pub fn total_tokens(mut self, value: i32) -> Self {
        self.usage.total_tokens = Some(value);
        self
    }

    /// Finish building
    pub fn build(self) -> Usage {
        self.usage
    }
}
