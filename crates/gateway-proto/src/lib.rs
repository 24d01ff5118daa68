//! Wire codec for the types the client and the language-model gateway share.
//!
//! Two schema types live here: [`Usage`], a record of optional token counts,
//! and [`Priority`], an open enum. Both use the standard tag-based binary
//! wire format: every field is a varint tag `(field_number << 3) | wire_type`
//! followed by a payload whose length the wire type determines.
//!
//! The codec is a pure function of its input. [`Message::encode`] never
//! fails; [`Message::decode`] either returns a whole record or a
//! [`ProtocolError`].
//!
//! # Compatibility
//!
//! Fields this version does not know are kept byte-for-byte in
//! [`UnknownFields`] and written back on encode, and unknown `Priority`
//! codes are carried as raw integers. Neither is an error. A peer built
//! against a newer schema can therefore talk through an older one without
//! losing data.
//!
//! # Example
//!
//! ```
//! use gateway_proto::{Message, Usage};
//!
//! let usage = Usage::builder().prompt_tokens(12).completion_tokens(30).total_tokens(42).build();
//! let bytes = usage.encode_to_vec();
//! assert_eq!(Usage::decode(&bytes)?, usage);
//! # Ok::<(), gateway_proto::ProtocolError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod message;
pub mod priority;
pub mod unknown;
pub mod usage;
pub mod varint;
pub mod wire;

pub use config::DecodeConfig;
pub use errors::{ProtocolError, Result};
pub use message::Message;
pub use priority::{Priority, UnknownPrioritySymbol};
pub use unknown::UnknownFields;
pub use usage::{Usage, UsageBuilder};
pub use wire::{Tag, WireType};
