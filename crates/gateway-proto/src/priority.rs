//! Request priority.
//!
//! An open enum: any `int32` is a valid `Priority`. The four named codes
//! below are the ones this schema version knows about; anything else is
//! carried through decode/encode untouched so newer peers can add symbols
//! without breaking older ones.
//!
//! | symbol  | code |
//! |---------|------|
//! | DEFAULT | 0    |
//! | HIGH    | 1    |
//! | MEDIUM  | 2    |
//! | LOW     | 3    |

use std::{fmt, str::FromStr};

use bytes::{Buf, BufMut};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::{
    errors::Result,
    varint::{int32_from_wire, int32_to_wire, read_varint, varint_len, write_varint},
};

/// Symbol table, fixed when the schema was written
static SYMBOLS: [(&str, Priority); 4] = [
    ("DEFAULT", Priority::DEFAULT),
    ("HIGH", Priority::HIGH),
    ("MEDIUM", Priority::MEDIUM),
    ("LOW", Priority::LOW),
];

/// Scheduling priority of a request.
///
/// Integer-backed so unrecognised codes survive a round trip.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Priority(i32);

impl Priority {
    /// Gateway default scheduling
    pub const DEFAULT: Self = Self(0);
    /// Scheduled ahead of everything else
    pub const HIGH: Self = Self(1);
    /// Between high and low
    pub const MEDIUM: Self = Self(2);
    /// Scheduled last
    pub const LOW: Self = Self(3);

    /// Wrap a raw code, known or not
    pub const fn from_code(code: i32) -> Self {
        Self(code)
    }

    /// Raw code
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Symbol name, or `None` if this schema version has no name for the code
    pub fn name(self) -> Option<&'static str> {
        SYMBOLS.iter().find(|(_, priority)| *priority == self).map(|(name, _)| *name)
    }

    /// Look up a symbol by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        SYMBOLS.iter().find(|(symbol, _)| *symbol == name).map(|(_, priority)| *priority)
    }

    /// Whether the code has a symbol in this schema version
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }

    /// All named values, in code order
    pub fn known() -> impl Iterator<Item = Self> {
        SYMBOLS.iter().map(|(_, priority)| *priority)
    }

    /// Write the code as an `int32` varint, the form used inside a parent
    /// message field.
    pub fn encode<B: BufMut>(self, buf: &mut B) {
        write_varint(buf, int32_to_wire(self.0));
    }

    /// Encoded size of [`Priority::encode`]
    pub const fn encoded_len(self) -> usize {
        varint_len(int32_to_wire(self.0))
    }

    /// Read an `int32` varint as a priority.
    ///
    /// Never fails on an unrecognised code, only on malformed varints.
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        read_varint(buf).map(|raw| Self(int32_from_wire(raw)))
    }
}

impl From<i32> for Priority {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Priority({})", self.0),
        }
    }
}

/// Symbol name not defined for [`Priority`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority symbol: {0:?}")]
pub struct UnknownPrioritySymbol(pub String);

impl FromStr for Priority {
    type Err = UnknownPrioritySymbol;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPrioritySymbol(s.to_owned()))
    }
}

/// Known codes serialize as their symbol, unknown codes as the bare integer.
impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i32(self.0),
        }
    }
}

/// Accepts either a symbol name or an integer code.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(PriorityVisitor)
    }
}

struct PriorityVisitor;

impl de::Visitor<'_> for PriorityVisitor {
    type Value = Priority;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a priority symbol or int32 code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Priority, E> {
        Priority::from_name(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Priority, E> {
        i32::try_from(v)
            .map(Priority)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Priority, E> {
        i32::try_from(v)
            .map(Priority)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }
}
