//! Tag-length-value framing of BER, CER and DER input.
//!
//! Only the framing lives here: identifier octets, length octets and the
//! boundaries of each value. Interpreting the contents is left to
//! [`crate::asn1`], which hands universal primitives to the `der` crate.

mod codec;

pub use self::codec::{BerCodec, Leniency, Tlv};
use std::fmt::{self, Display, Formatter};

/// The two class bits of an identifier octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

/// Decoded identifier octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Identifier {
    pub class:       TagClass,
    pub constructed: bool,
    pub number:      u32,
}

/// Decoded length octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Length {
    Definite(usize),

    /// Terminated by an end-of-contents marker, constructed values only.
    Indefinite,
}

impl TagClass {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }
}

impl Identifier {
    /// End-of-contents marker (`00 00`).
    pub const fn is_end_of_contents(&self) -> bool {
        matches!(self.class, TagClass::Universal) && !self.constructed && self.number == 0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            TagClass::Universal => "UNIVERSAL",
            TagClass::Application => "APPLICATION",
            TagClass::ContextSpecific => "CONTEXT",
            TagClass::Private => "PRIVATE",
        };
        write!(f, "[{class} {}]", self.number)
    }
}
