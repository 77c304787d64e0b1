//! Decoded ASN.1 values, before any schema is applied.
//!
//! Every BER value decodes into an [`Asn1Object`]. Universal primitives are
//! decoded with the `der` crate's typed values; anything not anticipated,
//! or whose content fails typed decoding, becomes [`Asn1Object::Unknown`]
//! holding the raw bytes. Decoding only fails on broken framing.
//!
//! Values carrying an application, context-specific or private tag become a
//! [`TaggedObject`]. Without a schema it is not known whether such a tag is
//! explicit or implicit, see [`TaggedObject`] for how it is guessed.

mod tagged;
mod value;

pub use self::{
    tagged::{Class, TaggedObject},
    value::{bits, int_to_i128},
};
use {
    crate::{
        ber::{BerCodec, Identifier, TagClass, Tlv},
        error::{Error, Result},
    },
    der::{
        asn1::{
            BitString, GeneralizedTime, Ia5StringRef, Int, ObjectIdentifier as Oid, OctetString,
            PrintableStringRef, TeletexStringRef, UtcTime, Utf8StringRef,
        },
        AnyRef, Tag,
    },
    std::fmt::{self, Display, Formatter},
};

/// The kind of an [`Asn1Object`], without its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Asn1Kind {
    Sequence,
    Set,
    Tagged,
    Integer,
    Boolean,
    Null,
    ObjectIdentifier,
    BitString,
    OctetString,
    Utf8String,
    PrintableString,
    Ia5String,
    TeletexString,
    VisibleString,
    NumericString,
    BmpString,
    Enumerated,
    UtcTime,
    GeneralizedTime,
    Unknown,
}

/// A decoded primitive.
///
/// Constructed variants own their elements in encoding order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asn1Object {
    Sequence(Vec<Asn1Object>),
    Set(Vec<Asn1Object>),
    Tagged(TaggedObject),
    Integer(Int),
    Boolean(bool),
    Null,
    ObjectIdentifier(Oid),
    BitString(BitString),
    OctetString(OctetString),
    Utf8String(String),
    PrintableString(String),
    Ia5String(String),
    TeletexString(String),
    VisibleString(String),
    NumericString(String),
    BmpString(String),
    Enumerated(Int),
    UtcTime(UtcTime),
    GeneralizedTime(GeneralizedTime),
    Unknown(RawValue),
}

/// Identifier and content of a value that has no typed representation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawValue {
    pub identifier: Identifier,
    pub content:    Vec<u8>,
}

impl Asn1Kind {
    /// X.680 universal tag number.
    pub const fn universal_number(self) -> Option<u32> {
        Some(match self {
            Self::Boolean => 1,
            Self::Integer => 2,
            Self::BitString => 3,
            Self::OctetString => 4,
            Self::Null => 5,
            Self::ObjectIdentifier => 6,
            Self::Enumerated => 10,
            Self::Utf8String => 12,
            Self::Sequence => 16,
            Self::Set => 17,
            Self::NumericString => 18,
            Self::PrintableString => 19,
            Self::TeletexString => 20,
            Self::Ia5String => 22,
            Self::UtcTime => 23,
            Self::GeneralizedTime => 24,
            Self::VisibleString => 26,
            Self::BmpString => 30,
            Self::Tagged | Self::Unknown => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "SEQUENCE",
            Self::Set => "SET",
            Self::Tagged => "TAGGED",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::BitString => "BIT STRING",
            Self::OctetString => "OCTET STRING",
            Self::Utf8String => "UTF8String",
            Self::PrintableString => "PrintableString",
            Self::Ia5String => "IA5String",
            Self::TeletexString => "TeletexString",
            Self::VisibleString => "VisibleString",
            Self::NumericString => "NumericString",
            Self::BmpString => "BMPString",
            Self::Enumerated => "ENUMERATED",
            Self::UtcTime => "UTCTime",
            Self::GeneralizedTime => "GeneralizedTime",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for Asn1Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Asn1Object {
    /// Decodes the first value in `input`.
    pub fn decode(codec: &BerCodec, input: &[u8]) -> Result<Self> {
        let decoded = codec
            .read_first(input)
            .and_then(|tlv| Self::from_tlv(codec, tlv, 0));
        decoded.map_err(|err| Error::Decode(format!("{err:#}")))
    }

    pub(crate) fn from_tlv(codec: &BerCodec, tlv: Tlv<'_>, depth: usize) -> anyhow::Result<Self> {
        let Tlv {
            identifier,
            content,
        } = tlv;
        if identifier.class != TagClass::Universal {
            return Ok(Self::Tagged(TaggedObject::from_tlv(codec, tlv, depth)?));
        }
        if identifier.constructed {
            return Ok(match identifier.number {
                16 => Self::Sequence(Self::elements(codec, content, depth)?),
                17 => Self::Set(Self::elements(codec, content, depth)?),
                4 => Self::constructed_octets(codec, content, depth)?,
                _ => Self::Unknown(RawValue::new(identifier, content)),
            });
        }
        Ok(Self::primitive(identifier.number, content)
            .unwrap_or_else(|| Self::Unknown(RawValue::new(identifier, content))))
    }

    pub(crate) fn elements(
        codec: &BerCodec,
        content: &[u8],
        depth: usize,
    ) -> anyhow::Result<Vec<Self>> {
        codec
            .read_elements(content, depth + 1)?
            .into_iter()
            .map(|tlv| Self::from_tlv(codec, tlv, depth + 1))
            .collect()
    }

    /// BER allows octet strings to be split into segments (X.690 8.7.3).
    fn constructed_octets(codec: &BerCodec, content: &[u8], depth: usize) -> anyhow::Result<Self> {
        let mut octets = Vec::with_capacity(content.len());
        for segment in Self::elements(codec, content, depth)? {
            match segment {
                Self::OctetString(segment) => octets.extend_from_slice(segment.as_bytes()),
                _ => anyhow::bail!("Constructed OCTET STRING with non-OCTET STRING segment"),
            }
        }
        Ok(Self::OctetString(OctetString::new(octets)?))
    }

    /// Typed decoding of the content of a universal primitive.
    ///
    /// Returns `None` for tag numbers without a typed representation and for
    /// content the typed decoder rejects.
    pub fn primitive(number: u32, content: &[u8]) -> Option<Self> {
        let any = |tag: Tag| AnyRef::new(tag, content).ok();
        Some(match number {
            1 => match content {
                [byte] => Self::Boolean(*byte != 0),
                _ => return None,
            },
            2 => Self::Integer(any(Tag::Integer)?.decode_as().ok()?),
            3 => Self::BitString(any(Tag::BitString)?.decode_as().ok()?),
            4 => Self::OctetString(OctetString::new(content).ok()?),
            5 => content.is_empty().then_some(Self::Null)?,
            6 => Self::ObjectIdentifier(any(Tag::ObjectIdentifier)?.decode_as().ok()?),
            // Same content rules as INTEGER.
            10 => Self::Enumerated(any(Tag::Integer)?.decode_as().ok()?),
            12 => Self::Utf8String(
                any(Tag::Utf8String)?
                    .decode_as::<Utf8StringRef<'_>>()
                    .ok()?
                    .to_string(),
            ),
            18 => Self::NumericString(restricted(content, |b| b.is_ascii_digit() || b == b' ')?),
            19 => Self::PrintableString(
                any(Tag::PrintableString)?
                    .decode_as::<PrintableStringRef<'_>>()
                    .ok()?
                    .to_string(),
            ),
            20 => Self::TeletexString(
                any(Tag::TeletexString)?
                    .decode_as::<TeletexStringRef<'_>>()
                    .ok()?
                    .to_string(),
            ),
            22 => Self::Ia5String(
                any(Tag::Ia5String)?
                    .decode_as::<Ia5StringRef<'_>>()
                    .ok()?
                    .to_string(),
            ),
            23 => Self::UtcTime(any(Tag::UtcTime)?.decode_as().ok()?),
            24 => Self::GeneralizedTime(any(Tag::GeneralizedTime)?.decode_as().ok()?),
            26 => Self::VisibleString(restricted(content, |b| (0x20..=0x7e).contains(&b))?),
            30 => Self::BmpString(bmp_string(content)?),
            _ => return None,
        })
    }

    pub const fn kind(&self) -> Asn1Kind {
        match self {
            Self::Sequence(_) => Asn1Kind::Sequence,
            Self::Set(_) => Asn1Kind::Set,
            Self::Tagged(_) => Asn1Kind::Tagged,
            Self::Integer(_) => Asn1Kind::Integer,
            Self::Boolean(_) => Asn1Kind::Boolean,
            Self::Null => Asn1Kind::Null,
            Self::ObjectIdentifier(_) => Asn1Kind::ObjectIdentifier,
            Self::BitString(_) => Asn1Kind::BitString,
            Self::OctetString(_) => Asn1Kind::OctetString,
            Self::Utf8String(_) => Asn1Kind::Utf8String,
            Self::PrintableString(_) => Asn1Kind::PrintableString,
            Self::Ia5String(_) => Asn1Kind::Ia5String,
            Self::TeletexString(_) => Asn1Kind::TeletexString,
            Self::VisibleString(_) => Asn1Kind::VisibleString,
            Self::NumericString(_) => Asn1Kind::NumericString,
            Self::BmpString(_) => Asn1Kind::BmpString,
            Self::Enumerated(_) => Asn1Kind::Enumerated,
            Self::UtcTime(_) => Asn1Kind::UtcTime,
            Self::GeneralizedTime(_) => Asn1Kind::GeneralizedTime,
            Self::Unknown(_) => Asn1Kind::Unknown,
        }
    }

    /// Looks through any chain of tags.
    pub fn untagged(&self) -> &Self {
        match self {
            Self::Tagged(tagged) => tagged.innermost(),
            other => other,
        }
    }

    /// Value of an INTEGER or ENUMERATED that fits in 128 bits.
    pub fn integer(&self) -> Option<i128> {
        match self {
            Self::Integer(int) | Self::Enumerated(int) => int_to_i128(int.as_bytes()),
            _ => None,
        }
    }

    pub const fn boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn oid(&self) -> Option<&Oid> {
        match self {
            Self::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }
}

impl RawValue {
    fn new(identifier: Identifier, content: &[u8]) -> Self {
        Self {
            identifier,
            content: content.to_vec(),
        }
    }
}

fn restricted(content: &[u8], allowed: impl Fn(u8) -> bool) -> Option<String> {
    if !content.iter().all(|&b| allowed(b)) {
        return None;
    }
    String::from_utf8(content.to_vec()).ok()
}

/// UCS-2 big endian, surrogate pairs accepted.
fn bmp_string(content: &[u8]) -> Option<String> {
    if content.len() % 2 != 0 {
        return None;
    }
    let units = content
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}
