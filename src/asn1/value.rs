//! Human readable rendering of primitive values.
use {
    super::Asn1Object,
    der::asn1::{BitString, Int},
};

/// Big endian two's complement to `i128`, `None` when it does not fit.
pub fn int_to_i128(bytes: &[u8]) -> Option<i128> {
    if bytes.len() > 16 {
        return None;
    }
    let fill = match bytes.first() {
        Some(byte) if byte & 0x80 != 0 => 0xff,
        _ => 0x00,
    };
    let mut buffer = [fill; 16];
    buffer[16 - bytes.len()..].copy_from_slice(bytes);
    Some(i128::from_be_bytes(buffer))
}

/// The bits actually present in the encoding, most significant first.
pub fn bits(bit_string: &BitString) -> Vec<bool> {
    let raw = bit_string.raw_bytes();
    (0..bit_string.bit_len())
        .map(|index| raw[index / 8] & (0x80 >> (index % 8)) != 0)
        .collect()
}

fn int_string(int: &Int) -> String {
    int_to_i128(int.as_bytes()).map_or_else(
        || format!("0x{}", hex::encode(int.as_bytes())),
        |value| value.to_string(),
    )
}

impl Asn1Object {
    /// The value part of a display string. `None` for NULL and constructed
    /// values; tagged values render their innermost base.
    pub fn value_string(&self) -> Option<String> {
        Some(match self {
            Self::Sequence(_) | Self::Set(_) | Self::Null => return None,
            Self::Tagged(tagged) => return tagged.innermost().value_string(),
            Self::Integer(int) | Self::Enumerated(int) => int_string(int),
            Self::Boolean(true) => "TRUE".to_owned(),
            Self::Boolean(false) => "FALSE".to_owned(),
            Self::ObjectIdentifier(oid) => oid.to_string(),
            Self::BitString(bit_string) => bits(bit_string)
                .into_iter()
                .map(|bit| if bit { '1' } else { '0' })
                .collect(),
            Self::OctetString(octets) => hex::encode(octets.as_bytes()),
            Self::Utf8String(text)
            | Self::PrintableString(text)
            | Self::Ia5String(text)
            | Self::TeletexString(text)
            | Self::VisibleString(text)
            | Self::NumericString(text)
            | Self::BmpString(text) => text.clone(),
            Self::UtcTime(time) => time.to_date_time().to_string(),
            Self::GeneralizedTime(time) => time.to_date_time().to_string(),
            Self::Unknown(raw) => hex::encode(&raw.content),
        })
    }
}
