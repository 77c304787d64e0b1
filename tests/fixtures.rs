//! DER snippets as they appear in PDF signatures.
#![allow(dead_code)]

use {
    anyhow::{anyhow, Result},
    asn1_lens::node::Asn1Node,
    hex_literal::hex,
};

/// `RSASSA-PSS-params` for SHA-256 with MGF1-SHA-256, salt 32, trailer 1.
pub const RSASSA_PSS_PARAMS: [u8; 59] = hex!(
    "3039"
    "a00f 300d 0609608648016503040201 0500"
    "a11c 301a 06092a864886f70d010108 300d 0609608648016503040201 0500"
    "a203 020120"
    "a303 020101"
);

/// Signed attribute `adbe-revocationInfoArchival` holding one OCSP response
/// with status `tryLater`.
pub const REVOCATION_ATTRIBUTE: [u8; 26] = hex!(
    "3018"
    "06092a864886f72f010108"
    "310b 3009 a107 3005 3003 0a0103"
);

pub fn decode(input: &[u8]) -> Result<Asn1Node> {
    Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("No ASN.1 value in input"))
}

/// `Display` strings of the children of `node`.
pub fn labels(node: &Asn1Node) -> Vec<String> {
    node.children().iter().map(ToString::to_string).collect()
}
