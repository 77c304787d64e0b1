//! Extensions restricting what a key may be used for.
use {
    super::schema::{CollectionOf, Explain, Field, NamedBits, Sequence, Shape},
    crate::{asn1::Asn1Kind, oid::known},
};

static KEY_USAGE: NamedBits = NamedBits::new(
    "keyUsage",
    &[
        "digitalSignature",
        "nonRepudiation",
        "keyEncipherment",
        "dataEncipherment",
        "keyAgreement",
        "keyCertSign",
        "cRLSign",
        "encipherOnly",
        "decipherOnly",
    ],
);

schema_corrector!(
    /// `KeyUsage ::= BIT STRING`, one BOOLEAN child per usage.
    KeyUsageCorrector,
    Some(known::ID_CE_KEY_USAGE),
    KEY_USAGE
);

static EXTENDED_KEY_USAGE: CollectionOf = CollectionOf::sequence_of(
    "extKeyUsage",
    Field::new("keyPurposeId", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
);

schema_corrector!(
    ExtendedKeyUsageCorrector,
    Some(known::ID_CE_EXT_KEY_USAGE),
    EXTENDED_KEY_USAGE
);

static NETSCAPE_CERT_TYPE: NamedBits = NamedBits::new(
    "netscapeCertType",
    &[
        "sslClient",
        "sslServer",
        "smime",
        "objectSigning",
        "reserved",
        "sslCA",
        "smimeCA",
        "objectSigningCA",
    ],
);

schema_corrector!(
    NetscapeCertTypeCorrector,
    Some(known::NETSCAPE_CERT_TYPE),
    NETSCAPE_CERT_TYPE
);

static BASIC_CONSTRAINTS: Sequence = Sequence::new(
    "basicConstraints",
    &[
        Field::new("cA", Shape::Kind(Asn1Kind::Boolean))
            .explain(Explain::DefaultBool(false, "default")),
        Field::new("pathLenConstraint", Shape::Kind(Asn1Kind::Integer)),
    ],
);

schema_corrector!(
    BasicConstraintsCorrector,
    Some(known::ID_CE_BASIC_CONSTRAINTS),
    BASIC_CONSTRAINTS
);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{correct::Corrector, node::Asn1Node},
        anyhow::{anyhow, Result},
        hex_literal::hex,
    };

    fn decode(input: &[u8]) -> Result<Asn1Node> {
        Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("decoding failed"))
    }

    fn labels(node: &Asn1Node) -> Vec<String> {
        node.children().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_key_usage() -> Result<()> {
        // digitalSignature and decipherOnly, nine bits.
        let mut node = decode(&hex!("0303 07 8080"))?;
        KeyUsageCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("keyUsage"));
        let labels = labels(&node);
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "digitalSignature: TRUE");
        assert_eq!(labels[7], "encipherOnly: FALSE");
        assert_eq!(labels[8], "decipherOnly: TRUE");

        // Applying it again replaces the children instead of adding to them.
        KeyUsageCorrector.correct(&mut node);
        assert_eq!(node.children().len(), 9);
        Ok(())
    }

    #[test]
    fn test_key_usage_not_bits() -> Result<()> {
        let mut node = decode(&hex!("0403 078080"))?;
        KeyUsageCorrector.correct(&mut node);
        assert_eq!(node.field_name(), None);
        assert!(node.children().is_empty());
        Ok(())
    }

    #[test]
    fn test_extended_key_usage() -> Result<()> {
        let mut node = decode(&hex!("3014 06082b06010505070303 06082b06010505070308"))?;
        ExtendedKeyUsageCorrector.correct(&mut node);
        assert_eq!(
            labels(&node),
            [
                "keyPurposeId: 1.3.6.1.5.5.7.3.3 (codeSigning)",
                "keyPurposeId: 1.3.6.1.5.5.7.3.8 (timeStamping)"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_netscape_cert_type() -> Result<()> {
        // sslClient and smime
        let mut node = decode(&hex!("0302 05a0"))?;
        NetscapeCertTypeCorrector.correct(&mut node);
        assert_eq!(
            labels(&node),
            ["sslClient: TRUE", "sslServer: FALSE", "smime: TRUE"]
        );
        Ok(())
    }

    #[test]
    fn test_basic_constraints() -> Result<()> {
        let mut node = decode(&hex!("3000"))?;
        BasicConstraintsCorrector.correct(&mut node);
        assert_eq!(node.to_string(), "basicConstraints");
        assert!(node.children().is_empty());

        let mut node = decode(&hex!("3003 010100"))?;
        BasicConstraintsCorrector.correct(&mut node);
        assert_eq!(labels(&node), ["cA: FALSE (default)"]);

        // Path length without the cA flag.
        let mut node = decode(&hex!("3003 020103"))?;
        BasicConstraintsCorrector.correct(&mut node);
        assert_eq!(labels(&node), ["pathLenConstraint: 3"]);
        Ok(())
    }
}
