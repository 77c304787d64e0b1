//! `CRLDistributionPoints` and `FreshestCRL`, RFC 5280 4.2.1.13 and 4.2.1.15.
use {
    super::{
        certificate::RELATIVE_DISTINGUISHED_NAME,
        general_name::GENERAL_NAMES,
        schema::{Choice, CollectionOf, Field, NamedBits, Sequence, Shape},
    },
    crate::{asn1::Asn1Kind, oid::known},
};

static CRL_REASONS: NamedBits = NamedBits::new(
    "ReasonFlags",
    &[
        "unused",
        "keyCompromise",
        "cACompromise",
        "affiliationChanged",
        "superseded",
        "cessationOfOperation",
        "certificateHold",
        "privilegeWithdrawn",
        "aACompromise",
    ],
);

schema_corrector!(
    /// `ReasonFlags`, one BOOLEAN child per reason present in the encoding.
    CrlReasonsCorrector,
    None,
    CRL_REASONS
);

// The CHOICE sits below the explicit [0] of `distributionPoint`.
static DISTRIBUTION_POINT_NAME: Choice = Choice::new(
    "DistributionPointName",
    &[
        Field::new("fullName", Shape::Implicit(0, Asn1Kind::Sequence)).with(&GENERAL_NAMES),
        Field::new("nameRelativeToCRLIssuer", Shape::Implicit(1, Asn1Kind::Set))
            .with(&RELATIVE_DISTINGUISHED_NAME),
    ],
)
.below(1);

static DISTRIBUTION_POINT: Sequence = Sequence::new(
    "DistributionPoint",
    &[
        Field::new("distributionPoint", Shape::Explicit(0, &Shape::Any))
            .with(&DISTRIBUTION_POINT_NAME),
        Field::new("reasons", Shape::Implicit(1, Asn1Kind::BitString)).with(&CRL_REASONS),
        Field::new("cRLIssuer", Shape::Implicit(2, Asn1Kind::Sequence)).with(&GENERAL_NAMES),
    ],
);

static CRL_DISTRIBUTION_POINTS: CollectionOf = CollectionOf::sequence_of(
    "cRLDistributionPoints",
    Field::new("DistributionPoint", Shape::Kind(Asn1Kind::Sequence)).with(&DISTRIBUTION_POINT),
);

static FRESHEST_CRL: CollectionOf = CollectionOf::sequence_of(
    "freshestCRL",
    Field::new("DistributionPoint", Shape::Kind(Asn1Kind::Sequence)).with(&DISTRIBUTION_POINT),
);

schema_corrector!(
    CrlDistributionPointsCorrector,
    Some(known::ID_CE_CRL_DISTRIBUTION_POINTS),
    CRL_DISTRIBUTION_POINTS
);

schema_corrector!(
    FreshestCrlCorrector,
    Some(known::ID_CE_FRESHEST_CRL),
    FRESHEST_CRL
);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{correct::Corrector, node::Asn1Node},
        anyhow::{anyhow, Result},
        hex_literal::hex,
    };

    const DISTRIBUTION_POINTS: [u8; 48] = hex!(
        "302e"
        "3015 a00f a00d 860b 687474703a2f2f63726c2f 8102 0560"
        "3015 a00d a10b 3009 0603550403 0c024341 a204 a402 3000"
    );

    fn decode(input: &[u8]) -> Result<Asn1Node> {
        Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("decoding failed"))
    }

    fn labels(node: &Asn1Node) -> Vec<String> {
        node.children().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_reasons_single_bit() -> Result<()> {
        let mut node = decode(&hex!("0302 07 80"))?;
        CrlReasonsCorrector.correct(&mut node);
        assert_eq!(labels(&node), ["unused: TRUE"]);
        Ok(())
    }

    #[test]
    fn test_reasons_all_bits() -> Result<()> {
        let mut node = decode(&hex!("0303 07 aa80"))?;
        CrlReasonsCorrector.correct(&mut node);
        assert_eq!(
            labels(&node),
            [
                "unused: TRUE",
                "keyCompromise: FALSE",
                "cACompromise: TRUE",
                "affiliationChanged: FALSE",
                "superseded: TRUE",
                "cessationOfOperation: FALSE",
                "certificateHold: TRUE",
                "privilegeWithdrawn: FALSE",
                "aACompromise: TRUE"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_distribution_points() -> Result<()> {
        let mut node = decode(&DISTRIBUTION_POINTS)?;
        CrlDistributionPointsCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("cRLDistributionPoints"));

        let first = &node.children()[0];
        let name = &first.children()[0];
        assert_eq!(name.to_string(), "distributionPoint (fullName)");
        assert_eq!(name.type_string(), "[0] EXPLICIT [0] IMPLICIT SEQUENCE");
        assert_eq!(
            labels(name),
            ["uniformResourceIdentifier: http://crl/"]
        );
        let reasons = &first.children()[1];
        assert_eq!(reasons.type_string(), "[1] IMPLICIT BIT STRING");
        assert_eq!(
            labels(reasons),
            ["unused: FALSE", "keyCompromise: TRUE", "cACompromise: TRUE"]
        );

        let second = &node.children()[1];
        let relative = &second.children()[0];
        assert_eq!(relative.to_string(), "distributionPoint (nameRelativeToCRLIssuer)");
        assert_eq!(relative.type_string(), "[0] EXPLICIT [1] IMPLICIT SET");
        assert_eq!(
            relative.children()[0].children()[0].explanation(),
            Some("commonName")
        );
        let issuer = &second.children()[1];
        assert_eq!(issuer.field_name(), Some("cRLIssuer"));
        assert_eq!(issuer.type_string(), "[2] IMPLICIT SEQUENCE");
        assert_eq!(labels(issuer), ["directoryName"]);
        Ok(())
    }

    #[test]
    fn test_freshest_crl() -> Result<()> {
        let mut node = decode(&DISTRIBUTION_POINTS)?;
        FreshestCrlCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("freshestCRL"));
        assert_eq!(node.children()[1].field_name(), Some("DistributionPoint"));
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let mut once = decode(&DISTRIBUTION_POINTS)?;
        CrlDistributionPointsCorrector.correct(&mut once);
        let mut twice = once.clone();
        CrlDistributionPointsCorrector.correct(&mut twice);
        assert_eq!(once, twice);
        Ok(())
    }
}
