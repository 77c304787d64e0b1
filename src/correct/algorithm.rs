//! Algorithm identifiers and their parameters.
use {
    super::{
        apply_as,
        schema::{Explain, Field, Sequence, Shape},
        Corrector,
    },
    crate::{asn1::Asn1Kind, node::Asn1Node, oid::known},
    der::asn1::ObjectIdentifier as Oid,
};

// RFC 5280 4.1.1.2
static ALGORITHM_IDENTIFIER: Sequence = Sequence::new(
    "AlgorithmIdentifier",
    &[
        Field::new("algorithm", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("parameters", Shape::Any),
    ],
);

/// `AlgorithmIdentifier`, with the parameters annotated by the corrector
/// registered for the algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlgorithmIdentifierCorrector;

impl Corrector for AlgorithmIdentifierCorrector {
    fn default_field_name(&self) -> &'static str {
        "AlgorithmIdentifier"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if !ALGORITHM_IDENTIFIER.correct_fields(node, field_name) {
            return;
        }
        let algorithm = node
            .children()
            .first()
            .and_then(|child| child.object().oid())
            .copied();
        if let (Some(algorithm), Some(parameters)) = (algorithm, node.children_mut().get_mut(1)) {
            apply_as(&algorithm, parameters, "parameters");
        }
    }
}

// RFC 4055 3.1, the module uses explicit tags.
static RSASSA_PSS_PARAMS: Sequence = Sequence::new(
    "RSASSA-PSS-params",
    &[
        Field::new(
            "hashAlgorithm",
            Shape::Explicit(0, &Shape::Kind(Asn1Kind::Sequence)),
        )
        .with(&AlgorithmIdentifierCorrector),
        Field::new(
            "maskGenAlgorithm",
            Shape::Explicit(1, &Shape::Kind(Asn1Kind::Sequence)),
        )
        .with(&AlgorithmIdentifierCorrector),
        Field::new(
            "saltLength",
            Shape::Explicit(2, &Shape::Kind(Asn1Kind::Integer)),
        )
        .explain(Explain::DefaultInt(20, "default")),
        Field::new(
            "trailerField",
            Shape::Explicit(3, &Shape::Kind(Asn1Kind::Integer)),
        )
        .explain(Explain::DefaultInt(1, "trailerFieldBC")),
    ],
);

schema_corrector!(
    /// `RSASSA-PSS-params`
    RsassaPssCorrector,
    Some(known::ID_RSASSA_PSS),
    RSASSA_PSS_PARAMS
);

/// Parameters of `id-mgf1`, the `AlgorithmIdentifier` of the hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mgf1Corrector;

impl Corrector for Mgf1Corrector {
    fn oid(&self) -> Option<Oid> {
        Some(known::ID_MGF1)
    }

    fn default_field_name(&self) -> &'static str {
        "hashAlgorithm"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        AlgorithmIdentifierCorrector.correct_as(node, field_name);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        anyhow::{anyhow, Result},
        hex_literal::hex,
    };

    // RSASSA-PSS with SHA-256, MGF1 with SHA-256, salt 32, trailer 1.
    const PSS_PARAMS: [u8; 59] = hex!(
        "3039"
        "a00f 300d 0609608648016503040201 0500"
        "a11c 301a 06092a864886f70d010108 300d 0609608648016503040201 0500"
        "a203 020120"
        "a303 020101"
    );

    fn decode(input: &[u8]) -> Result<Asn1Node> {
        Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("decoding failed"))
    }

    #[test]
    fn test_rsassa_pss() -> Result<()> {
        let mut node = decode(&PSS_PARAMS)?;
        RsassaPssCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("RSASSA-PSS-params"));
        let names = node
            .children()
            .iter()
            .map(Asn1Node::field_name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                Some("hashAlgorithm"),
                Some("maskGenAlgorithm"),
                Some("saltLength"),
                Some("trailerField")
            ]
        );
        assert_eq!(node.children()[2].to_string(), "saltLength: 32");
        assert_eq!(
            node.children()[3].to_string(),
            "trailerField: 1 (trailerFieldBC)"
        );

        let hash = &node.children()[0];
        assert_eq!(hash.type_string(), "[0] EXPLICIT SEQUENCE");
        assert_eq!(
            hash.children()[0].to_string(),
            "algorithm: 2.16.840.1.101.3.4.2.1 (sha256)"
        );

        // The MGF1 parameters are annotated through the registry.
        let mask = &node.children()[1];
        assert_eq!(mask.children()[0].explanation(), Some("id-mgf1"));
        let mgf_hash = &mask.children()[1];
        assert_eq!(mgf_hash.field_name(), Some("parameters"));
        assert_eq!(mgf_hash.children()[0].explanation(), Some("sha256"));
        Ok(())
    }

    #[test]
    fn test_rsassa_pss_defaults() -> Result<()> {
        // All fields at their defaults are left out.
        let mut node = decode(&hex!("3000"))?;
        RsassaPssCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("RSASSA-PSS-params"));
        assert!(node.children().is_empty());

        // Salt length given, equal to its default.
        let mut node = decode(&hex!("3005 a203020114"))?;
        RsassaPssCorrector.correct(&mut node);
        assert_eq!(node.children()[0].to_string(), "saltLength: 20 (default)");
        Ok(())
    }

    #[test]
    fn test_rsassa_pss_wrong_root() -> Result<()> {
        let mut node = decode(&hex!("0500"))?;
        RsassaPssCorrector.correct(&mut node);
        assert_eq!(node.field_name(), None);
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let mut once = decode(&PSS_PARAMS)?;
        RsassaPssCorrector.correct(&mut once);
        let mut twice = once.clone();
        RsassaPssCorrector.correct(&mut twice);
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_algorithm_identifier() -> Result<()> {
        // sha256WithRSAEncryption, NULL
        let mut node = decode(&hex!("300d 06092a864886f70d01010b 0500"))?;
        AlgorithmIdentifierCorrector.correct_as(&mut node, "signatureAlgorithm");
        assert_eq!(node.field_name(), Some("signatureAlgorithm"));
        assert_eq!(
            node.children()[0].explanation(),
            Some("sha256WithRSAEncryption")
        );
        assert_eq!(node.children()[1].to_string(), "parameters");

        // id-RSASSA-PSS dispatches its parameters.
        let mut input = hex!("300b 06092a864886f70d01010a").to_vec();
        input[1] += PSS_PARAMS.len() as u8;
        input.extend_from_slice(&PSS_PARAMS);
        let mut node = decode(&input)?;
        AlgorithmIdentifierCorrector.correct(&mut node);
        let parameters = &node.children()[1];
        assert_eq!(parameters.field_name(), Some("parameters"));
        assert_eq!(parameters.children()[3].explanation(), Some("trailerFieldBC"));
        Ok(())
    }
}
