//! OCSP responses, RFC 6960 4.2.1. The module uses explicit tags.
use {
    super::{
        certificate::NameCorrector,
        revocation::CRL_REASON_CODES,
        schema::{correct_encapsulated, Choice, CollectionOf, Explain, Field, Sequence, Shape},
        AlgorithmIdentifierCorrector, CertificateCorrector, Corrector, ExtensionsCorrector,
    },
    crate::{asn1::Asn1Kind, node::Asn1Node, oid::known},
    der::asn1::ObjectIdentifier as Oid,
};

const RESPONSE_STATUS: &[(i128, &str)] = &[
    (0, "successful"),
    (1, "malformedRequest"),
    (2, "internalError"),
    (3, "tryLater"),
    (5, "sigRequired"),
    (6, "unauthorized"),
];

static RESPONSE_BYTES: Sequence = Sequence::new(
    "ResponseBytes",
    &[
        Field::new("responseType", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("response", Shape::Kind(Asn1Kind::OctetString)),
    ],
);

/// `ResponseBytes`, with the response decoded by its type.
struct ResponseBytesCorrector;

impl Corrector for ResponseBytesCorrector {
    fn default_field_name(&self) -> &'static str {
        "ResponseBytes"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if !RESPONSE_BYTES.correct_fields(node, field_name) {
            return;
        }
        let response_type = node
            .children()
            .first()
            .and_then(|child| child.object().oid())
            .copied();
        if let Some(response) = node.children_mut().get_mut(1) {
            correct_encapsulated(response, response_type.as_ref());
        }
    }
}

static OCSP_RESPONSE: Sequence = Sequence::new(
    "OCSPResponse",
    &[
        Field::new("responseStatus", Shape::Kind(Asn1Kind::Enumerated))
            .explain(Explain::Named(RESPONSE_STATUS)),
        Field::new("responseBytes", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&ResponseBytesCorrector),
    ],
);

schema_corrector!(
    /// `OCSPResponse` as found in revocation archives.
    OcspResponseCorrector,
    None,
    OCSP_RESPONSE
);

static CERT_ID: Sequence = Sequence::new(
    "CertID",
    &[
        Field::new("hashAlgorithm", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("issuerNameHash", Shape::Kind(Asn1Kind::OctetString)),
        Field::new("issuerKeyHash", Shape::Kind(Asn1Kind::OctetString)),
        Field::new("serialNumber", Shape::Kind(Asn1Kind::Integer)),
    ],
);

static REVOKED_INFO: Sequence = Sequence::new(
    "RevokedInfo",
    &[
        Field::new("revocationTime", Shape::Kind(Asn1Kind::GeneralizedTime)),
        Field::new(
            "revocationReason",
            Shape::Explicit(0, &Shape::Kind(Asn1Kind::Enumerated)),
        )
        .explain(Explain::Named(CRL_REASON_CODES)),
    ],
);

// CertStatus is the one CHOICE of the module with implicit tags.
static CERT_STATUS: Choice = Choice::new(
    "CertStatus",
    &[
        Field::new("good", Shape::Implicit(0, Asn1Kind::Null)),
        Field::new("revoked", Shape::Implicit(1, Asn1Kind::Sequence)).with(&REVOKED_INFO),
        Field::new("unknown", Shape::Implicit(2, Asn1Kind::Null)),
    ],
);

static SINGLE_RESPONSE: Sequence = Sequence::new(
    "SingleResponse",
    &[
        Field::new("certID", Shape::Kind(Asn1Kind::Sequence)).with(&CERT_ID),
        Field::new("certStatus", Shape::Choice(&CERT_STATUS)).with(&CERT_STATUS),
        Field::new("thisUpdate", Shape::Kind(Asn1Kind::GeneralizedTime)),
        Field::new(
            "nextUpdate",
            Shape::Explicit(0, &Shape::Kind(Asn1Kind::GeneralizedTime)),
        ),
        Field::new(
            "singleExtensions",
            Shape::Explicit(1, &Shape::Kind(Asn1Kind::Sequence)),
        )
        .with(&ExtensionsCorrector),
    ],
);

static RESPONSES: CollectionOf = CollectionOf::sequence_of(
    "responses",
    Field::new("SingleResponse", Shape::Kind(Asn1Kind::Sequence)).with(&SINGLE_RESPONSE),
);

static RESPONDER_ID: Choice = Choice::new(
    "ResponderID",
    &[
        Field::new("byName", Shape::Explicit(1, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&NameCorrector),
        Field::new("byKey", Shape::Explicit(2, &Shape::Kind(Asn1Kind::OctetString))),
    ],
);

static RESPONSE_DATA: Sequence = Sequence::new(
    "ResponseData",
    &[
        Field::new("version", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Integer)))
            .explain(Explain::DefaultInt(0, "v1")),
        Field::new("responderID", Shape::Choice(&RESPONDER_ID)).with(&RESPONDER_ID),
        Field::new("producedAt", Shape::Kind(Asn1Kind::GeneralizedTime)),
        Field::new("responses", Shape::Kind(Asn1Kind::Sequence)).with(&RESPONSES),
        Field::new(
            "responseExtensions",
            Shape::Explicit(1, &Shape::Kind(Asn1Kind::Sequence)),
        )
        .with(&ExtensionsCorrector),
    ],
);

static CERTS: CollectionOf = CollectionOf::sequence_of(
    "certs",
    Field::new("Certificate", Shape::Kind(Asn1Kind::Sequence)).with(&CertificateCorrector),
);

static BASIC_OCSP_RESPONSE: Sequence = Sequence::new(
    "BasicOCSPResponse",
    &[
        Field::new("tbsResponseData", Shape::Kind(Asn1Kind::Sequence)).with(&RESPONSE_DATA),
        Field::new("signatureAlgorithm", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("signature", Shape::Kind(Asn1Kind::BitString)),
        Field::new("certs", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Sequence))).with(&CERTS),
    ],
);

schema_corrector!(
    BasicOcspResponseCorrector,
    Some(known::ID_PKIX_OCSP_BASIC),
    BASIC_OCSP_RESPONSE
);

/// `id-pkix-ocsp-nocheck`, whose value is a NULL.
#[derive(Clone, Copy, Debug, Default)]
pub struct OcspNoCheckCorrector;

impl Corrector for OcspNoCheckCorrector {
    fn oid(&self) -> Option<Oid> {
        Some(known::ID_PKIX_OCSP_NOCHECK)
    }

    fn default_field_name(&self) -> &'static str {
        "ocspNoCheck"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if node.base_kind() == Asn1Kind::Null {
            node.set_field_name(field_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        anyhow::{anyhow, Result},
        hex_literal::hex,
    };

    // One good and one revoked response, signed by an empty responder name.
    const BASIC: [u8; 201] = hex!(
        "3081c6"
        "3081b2"
        "a102 3000"
        "180f 32303234303130313030303030305a"
        "308183"
        "303e"
        "3016 3009 06052b0e03021a 0500 0402aabb 0402ccdd 020107"
        "8000"
        "180f 32303234303130313030303030305a"
        "a011 180f 32303234303130383030303030305a"
        "3041"
        "3016 3009 06052b0e03021a 0500 0402aabb 0402ccdd 020107"
        "a116 180f 32303233313230313030303030305a a003 0a0101"
        "180f 32303234303130313030303030305a"
        "a115 3013 3011 06092b0601050507300102 0404 04021234"
        "300a 06082a8648ce3d040302"
        "0303 00abcd"
    );

    fn decode(input: &[u8]) -> Result<Asn1Node> {
        Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("decoding failed"))
    }

    fn names(node: &Asn1Node) -> Vec<&str> {
        node.children()
            .iter()
            .map(|child| child.field_name().unwrap_or_default())
            .collect()
    }

    fn check_basic(node: &Asn1Node) {
        assert_eq!(
            names(node),
            ["tbsResponseData", "signatureAlgorithm", "signature"]
        );
        let data = &node.children()[0];
        assert_eq!(
            names(data),
            ["responderID", "producedAt", "responses", "responseExtensions"]
        );
        assert_eq!(data.children()[0].explanation(), Some("byName"));

        let good = &data.children()[2].children()[0];
        assert_eq!(
            names(good),
            ["certID", "certStatus", "thisUpdate", "nextUpdate"]
        );
        assert_eq!(good.children()[0].children()[0].children()[0].explanation(), Some("sha1"));
        assert_eq!(good.children()[1].to_string(), "certStatus (good)");
        assert_eq!(good.children()[1].type_string(), "[0] IMPLICIT NULL");
        assert_eq!(
            good.children()[3].to_string(),
            "nextUpdate: 2024-01-08T00:00:00Z"
        );

        let revoked = &data.children()[2].children()[1];
        let status = &revoked.children()[1];
        assert_eq!(status.to_string(), "certStatus (revoked)");
        assert_eq!(status.type_string(), "[1] IMPLICIT SEQUENCE");
        assert_eq!(
            names(status),
            ["revocationTime", "revocationReason"]
        );
        assert_eq!(
            status.children()[1].to_string(),
            "revocationReason: 1 (keyCompromise)"
        );
        assert_eq!(
            data.children()[3].children()[0].children()[0].explanation(),
            Some("nonce")
        );
    }

    #[test]
    fn test_basic_ocsp_response() -> Result<()> {
        let mut node = decode(&BASIC)?;
        BasicOcspResponseCorrector.correct(&mut node);
        assert_eq!(node.field_name(), Some("BasicOCSPResponse"));
        check_basic(&node);
        Ok(())
    }

    #[test]
    fn test_ocsp_response() -> Result<()> {
        let mut input = hex!("3081e0 0a0100 a081da 3081d7 06092b0601050507300101 0481c9").to_vec();
        input.extend_from_slice(&BASIC);
        let mut node = decode(&input)?;
        OcspResponseCorrector.correct(&mut node);
        assert_eq!(node.children()[0].to_string(), "responseStatus: 0 (successful)");
        let bytes = &node.children()[1];
        assert_eq!(bytes.field_name(), Some("responseBytes"));
        assert_eq!(bytes.children()[0].explanation(), Some("basic"));
        let response = &bytes.children()[1];
        assert_eq!(response.field_name(), Some("response"));
        let basic = &response.children()[0];
        assert_eq!(basic.field_name(), Some("BasicOCSPResponse"));
        check_basic(basic);
        Ok(())
    }

    #[test]
    fn test_unsuccessful_response() -> Result<()> {
        let mut node = decode(&hex!("3003 0a0103"))?;
        OcspResponseCorrector.correct(&mut node);
        assert_eq!(node.children()[0].to_string(), "responseStatus: 3 (tryLater)");
        Ok(())
    }

    #[test]
    fn test_no_check() -> Result<()> {
        let mut node = decode(&hex!("0500"))?;
        OcspNoCheckCorrector.correct(&mut node);
        assert_eq!(node.to_string(), "ocspNoCheck");

        let mut node = decode(&hex!("020100"))?;
        OcspNoCheckCorrector.correct(&mut node);
        assert_eq!(node.field_name(), None);
        Ok(())
    }
}
