//! RFC 5280 section 4.1 certificates and distinguished names.
use {
    super::{
        schema::{Choice, CollectionOf, Explain, Field, Sequence, Shape},
        AlgorithmIdentifierCorrector, ExtensionsCorrector,
    },
    crate::asn1::Asn1Kind,
};

pub(super) const VERSIONS: &[(i128, &str)] = &[(0, "v1"), (1, "v2"), (2, "v3")];

/// `Time ::= CHOICE { utcTime UTCTime, generalTime GeneralizedTime }`
pub(super) static TIME: Choice = Choice::new(
    "Time",
    &[
        Field::new("utcTime", Shape::Kind(Asn1Kind::UtcTime)),
        Field::new("generalTime", Shape::Kind(Asn1Kind::GeneralizedTime)),
    ],
);

static ATTRIBUTE_TYPE_AND_VALUE: Sequence = Sequence::new(
    "AttributeTypeAndValue",
    &[
        Field::new("type", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("value", Shape::Any),
    ],
);

pub(super) static RELATIVE_DISTINGUISHED_NAME: CollectionOf = CollectionOf::set_of(
    "RelativeDistinguishedName",
    Field::new("AttributeTypeAndValue", Shape::Kind(Asn1Kind::Sequence))
        .with(&ATTRIBUTE_TYPE_AND_VALUE),
);

static NAME: CollectionOf = CollectionOf::sequence_of(
    "Name",
    Field::new("RelativeDistinguishedName", Shape::Kind(Asn1Kind::Set))
        .with(&RELATIVE_DISTINGUISHED_NAME),
);

schema_corrector!(
    /// `Name`, read as its only alternative `RDNSequence`.
    NameCorrector,
    None,
    NAME
);

static VALIDITY: Sequence = Sequence::new(
    "Validity",
    &[
        Field::new("notBefore", Shape::Choice(&TIME)).with(&TIME),
        Field::new("notAfter", Shape::Choice(&TIME)).with(&TIME),
    ],
);

static SUBJECT_PUBLIC_KEY_INFO: Sequence = Sequence::new(
    "SubjectPublicKeyInfo",
    &[
        Field::new("algorithm", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("subjectPublicKey", Shape::Kind(Asn1Kind::BitString)),
    ],
);

static TBS_CERTIFICATE: Sequence = Sequence::new(
    "TBSCertificate",
    &[
        Field::new("version", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Integer)))
            .explain(Explain::Named(VERSIONS)),
        Field::new("serialNumber", Shape::Kind(Asn1Kind::Integer)),
        Field::new("signature", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("issuer", Shape::Kind(Asn1Kind::Sequence)).with(&NameCorrector),
        Field::new("validity", Shape::Kind(Asn1Kind::Sequence)).with(&VALIDITY),
        Field::new("subject", Shape::Kind(Asn1Kind::Sequence)).with(&NameCorrector),
        Field::new("subjectPublicKeyInfo", Shape::Kind(Asn1Kind::Sequence))
            .with(&SUBJECT_PUBLIC_KEY_INFO),
        Field::new("issuerUniqueID", Shape::Implicit(1, Asn1Kind::BitString)),
        Field::new("subjectUniqueID", Shape::Implicit(2, Asn1Kind::BitString)),
        Field::new("extensions", Shape::Explicit(3, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&ExtensionsCorrector),
    ],
);

static CERTIFICATE: Sequence = Sequence::new(
    "Certificate",
    &[
        Field::new("tbsCertificate", Shape::Kind(Asn1Kind::Sequence)).with(&TBS_CERTIFICATE),
        Field::new("signatureAlgorithm", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("signatureValue", Shape::Kind(Asn1Kind::BitString)),
    ],
);

schema_corrector!(CertificateCorrector, None, CERTIFICATE);
