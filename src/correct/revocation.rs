//! Revocation data embedded in signatures: CRLs from RFC 5280 section 5 and
//! Adobe's `RevocationInfoArchival` signed attribute.
use {
    super::{
        certificate::{NameCorrector, TIME, VERSIONS},
        schema::{CollectionOf, Explain, Field, NamedValues, Sequence, Shape},
        AlgorithmIdentifierCorrector, ExtensionsCorrector, OcspResponseCorrector,
    },
    crate::{asn1::Asn1Kind, oid::known},
};

/// `CRLReason`
pub(super) const CRL_REASON_CODES: &[(i128, &str)] = &[
    (0, "unspecified"),
    (1, "keyCompromise"),
    (2, "cACompromise"),
    (3, "affiliationChanged"),
    (4, "superseded"),
    (5, "cessationOfOperation"),
    (6, "certificateHold"),
    (8, "removeFromCRL"),
    (9, "privilegeWithdrawn"),
    (10, "aACompromise"),
];

static REASON_CODE: NamedValues = NamedValues::new("reasonCode", CRL_REASON_CODES);

schema_corrector!(
    /// The `reasonCode` CRL entry extension.
    ReasonCodeCorrector,
    Some(known::ID_CE_CRL_REASONS),
    REASON_CODE
);

static REVOKED_CERTIFICATE: Sequence = Sequence::new(
    "revokedCertificate",
    &[
        Field::new("userCertificate", Shape::Kind(Asn1Kind::Integer)),
        Field::new("revocationDate", Shape::Choice(&TIME)).with(&TIME),
        Field::new("crlEntryExtensions", Shape::Kind(Asn1Kind::Sequence))
            .with(&ExtensionsCorrector),
    ],
);

static REVOKED_CERTIFICATES: CollectionOf = CollectionOf::sequence_of(
    "revokedCertificates",
    Field::new("revokedCertificate", Shape::Kind(Asn1Kind::Sequence))
        .with(&REVOKED_CERTIFICATE),
);

static TBS_CERT_LIST: Sequence = Sequence::new(
    "TBSCertList",
    &[
        Field::new("version", Shape::Kind(Asn1Kind::Integer)).explain(Explain::Named(VERSIONS)),
        Field::new("signature", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("issuer", Shape::Kind(Asn1Kind::Sequence)).with(&NameCorrector),
        Field::new("thisUpdate", Shape::Choice(&TIME)).with(&TIME),
        Field::new("nextUpdate", Shape::Choice(&TIME)).with(&TIME),
        Field::new("revokedCertificates", Shape::Kind(Asn1Kind::Sequence))
            .with(&REVOKED_CERTIFICATES),
        Field::new("crlExtensions", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&ExtensionsCorrector),
    ],
);

static CERTIFICATE_LIST: Sequence = Sequence::new(
    "CertificateList",
    &[
        Field::new("tbsCertList", Shape::Kind(Asn1Kind::Sequence)).with(&TBS_CERT_LIST),
        Field::new("signatureAlgorithm", Shape::Kind(Asn1Kind::Sequence))
            .with(&AlgorithmIdentifierCorrector),
        Field::new("signatureValue", Shape::Kind(Asn1Kind::BitString)),
    ],
);

schema_corrector!(
    /// A complete CRL.
    CertificateListCorrector,
    None,
    CERTIFICATE_LIST
);

static CRLS: CollectionOf = CollectionOf::sequence_of(
    "crl",
    Field::new("CertificateList", Shape::Kind(Asn1Kind::Sequence))
        .with(&CertificateListCorrector),
);

static OCSP_RESPONSES: CollectionOf = CollectionOf::sequence_of(
    "ocsp",
    Field::new("OCSPResponse", Shape::Kind(Asn1Kind::Sequence)).with(&OcspResponseCorrector),
);

static OTHER_REV_INFO: Sequence = Sequence::new(
    "OtherRevInfo",
    &[
        Field::new("type", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("value", Shape::Kind(Asn1Kind::OctetString)),
    ],
);

static OTHER_REV_INFOS: CollectionOf = CollectionOf::sequence_of(
    "otherRevInfo",
    Field::new("OtherRevInfo", Shape::Kind(Asn1Kind::Sequence)).with(&OTHER_REV_INFO),
);

static REVOCATION_INFO_ARCHIVAL: Sequence = Sequence::new(
    "RevocationInfoArchival",
    &[
        Field::new("crl", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Sequence))).with(&CRLS),
        Field::new("ocsp", Shape::Explicit(1, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&OCSP_RESPONSES),
        Field::new(
            "otherRevInfo",
            Shape::Explicit(2, &Shape::Kind(Asn1Kind::Sequence)),
        )
        .with(&OTHER_REV_INFOS),
    ],
);

schema_corrector!(
    /// `adbe-revocationInfoArchival`, CRLs and OCSP responses archived in
    /// the signature.
    RevocationInfoArchivalCorrector,
    Some(known::ADBE_REVOCATION_INFO_ARCHIVAL),
    REVOCATION_INFO_ARCHIVAL
);
