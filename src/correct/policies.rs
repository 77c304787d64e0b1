//! `CertificatePolicies`, RFC 5280 4.2.1.4.
use {
    super::{
        schema::{Choice, CollectionOf, Explain, Field, Sequence, Shape},
        Corrector,
    },
    crate::{asn1::Asn1Kind, node::Asn1Node, oid::known},
};

static DISPLAY_TEXT: Choice = Choice::new(
    "DisplayText",
    &[
        Field::new("ia5String", Shape::Kind(Asn1Kind::Ia5String)),
        Field::new("visibleString", Shape::Kind(Asn1Kind::VisibleString)),
        Field::new("bmpString", Shape::Kind(Asn1Kind::BmpString)),
        Field::new("utf8String", Shape::Kind(Asn1Kind::Utf8String)),
    ],
);

static NOTICE_NUMBERS: CollectionOf = CollectionOf::sequence_of(
    "noticeNumbers",
    Field::new("noticeNumber", Shape::Kind(Asn1Kind::Integer)),
);

static NOTICE_REFERENCE: Sequence = Sequence::new(
    "NoticeReference",
    &[
        Field::new("organization", Shape::Choice(&DISPLAY_TEXT)).with(&DISPLAY_TEXT),
        Field::new("noticeNumbers", Shape::Kind(Asn1Kind::Sequence)).with(&NOTICE_NUMBERS),
    ],
);

static USER_NOTICE: Sequence = Sequence::new(
    "UserNotice",
    &[
        Field::new("noticeRef", Shape::Kind(Asn1Kind::Sequence)).with(&NOTICE_REFERENCE),
        Field::new("explicitText", Shape::Choice(&DISPLAY_TEXT)).with(&DISPLAY_TEXT),
    ],
);

static POLICY_QUALIFIER_INFO: Sequence = Sequence::new(
    "PolicyQualifierInfo",
    &[
        Field::new("policyQualifierId", Shape::Kind(Asn1Kind::ObjectIdentifier))
            .explain(Explain::Oid),
        Field::new("qualifier", Shape::Any),
    ],
);

/// `PolicyQualifierInfo`, with the qualifier read by its identifier.
struct PolicyQualifierInfoCorrector;

impl Corrector for PolicyQualifierInfoCorrector {
    fn default_field_name(&self) -> &'static str {
        "PolicyQualifierInfo"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if !POLICY_QUALIFIER_INFO.correct_fields(node, field_name) {
            return;
        }
        let id = node
            .children()
            .first()
            .and_then(|child| child.object().oid())
            .copied();
        let Some(qualifier) = node.children_mut().get_mut(1) else {
            return;
        };
        if id == Some(known::ID_QT_CPS) && qualifier.kind() == Asn1Kind::Ia5String {
            qualifier.set_field_name("cPSuri");
        } else if id == Some(known::ID_QT_UNOTICE) {
            USER_NOTICE.correct_as(qualifier, "userNotice");
        }
    }
}

static POLICY_QUALIFIERS: CollectionOf = CollectionOf::sequence_of(
    "policyQualifiers",
    Field::new("PolicyQualifierInfo", Shape::Kind(Asn1Kind::Sequence))
        .with(&PolicyQualifierInfoCorrector),
);

static POLICY_INFORMATION: Sequence = Sequence::new(
    "PolicyInformation",
    &[
        Field::new("policyIdentifier", Shape::Kind(Asn1Kind::ObjectIdentifier))
            .explain(Explain::Oid),
        Field::new("policyQualifiers", Shape::Kind(Asn1Kind::Sequence))
            .with(&POLICY_QUALIFIERS),
    ],
);

static CERTIFICATE_POLICIES: CollectionOf = CollectionOf::sequence_of(
    "certificatePolicies",
    Field::new("PolicyInformation", Shape::Kind(Asn1Kind::Sequence)).with(&POLICY_INFORMATION),
);

schema_corrector!(
    CertificatePoliciesCorrector,
    Some(known::ID_CE_CERTIFICATE_POLICIES),
    CERTIFICATE_POLICIES
);
