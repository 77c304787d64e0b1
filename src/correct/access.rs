//! AuthorityInfoAccessSyntax, RFC 5280 4.2.2.1.
use {
    super::{
        general_name::GENERAL_NAME,
        schema::{CollectionOf, Explain, Field, Sequence, Shape},
    },
    crate::{asn1::Asn1Kind, oid::known},
};

static ACCESS_DESCRIPTION: Sequence = Sequence::new(
    "AccessDescription",
    &[
        Field::new("accessMethod", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("accessLocation", Shape::Choice(&GENERAL_NAME)).with(&GENERAL_NAME),
    ],
);

static AUTHORITY_INFO_ACCESS: CollectionOf = CollectionOf::sequence_of(
    "authorityInfoAccess",
    Field::new("AccessDescription", Shape::Kind(Asn1Kind::Sequence)).with(&ACCESS_DESCRIPTION),
);

schema_corrector!(
    /// `AuthorityInfoAccessSyntax` from RFC 5280 4.2.2.1.
    AuthorityInfoAccessCorrector,
    Some(known::ID_PE_AUTHORITY_INFO_ACCESS),
    AUTHORITY_INFO_ACCESS
);
