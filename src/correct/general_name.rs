//! `GeneralName` from RFC 5280 4.2.1.6, with implicit tags.
use {
    super::{
        schema::{Choice, CollectionOf, Explain, Field, Sequence, Shape},
        NameCorrector,
    },
    crate::asn1::Asn1Kind,
};

static OTHER_NAME: Sequence = Sequence::new(
    "OtherName",
    &[
        Field::new("type-id", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("value", Shape::Explicit(0, &Shape::Any)),
    ],
);

static EDI_PARTY_NAME: Sequence = Sequence::new(
    "EDIPartyName",
    &[
        Field::new("nameAssigner", Shape::Explicit(0, &Shape::Any)),
        Field::new("partyName", Shape::Explicit(1, &Shape::Any)),
    ],
);

pub(super) static GENERAL_NAME: Choice = Choice::new(
    "GeneralName",
    &[
        Field::new("otherName", Shape::Implicit(0, Asn1Kind::Sequence)).with(&OTHER_NAME),
        Field::new("rfc822Name", Shape::Implicit(1, Asn1Kind::Ia5String)),
        Field::new("dNSName", Shape::Implicit(2, Asn1Kind::Ia5String)),
        Field::new("x400Address", Shape::Implicit(3, Asn1Kind::Sequence)),
        Field::new("directoryName", Shape::Explicit(4, &Shape::Kind(Asn1Kind::Sequence)))
            .with(&NameCorrector),
        Field::new("ediPartyName", Shape::Implicit(5, Asn1Kind::Sequence))
            .with(&EDI_PARTY_NAME),
        Field::new(
            "uniformResourceIdentifier",
            Shape::Implicit(6, Asn1Kind::Ia5String),
        ),
        Field::new("iPAddress", Shape::Implicit(7, Asn1Kind::OctetString)),
        Field::new("registeredID", Shape::Implicit(8, Asn1Kind::ObjectIdentifier))
            .explain(Explain::Oid),
    ],
);

schema_corrector!(
    /// A single `GeneralName`, named after the alternative it holds.
    GeneralNameCorrector,
    None,
    GENERAL_NAME
);

pub(super) static GENERAL_NAMES: CollectionOf = CollectionOf::sequence_of(
    "GeneralNames",
    Field::new("GeneralName", Shape::Choice(&GENERAL_NAME)).with(&GENERAL_NAME),
);

schema_corrector!(GeneralNamesCorrector, None, GENERAL_NAMES);
