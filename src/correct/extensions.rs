//! Certificate and CRL extensions.
use {
    super::{
        schema::{correct_encapsulated, CollectionOf, Explain, Field, Sequence, Shape},
        Corrector,
    },
    crate::{asn1::Asn1Kind, node::Asn1Node},
};

static EXTENSION: Sequence = Sequence::new(
    "Extension",
    &[
        Field::new("extnID", Shape::Kind(Asn1Kind::ObjectIdentifier)).explain(Explain::Oid),
        Field::new("critical", Shape::Kind(Asn1Kind::Boolean))
            .explain(Explain::DefaultBool(false, "default")),
        Field::new("extnValue", Shape::Kind(Asn1Kind::OctetString)),
    ],
);

/// `Extension`, with the DER value inside `extnValue` decoded and annotated
/// by the corrector registered for `extnID`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionCorrector;

impl Corrector for ExtensionCorrector {
    fn default_field_name(&self) -> &'static str {
        "Extension"
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if !EXTENSION.correct_fields(node, field_name) {
            return;
        }
        let extn_id = node
            .children()
            .first()
            .and_then(|child| child.object().oid())
            .copied();
        let value = node
            .children_mut()
            .iter_mut()
            .find(|child| child.field_name() == Some("extnValue"));
        if let Some(value) = value {
            correct_encapsulated(value, extn_id.as_ref());
        }
    }
}

static EXTENSIONS: CollectionOf = CollectionOf::sequence_of(
    "Extensions",
    Field::new("Extension", Shape::Kind(Asn1Kind::Sequence)).with(&ExtensionCorrector),
);

schema_corrector!(ExtensionsCorrector, None, EXTENSIONS);
