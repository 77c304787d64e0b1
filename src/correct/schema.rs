//! Declarative building blocks for correctors.
//!
//! A schema production is described by statics of the types here and walked
//! against the children of a node. Matching is positional: each field either
//! matches the child under the cursor, and consumes it, or is taken to be
//! absent. There is no backtracking, so productions whose OPTIONAL fields are
//! not distinguishable on the wire can not be described.
use {
    super::Corrector,
    crate::{
        asn1::{Asn1Kind, Asn1Object, Class, TaggedObject},
        ber::{BerCodec, Leniency},
        node::Asn1Node,
        oid,
    },
    der::asn1::ObjectIdentifier as Oid,
    tracing::trace,
};

/// Expected wire shape of a field.
#[derive(Clone, Copy)]
pub enum Shape {
    Any,
    Kind(Asn1Kind),
    OneOf(&'static [Asn1Kind]),

    /// Any alternative of the CHOICE. Turning is left to its corrector.
    Choice(&'static Choice),

    /// `[n] EXPLICIT` around the inner shape.
    Explicit(u32, &'static Shape),

    /// `[n] IMPLICIT` of the given kind.
    Implicit(u32, Asn1Kind),
}

/// Explanation derived from a field's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Explain {
    Nothing,

    /// Name of the object identifier.
    Oid,

    /// Name of an INTEGER or ENUMERATED value.
    Named(&'static [(i128, &'static str)]),

    /// INTEGER equal to its DEFAULT.
    DefaultInt(i128, &'static str),

    /// BOOLEAN equal to its DEFAULT.
    DefaultBool(bool, &'static str),
}

/// A named component of a production.
#[derive(Clone, Copy)]
pub struct Field {
    pub name:      &'static str,
    pub shape:     Shape,
    pub corrector: Option<&'static dyn Corrector>,
    pub explain:   Explain,
}

/// `SEQUENCE { ... }`
pub struct Sequence {
    name:   &'static str,
    fields: &'static [Field],
}

/// `SEQUENCE OF` or `SET OF`.
pub struct CollectionOf {
    name: &'static str,
    kind: Asn1Kind,
    item: Field,
}

/// `CHOICE { ... }`, possibly under explicit tags of the enclosing field.
pub struct Choice {
    name:         &'static str,
    depth:        usize,
    alternatives: &'static [Field],
}

/// `BIT STRING { ... }` with named bits.
pub struct NamedBits {
    name: &'static str,
    bits: &'static [&'static str],
}

/// INTEGER or ENUMERATED with named values.
pub struct NamedValues {
    name:   &'static str,
    values: &'static [(i128, &'static str)],
}

/// The object `depth` tags down the chain of `node`, `0` being the node's own.
pub fn object_at(node: &Asn1Node, depth: usize) -> Option<&Asn1Object> {
    match depth.checked_sub(1) {
        None => Some(node.object()),
        Some(level) => node.tagged()?.level(level).map(TaggedObject::base),
    }
}

fn is_context(tagged: &TaggedObject, number: u32) -> bool {
    tagged.class() == Class::ContextSpecific && tagged.number() == number
}

impl Shape {
    pub fn matches(&self, object: &Asn1Object) -> bool {
        match (self, object) {
            (Self::Any, _) => true,
            (Self::Kind(kind), object) => object.kind() == *kind,
            (Self::OneOf(kinds), object) => kinds.contains(&object.kind()),
            (Self::Choice(choice), object) => choice
                .alternatives
                .iter()
                .any(|alternative| alternative.shape.matches(object)),
            (Self::Explicit(number, inner), Asn1Object::Tagged(tagged)) => {
                is_context(tagged, *number)
                    && tagged.explicit_base().is_some_and(|base| inner.matches(base))
            }
            (Self::Implicit(number, kind), Asn1Object::Tagged(tagged)) => {
                is_context(tagged, *number) && tagged.fits_implicit(*kind)
            }
            _ => false,
        }
    }

    /// Turns the tags of `node` from `depth` on into this shape.
    pub fn turn(&self, node: &mut Asn1Node, depth: usize) -> bool {
        match self {
            Self::Any | Self::Kind(_) | Self::OneOf(_) | Self::Choice(_) => true,
            Self::Explicit(_, inner) => node.turn_explicit(depth) && inner.turn(node, depth + 1),
            Self::Implicit(_, kind) => node.turn_implicit(depth, *kind),
        }
    }
}

impl Explain {
    pub fn apply(&self, node: &mut Asn1Node) {
        let object = node.object().untagged();
        let explanation = match *self {
            Self::Nothing => None,
            Self::Oid => object.oid().map(oid::explain),
            Self::Named(values) => object
                .integer()
                .and_then(|value| lookup(values, value))
                .map(str::to_owned),
            Self::DefaultInt(default, text) => {
                (object.integer() == Some(default)).then(|| text.to_owned())
            }
            Self::DefaultBool(default, text) => {
                (object.boolean() == Some(default)).then(|| text.to_owned())
            }
        };
        if let Some(explanation) = explanation {
            node.set_explanation(explanation);
        }
    }
}

fn lookup(values: &[(i128, &'static str)], value: i128) -> Option<&'static str> {
    values
        .iter()
        .find(|(candidate, _)| *candidate == value)
        .map(|(_, name)| *name)
}

impl Field {
    pub const fn new(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            corrector: None,
            explain: Explain::Nothing,
        }
    }

    pub const fn with(self, corrector: &'static dyn Corrector) -> Self {
        Self {
            corrector: Some(corrector),
            ..self
        }
    }

    pub const fn explain(self, explain: Explain) -> Self {
        Self { explain, ..self }
    }

    /// Turns, names, explains and descends into `node`.
    ///
    /// The field name is set before the nested corrector runs so a node keeps
    /// it even when the nested production does not match.
    pub fn apply(&self, node: &mut Asn1Node, name: &str) {
        if !self.shape.turn(node, 0) {
            trace!("Could not turn {} into {}", node.type_string(), self.name);
        }
        node.set_field_name(name);
        self.explain.apply(node);
        if let Some(corrector) = self.corrector {
            corrector.correct_as(node, name);
        }
    }
}

/// Names the leading children of `children` by the fields they match.
pub fn match_fields(children: &mut [Asn1Node], fields: &[Field]) {
    let mut cursor = 0;
    for field in fields {
        let Some(child) = children.get_mut(cursor) else {
            break;
        };
        if !field.shape.matches(child.object()) {
            trace!("{} absent, found {}", field.name, child.type_string());
            continue;
        }
        field.apply(child, field.name);
        cursor += 1;
    }
}

impl Sequence {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    /// Returns `false` without touching `node` unless it is a SEQUENCE.
    pub fn correct_fields(&self, node: &mut Asn1Node, field_name: &str) -> bool {
        if node.base_kind() != Asn1Kind::Sequence {
            trace!("{field_name}: expected SEQUENCE, found {}", node.type_string());
            return false;
        }
        node.set_field_name(field_name);
        match_fields(node.children_mut(), self.fields);
        true
    }
}

impl Corrector for Sequence {
    fn default_field_name(&self) -> &'static str {
        self.name
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        self.correct_fields(node, field_name);
    }
}

impl CollectionOf {
    pub const fn sequence_of(name: &'static str, item: Field) -> Self {
        Self {
            name,
            kind: Asn1Kind::Sequence,
            item,
        }
    }

    pub const fn set_of(name: &'static str, item: Field) -> Self {
        Self {
            name,
            kind: Asn1Kind::Set,
            item,
        }
    }
}

impl Corrector for CollectionOf {
    fn default_field_name(&self) -> &'static str {
        self.name
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if node.base_kind() != self.kind {
            trace!("{field_name}: expected {}, found {}", self.kind, node.type_string());
            return;
        }
        node.set_field_name(field_name);
        for child in node.children_mut() {
            if self.item.shape.matches(child.object()) {
                self.item.apply(child, self.item.name);
            }
        }
    }
}

impl Choice {
    pub const fn new(name: &'static str, alternatives: &'static [Field]) -> Self {
        Self {
            name,
            depth: 0,
            alternatives,
        }
    }

    /// A CHOICE that is matched below `depth` explicit tags of its field.
    pub const fn below(self, depth: usize) -> Self {
        Self { depth, ..self }
    }
}

impl Corrector for Choice {
    fn default_field_name(&self) -> &'static str {
        self.name
    }

    /// The node is named after the chosen alternative when `field_name` is
    /// the default, otherwise the alternative becomes the explanation.
    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        let Some(object) = object_at(node, self.depth) else {
            return;
        };
        let Some(alternative) = self
            .alternatives
            .iter()
            .find(|alternative| alternative.shape.matches(object))
        else {
            trace!("{field_name}: no alternative of {} matches", self.name);
            return;
        };
        if !alternative.shape.turn(node, self.depth) {
            return;
        }
        let name = if field_name == self.name {
            alternative.name
        } else {
            field_name
        };
        node.set_field_name(name);
        alternative.explain.apply(node);
        if let Some(corrector) = alternative.corrector {
            corrector.correct_as(node, name);
        }
        if name != alternative.name && node.explanation().is_none() {
            node.set_explanation(alternative.name);
        }
    }
}

impl NamedBits {
    pub const fn new(name: &'static str, bits: &'static [&'static str]) -> Self {
        Self { name, bits }
    }
}

impl Corrector for NamedBits {
    fn default_field_name(&self) -> &'static str {
        self.name
    }

    /// Replaces the children with one BOOLEAN per named bit present in the
    /// encoding. Trailing zero bits left out by DER get no child.
    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        let Asn1Object::BitString(bit_string) = node.object().untagged() else {
            trace!("{field_name}: expected BIT STRING, found {}", node.type_string());
            return;
        };
        let flags = crate::asn1::bits(bit_string);
        node.set_field_name(field_name);
        node.take_children();
        for (&bit, name) in flags.iter().zip(self.bits) {
            let mut child = Asn1Node::from_object(Asn1Object::Boolean(bit));
            child.set_field_name(*name);
            node.adopt(child);
        }
    }
}

impl NamedValues {
    pub const fn new(name: &'static str, values: &'static [(i128, &'static str)]) -> Self {
        Self { name, values }
    }
}

impl Corrector for NamedValues {
    fn default_field_name(&self) -> &'static str {
        self.name
    }

    fn correct_as(&self, node: &mut Asn1Node, field_name: &str) {
        if !matches!(node.base_kind(), Asn1Kind::Integer | Asn1Kind::Enumerated) {
            trace!("{field_name}: expected a number, found {}", node.type_string());
            return;
        }
        node.set_field_name(field_name);
        Explain::Named(self.values).apply(node);
    }
}

/// Decodes the content of an OCTET STRING and shows it as the only child,
/// annotated by the corrector registered for `oid`.
///
/// Returns `false` and keeps the node as it is when the content is not a
/// single BER value.
pub fn correct_encapsulated(node: &mut Asn1Node, oid: Option<&Oid>) -> bool {
    let Asn1Object::OctetString(octets) = node.object().untagged() else {
        return false;
    };
    // Unlike a signature blob, the content has no padding.
    let codec = BerCodec {
        trailing_data: Leniency::Strict,
        ..BerCodec::default()
    };
    let Some(mut inner) = Asn1Node::from_bytes_with(&codec, octets.as_bytes()) else {
        return false;
    };
    if let Some(oid) = oid {
        super::apply(oid, &mut inner);
    }
    node.take_children();
    node.adopt(inner);
    true
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        anyhow::{anyhow, Result},
        hex_literal::hex,
    };

    fn decode(input: &[u8]) -> Result<Asn1Node> {
        Asn1Node::from_bytes(input).ok_or_else(|| anyhow!("decoding failed"))
    }

    static OPTIONALS: Sequence = Sequence::new(
        "Optionals",
        &[
            Field::new("version", Shape::Explicit(0, &Shape::Kind(Asn1Kind::Integer)))
                .explain(Explain::Named(&[(0, "v1"), (1, "v2")])),
            Field::new("flag", Shape::Kind(Asn1Kind::Boolean))
                .explain(Explain::DefaultBool(false, "default")),
            Field::new("serial", Shape::Kind(Asn1Kind::Integer)),
            Field::new("extra", Shape::Implicit(1, Asn1Kind::Sequence)),
        ],
    );

    #[test]
    fn test_optional_fields_skipped() -> Result<()> {
        // { serial 7, [1] { NULL } }, version and flag are absent.
        let mut node = decode(&hex!("3007 020107 a1020500"))?;
        OPTIONALS.correct(&mut node);
        assert_eq!(node.field_name(), Some("Optionals"));
        let names = node
            .children()
            .iter()
            .map(|child| child.field_name())
            .collect::<Vec<_>>();
        assert_eq!(names, [Some("serial"), Some("extra")]);
        assert_eq!(node.children()[1].type_string(), "[1] IMPLICIT SEQUENCE");
        assert_eq!(node.children()[1].children().len(), 1);
        Ok(())
    }

    #[test]
    fn test_all_fields_present() -> Result<()> {
        let mut node = decode(&hex!("300d a003020101 010100 020107 a100"))?;
        OPTIONALS.correct(&mut node);
        let labels = node
            .children()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            [
                "version: 1 (v2)",
                "flag: FALSE (default)",
                "serial: 7",
                "extra"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_unmatched_children_untouched() -> Result<()> {
        // An OID where the schema expects numbers.
        let mut node = decode(&hex!("3005 0603551d0f"))?;
        OPTIONALS.correct(&mut node);
        assert_eq!(node.field_name(), Some("Optionals"));
        assert_eq!(node.children()[0].field_name(), None);

        let mut node = decode(&hex!("020101"))?;
        OPTIONALS.correct(&mut node);
        assert_eq!(node.field_name(), None);
        Ok(())
    }

    static TIME: Choice = Choice::new(
        "Time",
        &[
            Field::new("utcTime", Shape::Kind(Asn1Kind::UtcTime)),
            Field::new("generalTime", Shape::Kind(Asn1Kind::GeneralizedTime)),
        ],
    );

    #[test]
    fn test_choice() -> Result<()> {
        let input = hex!("170d 3234303130323033303430355a");
        let mut node = decode(&input)?;
        TIME.correct(&mut node);
        assert_eq!(node.to_string(), "utcTime: 2024-01-02T03:04:05Z");

        let mut node = decode(&input)?;
        TIME.correct_as(&mut node, "thisUpdate");
        assert_eq!(node.to_string(), "thisUpdate: 2024-01-02T03:04:05Z (utcTime)");

        let mut node = decode(&hex!("0500"))?;
        TIME.correct(&mut node);
        assert_eq!(node.field_name(), None);
        Ok(())
    }

    #[test]
    fn test_collection_of() -> Result<()> {
        static NUMBERS: CollectionOf = CollectionOf::set_of(
            "numbers",
            Field::new("number", Shape::Kind(Asn1Kind::Integer)),
        );
        let mut node = decode(&hex!("3108 020101 0500 020102"))?;
        NUMBERS.correct(&mut node);
        let names = node
            .children()
            .iter()
            .map(|child| child.field_name())
            .collect::<Vec<_>>();
        assert_eq!(names, [Some("number"), None, Some("number")]);

        // A SEQUENCE is not a SET.
        let mut node = decode(&hex!("3003 020101"))?;
        NUMBERS.correct(&mut node);
        assert_eq!(node.field_name(), None);
        Ok(())
    }

    #[test]
    fn test_named_values() -> Result<()> {
        static STATUS: NamedValues = NamedValues::new("status", &[(0, "ok"), (3, "later")]);
        let mut node = decode(&hex!("0a0103"))?;
        STATUS.correct(&mut node);
        assert_eq!(node.to_string(), "status: 3 (later)");
        let mut node = decode(&hex!("0a0107"))?;
        STATUS.correct(&mut node);
        assert_eq!(node.to_string(), "status: 7");
        Ok(())
    }

    #[test]
    fn test_encapsulated() -> Result<()> {
        let mut node = decode(&hex!("0405 3003 0101ff"))?;
        assert!(correct_encapsulated(&mut node, None));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].children()[0].to_string(), "BOOLEAN: TRUE");
        // Running it again does not stack the decoded content.
        assert!(correct_encapsulated(&mut node, None));
        assert_eq!(node.children().len(), 1);

        let mut node = decode(&hex!("0402 3005"))?;
        assert!(!correct_encapsulated(&mut node, None));
        assert!(node.children().is_empty());

        // A value followed by more bytes is not a single value.
        let mut node = decode(&hex!("0405 020101 ffff"))?;
        assert!(!correct_encapsulated(&mut node, None));
        assert!(node.children().is_empty());
        Ok(())
    }
}
