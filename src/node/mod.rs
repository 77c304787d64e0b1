//! Browsable tree of decoded values.
//!
//! An [`Asn1Node`] starts out generic, labelled only with its type. Correctors
//! from [`crate::correct`] then attach field names and explanations from the
//! schema, and turn tagged values into their real types.

mod json;

use {
    crate::{
        asn1::{Asn1Kind, Asn1Object, TaggedObject},
        ber::BerCodec,
    },
    std::{
        fmt::{self, Display, Formatter},
        mem,
    },
    tracing::debug,
};

/// A decoded value with its schema annotations.
///
/// The elements of a SEQUENCE or SET are moved into [`Asn1Node::children`],
/// leaving the node's own object empty. A tagged node keeps the complete
/// [`TaggedObject`] and shows the children of its innermost base as its own,
/// the base itself never appears as a separate child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asn1Node {
    object:      Asn1Object,
    field_name:  Option<String>,
    explanation: Option<String>,
    children:    Vec<Asn1Node>,
}

impl Asn1Node {
    /// Builds the generic tree for a decoded value.
    pub fn from_object(object: Asn1Object) -> Self {
        let (object, elements) = match object {
            Asn1Object::Sequence(elements) => (Asn1Object::Sequence(Vec::new()), elements),
            Asn1Object::Set(elements) => (Asn1Object::Set(Vec::new()), elements),
            object => (object, Vec::new()),
        };
        let mut node = Self {
            object,
            field_name: None,
            explanation: None,
            children: elements.into_iter().map(Self::from_object).collect(),
        };
        node.reload();
        node
    }

    /// Decodes the first value in `bytes`, ignoring anything after it.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes_with(&BerCodec::default(), bytes)
    }

    pub fn from_bytes_with(codec: &BerCodec, bytes: &[u8]) -> Option<Self> {
        match Asn1Object::decode(codec, bytes) {
            Ok(object) => Some(Self::from_object(object)),
            Err(err) => {
                debug!("No ASN.1 interpretation: {err}");
                None
            }
        }
    }

    pub const fn object(&self) -> &Asn1Object {
        &self.object
    }

    pub const fn kind(&self) -> Asn1Kind {
        self.object.kind()
    }

    /// Kind of the innermost base for tagged nodes.
    pub fn base_kind(&self) -> Asn1Kind {
        self.object.untagged().kind()
    }

    pub const fn tagged(&self) -> Option<&TaggedObject> {
        match &self.object {
            Asn1Object::Tagged(tagged) => Some(tagged),
            _ => None,
        }
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn set_field_name(&mut self, name: impl Into<String>) {
        self.field_name = Some(name.into());
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn set_explanation(&mut self, explanation: impl Into<String>) {
        self.explanation = Some(explanation.into());
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    /// Appends `child` as the last child.
    pub fn adopt(&mut self, child: Self) {
        self.children.push(child);
    }

    pub fn take_children(&mut self) -> Vec<Self> {
        mem::take(&mut self.children)
    }

    /// Type name, with the full tag chain for tagged nodes.
    pub fn type_string(&self) -> String {
        match &self.object {
            Asn1Object::Tagged(tagged) => tagged.type_string(),
            object => object.kind().as_str().to_owned(),
        }
    }

    pub fn value_string(&self) -> Option<String> {
        self.object.value_string()
    }

    /// Stable key for picking an icon in tree views.
    pub fn icon_key(&self) -> &'static str {
        match self.kind() {
            Asn1Kind::Sequence => "sequence",
            Asn1Kind::Set => "set",
            Asn1Kind::Tagged => "tagged",
            Asn1Kind::Integer | Asn1Kind::Enumerated => "number",
            Asn1Kind::Boolean => "boolean",
            Asn1Kind::Null => "null",
            Asn1Kind::ObjectIdentifier => "oid",
            Asn1Kind::BitString => "bits",
            Asn1Kind::OctetString => "octets",
            Asn1Kind::Utf8String
            | Asn1Kind::PrintableString
            | Asn1Kind::Ia5String
            | Asn1Kind::TeletexString
            | Asn1Kind::VisibleString
            | Asn1Kind::NumericString
            | Asn1Kind::BmpString => "string",
            Asn1Kind::UtcTime | Asn1Kind::GeneralizedTime => "time",
            Asn1Kind::Unknown => "unknown",
        }
    }

    /// Reinterprets the tag `depth` levels down this node's chain as
    /// EXPLICIT, or as IMPLICIT `kind`, and rebuilds the children.
    ///
    /// Returns `false` and leaves the node untouched when there is no such
    /// tag or its content can not be read as requested. Turning a tag into
    /// what it already is keeps the existing children.
    pub fn turn_into(&mut self, depth: usize, explicit: bool, kind: Asn1Kind) -> bool {
        let Asn1Object::Tagged(outer) = &self.object else {
            return false;
        };
        let Some(level) = outer.level(depth) else {
            return false;
        };
        let Some(turned) = level.reinterpret(explicit, kind) else {
            return false;
        };
        if turned == *level {
            return true;
        }
        let outer = match depth.checked_sub(1).and_then(|parent| outer.level(parent)) {
            None => turned,
            Some(parent) => match outer.replace(parent.base(), Asn1Object::Tagged(turned)) {
                Some(outer) => outer,
                None => return false,
            },
        };
        self.object = Asn1Object::Tagged(outer);
        self.reload();
        true
    }

    pub fn turn_explicit(&mut self, depth: usize) -> bool {
        self.turn_into(depth, true, Asn1Kind::Tagged)
    }

    pub fn turn_implicit(&mut self, depth: usize, kind: Asn1Kind) -> bool {
        self.turn_into(depth, false, kind)
    }

    /// Rebuilds a tagged node's children from its innermost base.
    fn reload(&mut self) {
        let Asn1Object::Tagged(tagged) = &self.object else {
            return;
        };
        let base = Self::from_object(tagged.innermost().clone());
        self.children = base.children;
        if base.field_name.is_some() {
            self.field_name = base.field_name;
        }
        if base.explanation.is_some() {
            self.explanation = base.explanation;
        }
    }
}

/// `<field name or type>: <value> (<explanation>)`, absent parts omitted.
impl Display for Asn1Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.field_name {
            Some(name) => f.write_str(name)?,
            None => f.write_str(&self.type_string())?,
        }
        if let Some(value) = self.value_string() {
            write!(f, ": {value}")?;
        }
        if let Some(explanation) = &self.explanation {
            write!(f, " ({explanation})")?;
        }
        Ok(())
    }
}
