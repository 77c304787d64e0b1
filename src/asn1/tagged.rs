use {
    super::{Asn1Kind, Asn1Object},
    crate::ber::{BerCodec, TagClass, Tlv},
    std::{
        fmt::{self, Display, Formatter},
        ptr,
    },
};

/// Tag class of a [`TaggedObject`]. Universal tags are never tagged objects.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Class {
    Application,
    ContextSpecific,
    Private,
}

/// A value under an application, context-specific or private tag.
///
/// The wire format does not say whether a tag is explicit or implicit, so
/// decoding guesses:
///
/// * constructed with exactly one element: EXPLICIT, the element is the base,
/// * constructed otherwise: IMPLICIT SEQUENCE of the elements,
/// * primitive: IMPLICIT OCTET STRING of the content.
///
/// An IMPLICIT SEQUENCE with a single element hence reads as EXPLICIT until
/// a schema turns it into its real type with [`TaggedObject::as_implicit`].
/// Nested tags form a chain through [`TaggedObject::base`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedObject {
    class:    Class,
    number:   u32,
    explicit: bool,
    base:     Box<Asn1Object>,
}

impl Class {
    pub const fn from_tag_class(class: TagClass) -> Option<Self> {
        match class {
            TagClass::Universal => None,
            TagClass::Application => Some(Self::Application),
            TagClass::ContextSpecific => Some(Self::ContextSpecific),
            TagClass::Private => Some(Self::Private),
        }
    }
}

impl TaggedObject {
    pub fn new(class: Class, number: u32, explicit: bool, base: Asn1Object) -> Self {
        Self {
            class,
            number,
            explicit,
            base: Box::new(base),
        }
    }

    pub fn context(number: u32, explicit: bool, base: Asn1Object) -> Self {
        Self::new(Class::ContextSpecific, number, explicit, base)
    }

    pub(super) fn from_tlv(codec: &BerCodec, tlv: Tlv<'_>, depth: usize) -> anyhow::Result<Self> {
        let class = Class::from_tag_class(tlv.identifier.class)
            .ok_or_else(|| anyhow::anyhow!("Universal tag is not a tagged object"))?;
        let number = tlv.identifier.number;
        if !tlv.identifier.constructed {
            let octets = der::asn1::OctetString::new(tlv.content)?;
            return Ok(Self::new(
                class,
                number,
                false,
                Asn1Object::OctetString(octets),
            ));
        }
        let mut elements = Asn1Object::elements(codec, tlv.content, depth)?;
        Ok(match elements.pop() {
            Some(single) if elements.is_empty() => Self::new(class, number, true, single),
            last => {
                elements.extend(last);
                Self::new(class, number, false, Asn1Object::Sequence(elements))
            }
        })
    }

    pub const fn class(&self) -> Class {
        self.class
    }

    pub const fn number(&self) -> u32 {
        self.number
    }

    pub const fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn base(&self) -> &Asn1Object {
        &self.base
    }

    /// This tag followed by every tag nested directly inside it.
    pub fn chain(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |tagged| match tagged.base() {
            Asn1Object::Tagged(inner) => Some(inner),
            _ => None,
        })
    }

    /// The tag `depth` levels down the chain, `0` being `self`.
    pub fn level(&self, depth: usize) -> Option<&Self> {
        self.chain().nth(depth)
    }

    /// The first base in the chain that is not itself tagged.
    pub fn innermost(&self) -> &Asn1Object {
        let mut tagged = self;
        while let Asn1Object::Tagged(inner) = tagged.base() {
            tagged = inner;
        }
        tagged.base()
    }

    /// Tags of the chain followed by the innermost type, e.g.
    /// `[0] EXPLICIT [1] IMPLICIT SEQUENCE`.
    pub fn type_string(&self) -> String {
        let mut out = String::new();
        for tagged in self.chain() {
            out.push_str(&tagged.to_string());
            out.push(' ');
        }
        out.push_str(self.innermost().kind().as_str());
        out
    }

    /// The same tag read as EXPLICIT, or as IMPLICIT `kind`.
    pub fn reinterpret(&self, explicit: bool, kind: Asn1Kind) -> Option<Self> {
        if explicit {
            self.as_explicit()
        } else {
            self.as_implicit(kind)
        }
    }

    /// The base this tag has when read as EXPLICIT.
    pub fn explicit_base(&self) -> Option<&Asn1Object> {
        match self.base() {
            base if self.explicit => Some(base),
            Asn1Object::Sequence(elements) => match elements.as_slice() {
                [single] => Some(single),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether [`TaggedObject::as_implicit`] succeeds for `kind`, without
    /// copying the content.
    pub fn fits_implicit(&self, kind: Asn1Kind) -> bool {
        match (self.explicit, self.base(), kind) {
            (false, base, kind) if base.kind() == kind => true,
            (true, _, Asn1Kind::Sequence | Asn1Kind::Set) => true,
            (false, Asn1Object::Sequence(_), Asn1Kind::Set) => true,
            (false, Asn1Object::OctetString(octets), kind) => kind
                .universal_number()
                .and_then(|number| Asn1Object::primitive(number, octets.as_bytes()))
                .is_some(),
            _ => false,
        }
    }

    /// The same tag read as EXPLICIT.
    pub fn as_explicit(&self) -> Option<Self> {
        let base = self.explicit_base()?.clone();
        Some(Self::new(self.class, self.number, true, base))
    }

    /// The same tag read as IMPLICIT `kind`.
    ///
    /// Primitive content is decoded again as `kind`, constructed content
    /// only converts between SEQUENCE and SET.
    pub fn as_implicit(&self, kind: Asn1Kind) -> Option<Self> {
        let base = match (self.explicit, self.base(), kind) {
            (false, base, kind) if base.kind() == kind => return Some(self.clone()),
            (true, base, Asn1Kind::Sequence) => Asn1Object::Sequence(vec![base.clone()]),
            (true, base, Asn1Kind::Set) => Asn1Object::Set(vec![base.clone()]),
            (false, Asn1Object::Sequence(elements), Asn1Kind::Set) => {
                Asn1Object::Set(elements.clone())
            }
            (false, Asn1Object::OctetString(octets), kind) => {
                Asn1Object::primitive(kind.universal_number()?, octets.as_bytes())?
            }
            _ => return None,
        };
        Some(Self::new(self.class, self.number, false, base))
    }

    /// Rebuilds the chain with `old` substituted by `new`.
    ///
    /// `old` is compared by identity and must be the base of a tag in this
    /// chain. Returns `None` when it is not; `self` is never modified.
    pub fn replace(&self, old: &Asn1Object, new: Asn1Object) -> Option<Self> {
        let base = if ptr::eq(self.base(), old) {
            new
        } else {
            match self.base() {
                Asn1Object::Tagged(inner) => Asn1Object::Tagged(inner.replace(old, new)?),
                _ => return None,
            }
        };
        Some(Self::new(self.class, self.number, self.explicit, base))
    }
}

/// `[<number>]`, the class unless context-specific, and the tagging mode.
impl Display for TaggedObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.number)?;
        match self.class {
            Class::Application => f.write_str(" APPLICATION")?,
            Class::Private => f.write_str(" PRIVATE")?,
            Class::ContextSpecific => {}
        }
        f.write_str(if self.explicit {
            " EXPLICIT"
        } else {
            " IMPLICIT"
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, anyhow::Result, hex_literal::hex};

    fn decode_tagged(input: &[u8]) -> Result<TaggedObject> {
        match Asn1Object::decode(&BerCodec::default(), input)? {
            Asn1Object::Tagged(tagged) => Ok(tagged),
            other => anyhow::bail!("expected a tagged object, got {}", other.kind()),
        }
    }

    #[test]
    fn test_tag_strings() {
        let nested = TaggedObject::context(
            0,
            true,
            Asn1Object::Tagged(TaggedObject::context(
                1,
                false,
                Asn1Object::Sequence(vec![]),
            )),
        );
        assert_eq!(nested.to_string(), "[0] EXPLICIT");
        assert_eq!(nested.type_string(), "[0] EXPLICIT [1] IMPLICIT SEQUENCE");

        let application = TaggedObject::new(Class::Application, 7, false, Asn1Object::Null);
        assert_eq!(application.type_string(), "[7] APPLICATION IMPLICIT NULL");
        let private = TaggedObject::new(Class::Private, 2, true, Asn1Object::Null);
        assert_eq!(private.to_string(), "[2] PRIVATE EXPLICIT");
    }

    #[test]
    fn test_inferred_tagging() -> Result<()> {
        // [0] { INTEGER 5 } reads as EXPLICIT INTEGER.
        let tagged = decode_tagged(&hex!("a003 020105"))?;
        assert!(tagged.is_explicit());
        assert_eq!(tagged.base().integer(), Some(5));

        // [1] { INTEGER 5, INTEGER 6 } reads as IMPLICIT SEQUENCE.
        let tagged = decode_tagged(&hex!("a106 020105 020106"))?;
        assert!(!tagged.is_explicit());
        assert_eq!(tagged.base().kind(), Asn1Kind::Sequence);

        // Primitive [2] reads as IMPLICIT OCTET STRING.
        let tagged = decode_tagged(&hex!("8201 14"))?;
        assert_eq!(tagged.type_string(), "[2] IMPLICIT OCTET STRING");
        Ok(())
    }

    #[test]
    fn test_reinterpret() -> Result<()> {
        // An IMPLICIT SEQUENCE of one INTEGER is mistaken for EXPLICIT.
        let tagged = decode_tagged(&hex!("a003 020105"))?;
        let implicit = tagged
            .as_implicit(Asn1Kind::Sequence)
            .ok_or_else(|| anyhow::anyhow!("reinterpretation failed"))?;
        assert_eq!(implicit.type_string(), "[0] IMPLICIT SEQUENCE");
        let explicit = implicit
            .as_explicit()
            .ok_or_else(|| anyhow::anyhow!("reinterpretation failed"))?;
        assert_eq!(explicit, tagged);

        // Primitive content decoded again under the schema type.
        let tagged = decode_tagged(&hex!("8203 0780 00"))?;
        let bits = tagged
            .as_implicit(Asn1Kind::BitString)
            .ok_or_else(|| anyhow::anyhow!("reinterpretation failed"))?;
        assert_eq!(bits.type_string(), "[2] IMPLICIT BIT STRING");
        assert!(tagged.as_implicit(Asn1Kind::Boolean).is_none());
        assert!(tagged.as_explicit().is_none());
        Ok(())
    }

    #[test]
    fn test_fits_without_copy() -> Result<()> {
        let cases: [(&[u8], Asn1Kind); 6] = [
            (&hex!("a003 020105"), Asn1Kind::Sequence),
            (&hex!("a003 020105"), Asn1Kind::Integer),
            (&hex!("a106 020105 020106"), Asn1Kind::Set),
            (&hex!("8203 078000"), Asn1Kind::BitString),
            (&hex!("8203 078000"), Asn1Kind::Boolean),
            (&hex!("8201 ff"), Asn1Kind::Boolean),
        ];
        for (input, kind) in cases {
            let tagged = decode_tagged(input)?;
            assert_eq!(
                tagged.fits_implicit(kind),
                tagged.as_implicit(kind).is_some(),
                "{} as {kind}",
                tagged.type_string()
            );
            assert_eq!(
                tagged.explicit_base(),
                tagged.as_explicit().as_ref().map(TaggedObject::base)
            );
        }
        Ok(())
    }

    #[test]
    fn test_replace() {
        let chain = TaggedObject::context(
            0,
            true,
            Asn1Object::Tagged(TaggedObject::context(1, true, Asn1Object::Null)),
        );
        let inner = chain.level(1).map(TaggedObject::base);
        let Some(inner) = inner else {
            panic!("chain has two levels");
        };
        let replaced = chain.replace(inner, Asn1Object::Boolean(true));
        assert_eq!(
            replaced.map(|tagged| tagged.type_string()).as_deref(),
            Some("[0] EXPLICIT [1] EXPLICIT BOOLEAN")
        );

        // An equal value that is not part of the chain is not a match.
        let foreign = Asn1Object::Null;
        assert!(chain.replace(&foreign, Asn1Object::Boolean(true)).is_none());
        assert_eq!(chain.type_string(), "[0] EXPLICIT [1] EXPLICIT NULL");
    }
}
