//! Schema driven annotation of decoded trees.
//!
//! A [`Corrector`] knows one production of an RFC grammar. Applied to a node
//! it names the node and its descendants after the production's fields,
//! explains values such as object identifiers, enumerations and defaults,
//! and turns tagged values into the types the grammar gives them.
//!
//! Correctors never fail. A node that does not have the expected shape is
//! left as it is, since certificates in the wild are often malformed or
//! written against a different version of a grammar. Applying a corrector
//! twice gives the same result as applying it once.

/// Declares a unit struct corrector backed by a schema value.
macro_rules! schema_corrector {
    ($(#[$meta:meta])* $name:ident, $oid:expr, $schema:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl $crate::correct::Corrector for $name {
            fn oid(&self) -> Option<der::asn1::ObjectIdentifier> {
                $oid
            }

            fn default_field_name(&self) -> &'static str {
                $crate::correct::Corrector::default_field_name(&$schema)
            }

            fn correct_as(&self, node: &mut $crate::node::Asn1Node, field_name: &str) {
                $crate::correct::Corrector::correct_as(&$schema, node, field_name);
            }
        }
    };
}

mod access;
mod algorithm;
mod certificate;
mod distribution_points;
mod extensions;
mod general_name;
mod key_usage;
mod ocsp;
mod policies;
mod revocation;
pub mod schema;

pub use self::{
    access::AuthorityInfoAccessCorrector,
    algorithm::{AlgorithmIdentifierCorrector, Mgf1Corrector, RsassaPssCorrector},
    certificate::{CertificateCorrector, NameCorrector},
    distribution_points::{
        CrlDistributionPointsCorrector, CrlReasonsCorrector, FreshestCrlCorrector,
    },
    extensions::{ExtensionCorrector, ExtensionsCorrector},
    general_name::{GeneralNameCorrector, GeneralNamesCorrector},
    key_usage::{
        BasicConstraintsCorrector, ExtendedKeyUsageCorrector, KeyUsageCorrector,
        NetscapeCertTypeCorrector,
    },
    ocsp::{BasicOcspResponseCorrector, OcspNoCheckCorrector, OcspResponseCorrector},
    policies::CertificatePoliciesCorrector,
    revocation::{CertificateListCorrector, ReasonCodeCorrector, RevocationInfoArchivalCorrector},
};
use {
    crate::node::Asn1Node,
    der::asn1::ObjectIdentifier as Oid,
    std::{collections::HashMap, sync::OnceLock},
    tracing::trace,
};

/// Annotates a node according to one schema production.
pub trait Corrector: Send + Sync {
    /// Object identifier the production is registered under, if any.
    fn oid(&self) -> Option<Oid> {
        None
    }

    fn default_field_name(&self) -> &'static str;

    /// Annotates `node`, naming it `field_name` when its shape matches.
    fn correct_as(&self, node: &mut Asn1Node, field_name: &str);

    fn correct(&self, node: &mut Asn1Node) {
        self.correct_as(node, self.default_field_name());
    }
}

/// Correctors for attributes, extensions and algorithm parameters.
const REGISTERED: &[&dyn Corrector] = &[
    &RsassaPssCorrector,
    &Mgf1Corrector,
    &RevocationInfoArchivalCorrector,
    &BasicOcspResponseCorrector,
    &OcspNoCheckCorrector,
    &CertificatePoliciesCorrector,
    &CrlDistributionPointsCorrector,
    &FreshestCrlCorrector,
    &ExtendedKeyUsageCorrector,
    &KeyUsageCorrector,
    &NetscapeCertTypeCorrector,
    &BasicConstraintsCorrector,
    &AuthorityInfoAccessCorrector,
    &ReasonCodeCorrector,
];

fn registry() -> &'static HashMap<Oid, &'static dyn Corrector> {
    static REGISTRY: OnceLock<HashMap<Oid, &'static dyn Corrector>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .filter_map(|&corrector| corrector.oid().map(|oid| (oid, corrector)))
            .collect()
    })
}

/// The corrector registered for `oid`.
pub fn lookup(oid: &Oid) -> Option<&'static dyn Corrector> {
    registry().get(oid).copied()
}

/// Applies the corrector registered for `oid`, returns whether there is one.
pub fn apply(oid: &Oid, node: &mut Asn1Node) -> bool {
    match lookup(oid) {
        Some(corrector) => {
            corrector.correct(node);
            true
        }
        None => {
            trace!("No corrector for {oid}");
            false
        }
    }
}

/// Like [`apply`], with the node named `field_name`.
pub fn apply_as(oid: &Oid, node: &mut Asn1Node, field_name: &str) -> bool {
    lookup(oid).map_or(false, |corrector| {
        corrector.correct_as(node, field_name);
        true
    })
}
