//! Object identifiers the correctors dispatch on.
use der::asn1::ObjectIdentifier as Oid;

// RFC 4055
pub const ID_RSASSA_PSS: Oid = Oid::new_unwrap("1.2.840.113549.1.1.10");
pub const ID_MGF1: Oid = Oid::new_unwrap("1.2.840.113549.1.1.8");

// Adobe Acrobat security
pub const ADBE_REVOCATION_INFO_ARCHIVAL: Oid = Oid::new_unwrap("1.2.840.113583.1.1.8");

// RFC 5280 certificate extensions
pub const ID_CE_KEY_USAGE: Oid = Oid::new_unwrap("2.5.29.15");
pub const ID_CE_BASIC_CONSTRAINTS: Oid = Oid::new_unwrap("2.5.29.19");
pub const ID_CE_CRL_REASONS: Oid = Oid::new_unwrap("2.5.29.21");
pub const ID_CE_CRL_DISTRIBUTION_POINTS: Oid = Oid::new_unwrap("2.5.29.31");
pub const ID_CE_CERTIFICATE_POLICIES: Oid = Oid::new_unwrap("2.5.29.32");
pub const ID_CE_EXT_KEY_USAGE: Oid = Oid::new_unwrap("2.5.29.37");
pub const ID_CE_FRESHEST_CRL: Oid = Oid::new_unwrap("2.5.29.46");

// PKIX
pub const ID_PE_AUTHORITY_INFO_ACCESS: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.1.1");
pub const ID_QT_CPS: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.2.1");
pub const ID_QT_UNOTICE: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.2.2");
pub const ID_PKIX_OCSP_BASIC: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.48.1.1");
pub const ID_PKIX_OCSP_NOCHECK: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.48.1.5");

// Netscape
pub const NETSCAPE_CERT_TYPE: Oid = Oid::new_unwrap("2.16.840.1.113730.1.1");
