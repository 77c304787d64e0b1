//! Object identifier names.
//!
//! [`resolve`] turns a dotted OID into a path of registry arc names, e.g.
//! `1.2.840.113549.1.1.10` becomes
//! `/iso/member-body/us/rsadsi/pkcs/pkcs-1/id-RSASSA-PSS`. The arc table
//! only covers registries reachable from PDF signatures; the first arc it
//! does not know and everything after it are passed through as numbers.

pub mod known;

use {
    der::asn1::ObjectIdentifier as Oid,
    std::{collections::BTreeMap, sync::OnceLock},
    tracing::warn,
};

/// Registry arcs as `(dotted path, local name)`, parents before children.
const ARCS: &[(&str, &str)] = &[
    ("0", "itu-t"),
    ("0.4", "identified-organization"),
    ("0.4.0", "etsi"),
    ("0.4.0.1862", "qc-profile"),
    ("0.4.0.1862.1", "qcs"),
    ("0.4.0.1862.1.1", "qcs-QcCompliance"),
    ("0.4.0.1862.1.3", "qcs-QcRetentionPeriod"),
    ("0.4.0.1862.1.4", "qcs-QcSSCD"),
    ("0.4.0.1862.1.5", "qcs-QcPDS"),
    ("0.4.0.1862.1.6", "qcs-QcType"),
    ("0.4.0.194121", "semantics-identifiers"),
    ("0.4.0.194121.1", "id-etsi-qcs-semanticsId"),
    ("0.4.0.194121.1.1", "id-etsi-qcs-semanticsId-Natural"),
    ("0.4.0.194121.1.2", "id-etsi-qcs-semanticsId-Legal"),
    ("0.9", "data"),
    ("0.9.2342", "pss"),
    ("0.9.2342.19200300", "ucl"),
    ("0.9.2342.19200300.100", "pilot"),
    ("0.9.2342.19200300.100.1", "pilotAttributeType"),
    ("0.9.2342.19200300.100.1.1", "uid"),
    ("0.9.2342.19200300.100.1.25", "domainComponent"),
    ("1", "iso"),
    ("1.2", "member-body"),
    ("1.2.840", "us"),
    ("1.2.840.10040", "x9-57"),
    ("1.2.840.10040.4", "x9algorithm"),
    ("1.2.840.10040.4.1", "dsa"),
    ("1.2.840.10040.4.3", "dsa-with-sha1"),
    ("1.2.840.10045", "ansi-x962"),
    ("1.2.840.10045.1", "fieldType"),
    ("1.2.840.10045.1.1", "prime-field"),
    ("1.2.840.10045.1.2", "characteristic-two-field"),
    ("1.2.840.10045.2", "keyType"),
    ("1.2.840.10045.2.1", "ecPublicKey"),
    ("1.2.840.10045.3", "curves"),
    ("1.2.840.10045.3.1", "prime"),
    ("1.2.840.10045.3.1.1", "prime192v1"),
    ("1.2.840.10045.3.1.2", "prime192v2"),
    ("1.2.840.10045.3.1.3", "prime192v3"),
    ("1.2.840.10045.3.1.4", "prime239v1"),
    ("1.2.840.10045.3.1.5", "prime239v2"),
    ("1.2.840.10045.3.1.6", "prime239v3"),
    ("1.2.840.10045.3.1.7", "prime256v1"),
    ("1.2.840.10045.4", "signatures"),
    ("1.2.840.10045.4.1", "ecdsa-with-SHA1"),
    ("1.2.840.10045.4.3", "ecdsa-with-SHA2"),
    ("1.2.840.10045.4.3.1", "ecdsa-with-SHA224"),
    ("1.2.840.10045.4.3.2", "ecdsa-with-SHA256"),
    ("1.2.840.10045.4.3.3", "ecdsa-with-SHA384"),
    ("1.2.840.10045.4.3.4", "ecdsa-with-SHA512"),
    ("1.2.840.113549", "rsadsi"),
    ("1.2.840.113549.1", "pkcs"),
    ("1.2.840.113549.1.1", "pkcs-1"),
    ("1.2.840.113549.1.1.1", "rsaEncryption"),
    ("1.2.840.113549.1.1.2", "md2WithRSAEncryption"),
    ("1.2.840.113549.1.1.4", "md5WithRSAEncryption"),
    ("1.2.840.113549.1.1.5", "sha1WithRSAEncryption"),
    ("1.2.840.113549.1.1.7", "id-RSAES-OAEP"),
    ("1.2.840.113549.1.1.8", "id-mgf1"),
    ("1.2.840.113549.1.1.9", "id-pSpecified"),
    ("1.2.840.113549.1.1.10", "id-RSASSA-PSS"),
    ("1.2.840.113549.1.1.11", "sha256WithRSAEncryption"),
    ("1.2.840.113549.1.1.12", "sha384WithRSAEncryption"),
    ("1.2.840.113549.1.1.13", "sha512WithRSAEncryption"),
    ("1.2.840.113549.1.1.14", "sha224WithRSAEncryption"),
    ("1.2.840.113549.1.7", "pkcs-7"),
    ("1.2.840.113549.1.7.1", "data"),
    ("1.2.840.113549.1.7.2", "signedData"),
    ("1.2.840.113549.1.7.3", "envelopedData"),
    ("1.2.840.113549.1.7.5", "digestedData"),
    ("1.2.840.113549.1.7.6", "encryptedData"),
    ("1.2.840.113549.1.9", "pkcs-9"),
    ("1.2.840.113549.1.9.1", "emailAddress"),
    ("1.2.840.113549.1.9.3", "contentType"),
    ("1.2.840.113549.1.9.4", "messageDigest"),
    ("1.2.840.113549.1.9.5", "signingTime"),
    ("1.2.840.113549.1.9.6", "countersignature"),
    ("1.2.840.113549.1.9.14", "extensionRequest"),
    ("1.2.840.113549.1.9.15", "smimeCapabilities"),
    ("1.2.840.113549.1.9.16", "smime"),
    ("1.2.840.113549.1.9.16.1", "ct"),
    ("1.2.840.113549.1.9.16.1.4", "id-ct-TSTInfo"),
    ("1.2.840.113549.1.9.16.2", "aa"),
    ("1.2.840.113549.1.9.16.2.12", "id-aa-signingCertificate"),
    ("1.2.840.113549.1.9.16.2.14", "id-aa-timeStampToken"),
    ("1.2.840.113549.1.9.16.2.47", "id-aa-signingCertificateV2"),
    ("1.2.840.113549.1.9.52", "id-aa-CMSAlgorithmProtection"),
    ("1.2.840.113549.2", "digestAlgorithm"),
    ("1.2.840.113549.2.5", "md5"),
    ("1.2.840.113549.2.7", "hmacWithSHA1"),
    ("1.2.840.113549.2.9", "hmacWithSHA256"),
    ("1.2.840.113549.3", "encryptionAlgorithm"),
    ("1.2.840.113549.3.7", "des-ede3-cbc"),
    ("1.2.840.113583", "adobe"),
    ("1.2.840.113583.1", "acrobat"),
    ("1.2.840.113583.1.1", "security"),
    ("1.2.840.113583.1.1.8", "revocationInfoArchival"),
    ("1.2.840.113583.1.1.9", "x509-extensions"),
    ("1.2.840.113583.1.1.9.1", "timestamp"),
    ("1.2.840.113583.1.1.9.2", "archiveRevInfo"),
    ("1.3", "identified-organization"),
    ("1.3.6", "dod"),
    ("1.3.6.1", "internet"),
    ("1.3.6.1.4", "private"),
    ("1.3.6.1.4.1", "enterprise"),
    ("1.3.6.1.4.1.311", "microsoft"),
    ("1.3.6.1.5", "security"),
    ("1.3.6.1.5.5", "mechanisms"),
    ("1.3.6.1.5.5.7", "pkix"),
    ("1.3.6.1.5.5.7.1", "pe"),
    ("1.3.6.1.5.5.7.1.1", "authorityInfoAccess"),
    ("1.3.6.1.5.5.7.1.3", "qcStatements"),
    ("1.3.6.1.5.5.7.1.11", "subjectInfoAccess"),
    ("1.3.6.1.5.5.7.2", "qt"),
    ("1.3.6.1.5.5.7.2.1", "cps"),
    ("1.3.6.1.5.5.7.2.2", "unotice"),
    ("1.3.6.1.5.5.7.3", "kp"),
    ("1.3.6.1.5.5.7.3.1", "serverAuth"),
    ("1.3.6.1.5.5.7.3.2", "clientAuth"),
    ("1.3.6.1.5.5.7.3.3", "codeSigning"),
    ("1.3.6.1.5.5.7.3.4", "emailProtection"),
    ("1.3.6.1.5.5.7.3.8", "timeStamping"),
    ("1.3.6.1.5.5.7.3.9", "OCSPSigning"),
    ("1.3.6.1.5.5.7.11", "qcs"),
    ("1.3.6.1.5.5.7.11.2", "id-qcs-pkixQCSyntax-v2"),
    ("1.3.6.1.5.5.7.48", "ad"),
    ("1.3.6.1.5.5.7.48.1", "ocsp"),
    ("1.3.6.1.5.5.7.48.1.1", "basic"),
    ("1.3.6.1.5.5.7.48.1.2", "nonce"),
    ("1.3.6.1.5.5.7.48.1.3", "crl"),
    ("1.3.6.1.5.5.7.48.1.5", "nocheck"),
    ("1.3.6.1.5.5.7.48.2", "caIssuers"),
    ("1.3.6.1.5.5.7.48.3", "timeStamping"),
    ("1.3.6.1.5.5.7.48.5", "caRepository"),
    ("1.3.14", "oiw"),
    ("1.3.14.3", "secsig"),
    ("1.3.14.3.2", "algorithms"),
    ("1.3.14.3.2.26", "sha1"),
    ("1.3.14.3.2.29", "sha1WithRSASignature"),
    ("1.3.36", "teletrust"),
    ("1.3.36.3", "algorithm"),
    ("1.3.36.3.3", "signatureAlgorithm"),
    ("1.3.36.3.3.2", "ecSign"),
    ("1.3.36.3.3.2.8", "ecStdCurvesAndGeneration"),
    ("1.3.36.3.3.2.8.1", "ellipticCurve"),
    ("1.3.36.3.3.2.8.1.1", "versionOne"),
    ("1.3.36.3.3.2.8.1.1.7", "brainpoolP256r1"),
    ("1.3.36.3.3.2.8.1.1.11", "brainpoolP384r1"),
    ("1.3.36.3.3.2.8.1.1.13", "brainpoolP512r1"),
    ("1.3.101", "thawte"),
    ("1.3.101.110", "X25519"),
    ("1.3.101.111", "X448"),
    ("1.3.101.112", "Ed25519"),
    ("1.3.101.113", "Ed448"),
    ("1.3.132", "certicom"),
    ("1.3.132.0", "curve"),
    ("1.3.132.0.10", "secp256k1"),
    ("1.3.132.0.34", "secp384r1"),
    ("1.3.132.0.35", "secp521r1"),
    ("2", "joint-iso-itu-t"),
    ("2.5", "ds"),
    ("2.5.4", "attributeType"),
    ("2.5.4.3", "commonName"),
    ("2.5.4.4", "surname"),
    ("2.5.4.5", "serialNumber"),
    ("2.5.4.6", "countryName"),
    ("2.5.4.7", "localityName"),
    ("2.5.4.8", "stateOrProvinceName"),
    ("2.5.4.9", "streetAddress"),
    ("2.5.4.10", "organizationName"),
    ("2.5.4.11", "organizationalUnitName"),
    ("2.5.4.12", "title"),
    ("2.5.4.42", "givenName"),
    ("2.5.4.43", "initials"),
    ("2.5.4.46", "dnQualifier"),
    ("2.5.4.65", "pseudonym"),
    ("2.5.4.97", "organizationIdentifier"),
    ("2.5.29", "certificateExtension"),
    ("2.5.29.14", "subjectKeyIdentifier"),
    ("2.5.29.15", "keyUsage"),
    ("2.5.29.16", "privateKeyUsagePeriod"),
    ("2.5.29.17", "subjectAltName"),
    ("2.5.29.18", "issuerAltName"),
    ("2.5.29.19", "basicConstraints"),
    ("2.5.29.20", "cRLNumber"),
    ("2.5.29.21", "reasonCode"),
    ("2.5.29.24", "invalidityDate"),
    ("2.5.29.27", "deltaCRLIndicator"),
    ("2.5.29.28", "issuingDistributionPoint"),
    ("2.5.29.29", "certificateIssuer"),
    ("2.5.29.30", "nameConstraints"),
    ("2.5.29.31", "cRLDistributionPoints"),
    ("2.5.29.32", "certificatePolicies"),
    ("2.5.29.32.0", "anyPolicy"),
    ("2.5.29.33", "policyMappings"),
    ("2.5.29.35", "authorityKeyIdentifier"),
    ("2.5.29.36", "policyConstraints"),
    ("2.5.29.37", "extKeyUsage"),
    ("2.5.29.37.0", "anyExtendedKeyUsage"),
    ("2.5.29.46", "freshestCRL"),
    ("2.5.29.54", "inhibitAnyPolicy"),
    ("2.16", "country"),
    ("2.16.840", "us"),
    ("2.16.840.1", "organization"),
    ("2.16.840.1.101", "gov"),
    ("2.16.840.1.101.3", "csor"),
    ("2.16.840.1.101.3.4", "nistAlgorithm"),
    ("2.16.840.1.101.3.4.1", "aes"),
    ("2.16.840.1.101.3.4.1.2", "aes128-CBC"),
    ("2.16.840.1.101.3.4.1.22", "aes192-CBC"),
    ("2.16.840.1.101.3.4.1.42", "aes256-CBC"),
    ("2.16.840.1.101.3.4.2", "hashAlgs"),
    ("2.16.840.1.101.3.4.2.1", "sha256"),
    ("2.16.840.1.101.3.4.2.2", "sha384"),
    ("2.16.840.1.101.3.4.2.3", "sha512"),
    ("2.16.840.1.101.3.4.2.4", "sha224"),
    ("2.16.840.1.101.3.4.2.8", "sha3-256"),
    ("2.16.840.1.101.3.4.2.9", "sha3-384"),
    ("2.16.840.1.101.3.4.2.10", "sha3-512"),
    ("2.16.840.1.101.3.4.3", "sigAlgs"),
    ("2.16.840.1.101.3.4.3.2", "id-dsa-with-sha256"),
    ("2.16.840.1.101.3.4.3.10", "id-ecdsa-with-sha3-256"),
    ("2.16.840.1.101.3.4.3.14", "id-rsassa-pkcs1-v1_5-with-sha3-256"),
    ("2.16.840.1.113730", "netscape"),
    ("2.16.840.1.113730.1", "cert-extension"),
    ("2.16.840.1.113730.1.1", "cert-type"),
    ("2.16.840.1.113730.1.13", "comment"),
    ("2.23", "international-organizations"),
    ("2.23.140", "ca-browser-forum"),
    ("2.23.140.1", "certificate-policies"),
    ("2.23.140.1.1", "ev-guidelines"),
    ("2.23.140.1.2", "baseline-requirements"),
    ("2.23.140.1.2.1", "domain-validated"),
    ("2.23.140.1.2.2", "organization-validated"),
];

/// One registry arc and the arcs below it.
#[derive(Debug, Default)]
struct Arc {
    name:     &'static str,
    children: BTreeMap<&'static str, Arc>,
}

fn root() -> &'static Arc {
    static ROOT: OnceLock<Arc> = OnceLock::new();
    ROOT.get_or_init(|| {
        let mut root = Arc::default();
        for &(path, name) in ARCS {
            let mut node = &mut root;
            for number in path.split('.') {
                node = node.children.entry(number).or_insert_with(|| Arc {
                    name: number,
                    ..Arc::default()
                });
            }
            node.name = name;
        }
        root
    })
}

/// Arc names of a dotted OID, e.g. `/iso/member-body/us/ansi-x962`.
///
/// Arcs from the first unknown one on are copied as numbers, in which case a
/// single warning is logged.
pub fn resolve(oid: &str) -> String {
    let mut path = String::with_capacity(oid.len() * 4);
    let mut node = Some(root());
    for number in oid.split('.') {
        path.push('/');
        match node.and_then(|arc| arc.children.get(number)) {
            Some(child) => {
                path.push_str(child.name);
                node = Some(child);
            }
            None => {
                path.push_str(number);
                node = None;
            }
        }
    }
    if node.is_none() {
        warn!("Unknown object identifier arc in {oid}");
    }
    path
}

/// Local name of the final arc, if every arc of `oid` is known.
pub fn name(oid: &str) -> Option<&'static str> {
    oid.split('.')
        .try_fold(root(), |arc, number| arc.children.get(number))
        .map(|arc| arc.name)
}

/// Short human readable name for explanations.
pub fn explain(oid: &Oid) -> String {
    let dotted = oid.to_string();
    name(&dotted)
        .or_else(|| const_oid::db::DB.by_oid(oid))
        .map_or_else(|| resolve(&dotted), str::to_owned)
}
