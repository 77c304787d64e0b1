//! Decode BER/DER ASN.1 found in PDF signatures into a browsable tree and
//! annotate it with field names from the RFC grammars.
//!
//! ```no_run
//! use asn1_lens::{correct::{self, Corrector}, node::Asn1Node};
//!
//! # fn main() -> asn1_lens::error::Result<()> {
//! let bytes = std::fs::read("signature.der")?;
//! if let Some(mut node) = Asn1Node::from_bytes(&bytes) {
//!     correct::CertificateCorrector.correct(&mut node);
//!     node.write_display_json(std::io::stdout())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod asn1;
pub mod ber;
pub mod correct;
pub mod error;
pub mod node;
pub mod oid;

pub use self::{
    asn1::{Asn1Kind, Asn1Object, TaggedObject},
    ber::BerCodec,
    correct::Corrector,
    error::{Error, Result},
    node::Asn1Node,
};
