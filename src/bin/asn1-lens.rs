//! Prints the annotated tree of a DER file.
//!
//! ```sh
//! RUST_LOG=debug asn1-lens --oid 1.2.840.113583.1.1.8 revocation.der
//! ```
use {
    anyhow::{anyhow, Context, Result},
    argh::FromArgs,
    asn1_lens::{
        correct::{self, Corrector},
        node::Asn1Node,
        BerCodec,
    },
    der::asn1::ObjectIdentifier as Oid,
    std::{
        fs,
        io::{self, BufWriter, Write},
        path::PathBuf,
    },
    tracing::info,
    tracing_subscriber::EnvFilter,
};

#[derive(FromArgs)]
/// Decode a BER/DER value and annotate it with schema field names.
struct Args {
    /// input file, binary unless --hex is given
    #[argh(positional)]
    input: PathBuf,

    /// input is hex text, whitespace is ignored
    #[argh(switch)]
    hex: bool,

    /// object identifier whose registered corrector annotates the root
    #[argh(option)]
    oid: Option<String>,

    /// annotate the root as an X.509 certificate
    #[argh(switch)]
    certificate: bool,

    /// print an indented tree instead of JSON
    #[argh(switch)]
    tree: bool,

    /// reject non-DER length encodings and trailing data
    #[argh(switch)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args: Args = argh::from_env();

    let raw = fs::read(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let bytes = if args.hex {
        let text = String::from_utf8(raw).context("Hex input is not text")?;
        let digits: String = text.split_whitespace().collect();
        hex::decode(digits).context("Decoding hex input")?
    } else {
        raw
    };
    info!("Read {} bytes", bytes.len());

    let codec = if args.strict {
        BerCodec::strict()
    } else {
        BerCodec::default()
    };
    let mut node = Asn1Node::from_bytes_with(&codec, &bytes)
        .ok_or_else(|| anyhow!("No ASN.1 value in {}", args.input.display()))?;

    if args.certificate {
        correct::CertificateCorrector.correct(&mut node);
    }
    if let Some(oid) = &args.oid {
        let oid = Oid::new(oid).map_err(|err| anyhow!("Invalid object identifier {oid}: {err}"))?;
        if !correct::apply(&oid, &mut node) {
            info!("No corrector registered for {oid}");
        }
    }

    let mut out = BufWriter::new(io::stdout().lock());
    if args.tree {
        print_tree(&mut out, &node, 0)?;
    } else {
        node.write_display_json(&mut out)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn print_tree<W: Write>(out: &mut W, node: &Asn1Node, depth: usize) -> io::Result<()> {
    writeln!(out, "{:indent$}{node}", "", indent = depth * 2)?;
    for child in node.children() {
        print_tree(out, child, depth + 1)?;
    }
    Ok(())
}
