//! X.690 section 8.1 identifier and length octets.
use {
    super::{Identifier, Length, TagClass},
    anyhow::{anyhow, ensure, Result},
    bytes::Buf,
    tracing::warn,
};

/// How to handle correctable irregularities when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leniency {
    /// Correct errors
    Allow,

    /// Correct, but log a warning.
    Warn,

    /// Be strict and return an error.
    Strict,
}

/// Reader for BER framed input.
///
/// PDF signature blobs come from many producers. Most are DER, but BER
/// indefinite lengths and padding after the value are common enough that the
/// defaults accept them.
#[derive(Clone, Copy, Debug)]
pub struct BerCodec {
    /// Non-canonical length encoding.
    pub non_minimal_length: Leniency,

    /// Indefinite length constructed values.
    pub indefinite_length: Leniency,

    /// Bytes following the first complete value.
    pub trailing_data: Leniency,

    /// Maximum nesting of constructed values.
    pub max_depth: usize,
}

/// One framed value borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub identifier: Identifier,
    pub content:    &'a [u8],
}

/// Default behaviour is to warn on sloppy lengths and accept the rest.
impl Default for BerCodec {
    fn default() -> Self {
        Self {
            non_minimal_length: Leniency::Warn,
            indefinite_length:  Leniency::Allow,
            trailing_data:      Leniency::Allow,
            max_depth:          64,
        }
    }
}

fn lenient(leniency: Leniency, msg: &'static str) -> Result<()> {
    match leniency {
        Leniency::Strict => Err(anyhow!(msg)),
        Leniency::Warn => {
            warn!("{msg}");
            Ok(())
        }
        Leniency::Allow => Ok(()),
    }
}

impl BerCodec {
    /// Only accepts canonical DER framing.
    pub const fn strict() -> Self {
        Self {
            non_minimal_length: Leniency::Strict,
            indefinite_length:  Leniency::Strict,
            trailing_data:      Leniency::Strict,
            max_depth:          64,
        }
    }

    pub fn read_identifier<B: Buf>(&self, buffer: &mut B) -> Result<Identifier> {
        ensure!(buffer.has_remaining(), "EOF when reading identifier");
        let first = buffer.get_u8();
        let class = TagClass::from_bits(first >> 6);
        let constructed = first & 0x20 != 0;
        let mut number = u32::from(first & 0x1f);
        if number == 0x1f {
            // High tag number form, base 128 with continuation bit.
            number = 0;
            loop {
                ensure!(buffer.has_remaining(), "EOF when reading tag number");
                let byte = buffer.get_u8();
                ensure!(number < 1 << 25, "Tag number too large");
                number = (number << 7) | u32::from(byte & 0x7f);
                if byte & 0x80 == 0 {
                    break;
                }
            }
        }
        Ok(Identifier {
            class,
            constructed,
            number,
        })
    }

    pub fn read_length<B: Buf>(&self, buffer: &mut B) -> Result<Length> {
        ensure!(buffer.has_remaining(), "EOF when reading length");
        let first = buffer.get_u8();
        if first < 128 {
            return Ok(Length::Definite(first as usize));
        }
        const BYTES: usize = usize::BITS as usize / 8;
        let len = (first & 0x7f) as usize;
        if len == 0 {
            lenient(self.indefinite_length, "Indefinite length encoding.")?;
            return Ok(Length::Indefinite);
        }
        ensure!(len != 127, "Reserved length not supported");
        ensure!(len <= BYTES, "Length too large");
        ensure!(buffer.remaining() >= len, "EOF when reading long length");
        let mut bytes = [0; BYTES];
        let trim = BYTES - len;
        buffer.copy_to_slice(&mut bytes[trim..]);
        if bytes[trim] == 0 || (len == 1 && bytes[trim] < 0x80) {
            lenient(self.non_minimal_length, "Length encoding is non-canonical.")?;
        }
        Ok(Length::Definite(usize::from_be_bytes(bytes)))
    }

    /// Reads one value and advances `buffer` past it.
    ///
    /// For indefinite lengths the returned content excludes the
    /// end-of-contents marker.
    pub fn read_tlv<'a>(&self, buffer: &mut &'a [u8], depth: usize) -> Result<Tlv<'a>> {
        ensure!(
            depth <= self.max_depth,
            "Nesting deeper than {} levels",
            self.max_depth
        );
        let identifier = self.read_identifier(buffer)?;
        let length = self.read_length(buffer)?;
        let input: &'a [u8] = *buffer;
        match length {
            Length::Definite(len) => {
                ensure!(input.len() >= len, "Content runs past end of input");
                let (content, rest) = input.split_at(len);
                *buffer = rest;
                Ok(Tlv {
                    identifier,
                    content,
                })
            }
            Length::Indefinite => {
                ensure!(
                    identifier.constructed,
                    "Indefinite length on primitive value"
                );
                let mut cursor = input;
                loop {
                    ensure!(cursor.len() >= 2, "EOF before end-of-contents");
                    if cursor[..2] == [0, 0] {
                        break;
                    }
                    self.read_tlv(&mut cursor, depth + 1)?;
                }
                let content = &input[..input.len() - cursor.len()];
                *buffer = &cursor[2..];
                Ok(Tlv {
                    identifier,
                    content,
                })
            }
        }
    }

    /// Reads the single leading value of `input`.
    pub fn read_first<'a>(&self, input: &'a [u8]) -> Result<Tlv<'a>> {
        let mut buffer = input;
        let tlv = self.read_tlv(&mut buffer, 0)?;
        if !buffer.is_empty() {
            lenient(self.trailing_data, "Trailing data after value.")?;
        }
        Ok(tlv)
    }

    /// Splits the content of a constructed value into its elements.
    pub fn read_elements<'a>(&self, content: &'a [u8], depth: usize) -> Result<Vec<Tlv<'a>>> {
        let mut buffer = content;
        let mut elements = Vec::new();
        while !buffer.is_empty() {
            let tlv = self.read_tlv(&mut buffer, depth)?;
            ensure!(
                !tlv.identifier.is_end_of_contents(),
                "Unexpected end-of-contents"
            );
            elements.push(tlv);
        }
        Ok(elements)
    }
}
