//! Serialization of nodes back to BER.
//!
//! Leaves write the content octets they were decoded from, and constructed
//! nodes keep their framing, so decoding and re-encoding a value reproduces
//! the input whenever its length fields were minimal.

use std::convert::Infallible;

use ber::{Length, write_header};
use tsuzuri::encoder::{EncodableTo, Encoder};

use crate::tagging::Tagging;
use crate::{ASN1Object, Element, Framing};

impl Element {
    pub fn to_ber(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_ber(&mut out);
        out
    }

    fn write_ber(&self, out: &mut Vec<u8>) {
        let contents = self.contents();
        match self.framing() {
            Framing::Definite => {
                write_header(out, self.tag(), Length::Definite(contents.len()));
                out.extend_from_slice(&contents);
            }
            Framing::Indefinite => {
                write_header(out, self.tag(), Length::Indefinite);
                out.extend_from_slice(&contents);
                out.extend_from_slice(&[0x00, 0x00]);
            }
        }
    }

    fn contents(&self) -> Vec<u8> {
        match self {
            Element::Boolean(b) => vec![b.octet()],
            Element::Integer(i) | Element::Enumerated(i) => i.as_bytes().to_vec(),
            Element::ObjectIdentifier(oid) => oid.as_bytes().to_vec(),
            Element::BitString(bs) => {
                let mut contents = Vec::with_capacity(bs.as_bytes().len() + 1);
                contents.push(bs.unused_bits());
                contents.extend_from_slice(bs.as_bytes());
                contents
            }
            Element::OctetString(os) => os.as_bytes().to_vec(),
            Element::Null => Vec::new(),
            Element::UTF8String(s) => s.as_bytes().to_vec(),
            Element::PrintableString(s) => s.as_bytes().to_vec(),
            Element::IA5String(s) => s.as_bytes().to_vec(),
            Element::T61String(s) => s.as_bytes().to_vec(),
            Element::VisibleString(s) => s.as_bytes().to_vec(),
            Element::UniversalString(s) => s.as_bytes().to_vec(),
            Element::BMPString(s) => s.as_bytes().to_vec(),
            Element::UTCTime(t) => t.as_bytes().to_vec(),
            Element::GeneralizedTime(t) => t.as_bytes().to_vec(),
            Element::Sequence { elements, .. } | Element::Set { elements, .. } => {
                concat(elements)
            }
            Element::ConstructedOctetString(os) => concat(os.chunks()),
            Element::Tagged(tagged) => match (tagged.tagging(), tagged.inner()) {
                (_, None) => Vec::new(),
                (Tagging::Explicit, Some(inner)) => inner.to_ber(),
                // the context tag replaces the inner tag, so only the inner contents remain
                (Tagging::Implicit, Some(inner)) => inner.contents(),
            },
            Element::Unknown(unknown) => unknown.contents().to_vec(),
        }
    }
}

fn concat(elements: &[Element]) -> Vec<u8> {
    let mut out = Vec::new();
    for element in elements {
        element.write_ber(&mut out);
    }
    out
}

impl EncodableTo<Element> for Vec<u8> {}

impl Encoder<Element, Vec<u8>> for Element {
    type Error = Infallible;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.to_ber())
    }
}

impl EncodableTo<ASN1Object> for Vec<u8> {}

impl Encoder<ASN1Object, Vec<u8>> for ASN1Object {
    type Error = Infallible;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(concat(self.elements()))
    }
}
