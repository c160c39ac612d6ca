//! Conversion of attribute text into ASN.1 values.
//!
//! [`DefaultEntryConverter`] tries, in order:
//!
//! 1. `#` followed by hex digits: the octets are decoded as a BER value.
//! 2. the email address attribute: IA5String.
//! 3. PrintableString, when every character is in its repertoire.
//! 4. UTF8String, when every character is in the Basic Multilingual Plane.
//! 5. BMPString.

use asn1::{
    Asn1Reader, BmpString, Element, Ia5String, ObjectIdentifier, PrintableString, Utf8String,
};
use nom::bytes::complete::take_while_m_n;
use nom::combinator::map_res;
use nom::multi::many0;
use nom::{IResult, Parser};

use crate::attribute::{OidLookup, StandardAttributes};
use crate::error::{Error, Result};

/// Builds the value of one attribute of a distinguished name.
pub trait EntryConverter {
    fn encode_field(&self, field: &ObjectIdentifier, text: &str) -> Result<Element>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultEntryConverter {
    email_address: ObjectIdentifier,
}

impl DefaultEntryConverter {
    pub fn new() -> Result<Self> {
        Self::with_lookup(&StandardAttributes)
    }

    /// Resolves the email address attribute through `lookup`.
    pub fn with_lookup(lookup: &impl OidLookup) -> Result<Self> {
        let email_address = lookup
            .lookup("emailAddress")
            .ok_or_else(|| Error::UnknownAttribute("emailAddress".to_string()))?;
        Ok(DefaultEntryConverter { email_address })
    }
}

impl EntryConverter for DefaultEntryConverter {
    fn encode_field(&self, field: &ObjectIdentifier, text: &str) -> Result<Element> {
        if text.starts_with('#') {
            return convert_hex_encoded(text, 1);
        }
        if *field == self.email_address {
            // IA5 is ASCII only; the octets are written as given
            if !text.is_ascii() {
                log::warn!("{} value is not ASCII but is stored as IA5String: {:?}", field, text);
            }
            return Ok(Element::IA5String(Ia5String::new(text)));
        }
        if can_be_printable(text) {
            Ok(Element::PrintableString(PrintableString::new(text)))
        } else if can_be_utf8(text) {
            Ok(Element::UTF8String(Utf8String::new(text)))
        } else {
            Ok(Element::BMPString(BmpString::new(text)))
        }
    }
}

/// Decodes the hex digits of `text` starting at `offset` and reads the
/// first BER value they hold. Octets after that value are ignored.
pub fn convert_hex_encoded(text: &str, offset: usize) -> Result<Element> {
    let hex = text.get(offset..).ok_or(Error::MalformedHex {
        offset,
        reason: "offset outside the value",
    })?;
    if hex.is_empty() {
        return Err(Error::EmptyHexEncoding);
    }

    let (rest, octets) = hex_octets(hex).map_err(|_| Error::MalformedHex {
        offset,
        reason: "unparsable hex",
    })?;
    if !rest.is_empty() {
        let offset = offset + hex.len() - rest.len();
        let reason = if rest.len() == 1 && rest.chars().all(|c| c.is_ascii_hexdigit()) {
            "odd number of hex digits"
        } else {
            "non-hex character"
        };
        return Err(Error::MalformedHex { offset, reason });
    }

    let mut reader = Asn1Reader::new(octets.as_slice());
    let element = reader.read_next_value()?.ok_or(Error::EmptyHexEncoding)?;
    let consumed = reader.position();
    if consumed < octets.len() as u64 {
        log::debug!(
            "ignored {} octets after the hex encoded value",
            octets.len() as u64 - consumed
        );
    }
    Ok(element)
}

fn hex_octets(input: &str) -> IResult<&str, Vec<u8>> {
    many0(map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |pair: &str| u8::from_str_radix(pair, 16),
    ))
    .parse(input)
}

/// Whether every character of `text` is allowed in a PrintableString.
///
/// `,` and `/` belong to the repertoire but are left out here, so values
/// carrying them are written as UTF8String.
pub fn can_be_printable(text: &str) -> bool {
    text.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, ' ' | '\'' | '(' | ')' | '+' | '-' | '.' | ':' | '=' | '?')
    })
}

/// Whether `text` fits UTF8String under this ladder: every character lies
/// in the Basic Multilingual Plane.
pub fn can_be_utf8(text: &str) -> bool {
    text.chars().all(|c| u32::from(c) <= 0xffff)
}
