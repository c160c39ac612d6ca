//! Primitives of the BER tag-length-value encoding (X.690).
//!
//! This crate knows how to read a single identifier octet, a length field
//! and a run of content octets from any [`std::io::Read`] source. It does
//! not interpret contents; the `asn1` crate builds value nodes on top of it.

use std::fmt::Display;

pub mod error;
mod source;

use error::{Error, Result};

pub use source::Source;

/// Constructed bit of the identifier octet.
pub const TAG_CONSTRUCTED: u8 = 0x20;
/// Length octet announcing the indefinite form.
pub const INDEFINITE_LENGTH: u8 = 0x80;
/// Largest number of subsequent length octets the long form may use here.
pub const MAX_LENGTH_OCTETS: usize = 4;

const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_NUMBER_MASK: u8 = 0x1f;
const HIGH_TAG_NUMBER: u8 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xc0,
        }
    }

    fn from_octet(octet: u8) -> Self {
        match octet & TAG_CLASS_MASK {
            0x00 => TagClass::Universal,
            0x40 => TagClass::Application,
            0x80 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

impl Display for TagClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagClass::Universal => write!(f, "UNIVERSAL"),
            TagClass::Application => write!(f, "APPLICATION"),
            TagClass::ContextSpecific => write!(f, "CONTEXT"),
            TagClass::Private => write!(f, "PRIVATE"),
        }
    }
}

/// A low-tag-number identifier octet.
///
/// Bits 8-7 hold the class, bit 6 the constructed flag and bits 5-1 the
/// tag number. Tag number 31 announces the multi-octet form, which is not
/// supported, so every `Tag` has a number in `0..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u8);

impl Tag {
    /// Identifier octet of the end-of-contents marker.
    pub const END_OF_CONTENTS: Tag = Tag(0x00);

    pub fn new(class: TagClass, constructed: bool, number: u8) -> Result<Self> {
        let constructed_bit = if constructed { TAG_CONSTRUCTED } else { 0 };
        if number >= HIGH_TAG_NUMBER {
            return Err(Error::UnsupportedHighTagNumber(
                class.bits() | constructed_bit | HIGH_TAG_NUMBER,
            ));
        }
        Ok(Tag(class.bits() | constructed_bit | number))
    }

    /// Builds a universal tag; `number` must come from [`UniversalTag`].
    pub fn universal(tag: UniversalTag, constructed: bool) -> Self {
        let constructed_bit = if constructed { TAG_CONSTRUCTED } else { 0 };
        Tag((u8::from(tag) & TAG_NUMBER_MASK) | constructed_bit)
    }

    pub const fn octet(self) -> u8 {
        self.0
    }

    pub fn class(self) -> TagClass {
        TagClass::from_octet(self.0)
    }

    pub const fn is_constructed(self) -> bool {
        self.0 & TAG_CONSTRUCTED != 0
    }

    pub const fn number(self) -> u8 {
        self.0 & TAG_NUMBER_MASK
    }

    /// The same tag with the constructed bit set or cleared.
    pub const fn with_constructed(self, constructed: bool) -> Self {
        if constructed {
            Tag(self.0 | TAG_CONSTRUCTED)
        } else {
            Tag(self.0 & !TAG_CONSTRUCTED)
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(octet: u8) -> Result<Self> {
        if octet & TAG_NUMBER_MASK == HIGH_TAG_NUMBER {
            return Err(Error::UnsupportedHighTagNumber(octet));
        }
        Ok(Tag(octet))
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let form = if self.is_constructed() {
            "constructed"
        } else {
            "primitive"
        };
        write!(f, "[{} {}] {}", self.class(), self.number(), form)
    }
}

/// Universal tag numbers the decoder gives a dedicated node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UniversalTag {
    EndOfContents,
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Enumerated,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    T61String,
    IA5String,
    UTCTime,
    GeneralizedTime,
    VisibleString,
    UniversalString,
    BMPString,
    Other(u8),
}

impl From<u8> for UniversalTag {
    fn from(number: u8) -> Self {
        match number {
            0x00 => UniversalTag::EndOfContents,
            0x01 => UniversalTag::Boolean,
            0x02 => UniversalTag::Integer,
            0x03 => UniversalTag::BitString,
            0x04 => UniversalTag::OctetString,
            0x05 => UniversalTag::Null,
            0x06 => UniversalTag::ObjectIdentifier,
            0x0a => UniversalTag::Enumerated,
            0x0c => UniversalTag::UTF8String,
            0x10 => UniversalTag::Sequence,
            0x11 => UniversalTag::Set,
            0x13 => UniversalTag::PrintableString,
            0x14 => UniversalTag::T61String,
            0x16 => UniversalTag::IA5String,
            0x17 => UniversalTag::UTCTime,
            0x18 => UniversalTag::GeneralizedTime,
            0x1a => UniversalTag::VisibleString,
            0x1c => UniversalTag::UniversalString,
            0x1e => UniversalTag::BMPString,
            other => UniversalTag::Other(other),
        }
    }
}

impl From<UniversalTag> for u8 {
    fn from(tag: UniversalTag) -> Self {
        match tag {
            UniversalTag::EndOfContents => 0x00,
            UniversalTag::Boolean => 0x01,
            UniversalTag::Integer => 0x02,
            UniversalTag::BitString => 0x03,
            UniversalTag::OctetString => 0x04,
            UniversalTag::Null => 0x05,
            UniversalTag::ObjectIdentifier => 0x06,
            UniversalTag::Enumerated => 0x0a,
            UniversalTag::UTF8String => 0x0c,
            UniversalTag::Sequence => 0x10,
            UniversalTag::Set => 0x11,
            UniversalTag::PrintableString => 0x13,
            UniversalTag::T61String => 0x14,
            UniversalTag::IA5String => 0x16,
            UniversalTag::UTCTime => 0x17,
            UniversalTag::GeneralizedTime => 0x18,
            UniversalTag::VisibleString => 0x1a,
            UniversalTag::UniversalString => 0x1c,
            UniversalTag::BMPString => 0x1e,
            UniversalTag::Other(n) => n,
        }
    }
}

/// A decoded length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Definite(usize),
    /// Contents run until an end-of-contents marker (`00 00`).
    Indefinite,
}

impl Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Definite(n) => write!(f, "{}", n),
            Length::Indefinite => write!(f, "indefinite"),
        }
    }
}

/// Appends the identifier octet and a length field to `out`.
///
/// Definite lengths use the minimal form: one octet below 128, otherwise
/// the long form with as few big-endian octets as the value needs.
pub fn write_header(out: &mut Vec<u8>, tag: Tag, length: Length) {
    out.push(tag.octet());
    match length {
        Length::Indefinite => out.push(INDEFINITE_LENGTH),
        Length::Definite(n) if n < 0x80 => out.push(n as u8),
        Length::Definite(n) => {
            let bytes = n.to_be_bytes();
            let skip = bytes.iter().take_while(|&&b| b == 0).count();
            let significant = &bytes[skip..];
            out.push(0x80 | significant.len() as u8);
            out.extend_from_slice(significant);
        }
    }
}
