//! Schema-less decoding of BER encoded values into a tree of [`Element`]s.
//!
//! The decoder lives in [`Asn1Reader`]; it reads one top-level value at a
//! time from any [`std::io::Read`] source and handles both definite and
//! indefinite length framing. Context-specific, application and private tags
//! cannot be resolved without a schema, so the reader asks a
//! [`TaggingPolicy`] whether a constructed tag wraps one explicit value or an
//! implicitly tagged sequence.
//!
//! Leaf values keep their raw content octets, so a decoded tree re-encodes
//! to the exact input through [`Element::to_ber`]. Typed views (`BigInt`,
//! OID arcs, text, `chrono` times) are computed on demand.

use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

use ber::{Tag, UniversalTag};
use error::{Error, Result};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tsuzuri::decoder::{DecodableFrom, Decoder};

mod decoder;
mod encoder;
pub mod error;
mod string;
mod tagging;
mod time;

pub use decoder::{Asn1Reader, DEFAULT_MAX_DEPTH, DecodeOptions};
pub use string::{
    BmpString, Ia5String, PrintableString, T61String, UniversalString, Utf8String, VisibleString,
};
pub use tagging::{AlwaysImplicit, ChildCountHeuristic, TagContext, Tagged, Tagging, TaggingPolicy};
pub use time::{GeneralizedTime, UtcTime};

/// Every top-level value of a byte buffer, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl<'a> DecodableFrom<&'a [u8]> for ASN1Object {}

impl<'a> Decoder<&'a [u8], ASN1Object> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object> {
        let elements = Asn1Reader::new(*self).collect::<Result<Vec<_>>>()?;
        Ok(ASN1Object::new(elements))
    }
}

impl DecodableFrom<Vec<u8>> for ASN1Object {}

impl Decoder<Vec<u8>, ASN1Object> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object> {
        self.as_slice().decode()
    }
}

// Extension values and similar payloads nest a complete encoding inside an
// OCTET STRING.
impl TryFrom<&OctetString> for ASN1Object {
    type Error = Error;

    fn try_from(value: &OctetString) -> Result<Self> {
        value.as_bytes().decode()
    }
}

/// One decoded value.
///
/// Equality is structural: two nodes are equal when their kind, their
/// payload and, for constructed kinds, their framing are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(Boolean),
    Integer(Integer),
    Enumerated(Integer),
    ObjectIdentifier(ObjectIdentifier),
    BitString(BitString),
    OctetString(OctetString),
    ConstructedOctetString(ConstructedOctetString),
    Null,
    UTF8String(Utf8String),
    PrintableString(PrintableString),
    IA5String(Ia5String),
    T61String(T61String),
    VisibleString(VisibleString),
    UniversalString(UniversalString),
    BMPString(BmpString),
    UTCTime(UtcTime),
    GeneralizedTime(GeneralizedTime),
    Sequence { elements: Elements, framing: Framing },
    Set { elements: Elements, framing: Framing },
    Tagged(Tagged),
    /// A well-formed value whose tag has no dedicated kind.
    Unknown(UnknownTag),
}

impl Element {
    /// The identifier octet this node is encoded with.
    pub fn tag(&self) -> Tag {
        let universal = Tag::universal;
        match self {
            Element::Boolean(_) => universal(UniversalTag::Boolean, false),
            Element::Integer(_) => universal(UniversalTag::Integer, false),
            Element::Enumerated(_) => universal(UniversalTag::Enumerated, false),
            Element::ObjectIdentifier(_) => universal(UniversalTag::ObjectIdentifier, false),
            Element::BitString(_) => universal(UniversalTag::BitString, false),
            Element::OctetString(_) => universal(UniversalTag::OctetString, false),
            Element::ConstructedOctetString(_) => universal(UniversalTag::OctetString, true),
            Element::Null => universal(UniversalTag::Null, false),
            Element::UTF8String(_) => universal(UniversalTag::UTF8String, false),
            Element::PrintableString(_) => universal(UniversalTag::PrintableString, false),
            Element::IA5String(_) => universal(UniversalTag::IA5String, false),
            Element::T61String(_) => universal(UniversalTag::T61String, false),
            Element::VisibleString(_) => universal(UniversalTag::VisibleString, false),
            Element::UniversalString(_) => universal(UniversalTag::UniversalString, false),
            Element::BMPString(_) => universal(UniversalTag::BMPString, false),
            Element::UTCTime(_) => universal(UniversalTag::UTCTime, false),
            Element::GeneralizedTime(_) => universal(UniversalTag::GeneralizedTime, false),
            Element::Sequence { .. } => universal(UniversalTag::Sequence, true),
            Element::Set { .. } => universal(UniversalTag::Set, true),
            Element::Tagged(tagged) => tagged.tag(),
            Element::Unknown(unknown) => unknown.tag(),
        }
    }

    pub fn framing(&self) -> Framing {
        match self {
            Element::Sequence { framing, .. } | Element::Set { framing, .. } => *framing,
            Element::ConstructedOctetString(octets) => octets.framing(),
            Element::Tagged(tagged) => tagged.framing(),
            _ => Framing::Definite,
        }
    }

    /// Child nodes of a sequence, a set or a constructed octet string.
    pub fn children(&self) -> Option<&[Element]> {
        match self {
            Element::Sequence { elements, .. } | Element::Set { elements, .. } => {
                Some(elements.as_slice())
            }
            Element::ConstructedOctetString(octets) => Some(octets.chunks().as_slice()),
            _ => None,
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::Enumerated(i) => write!(f, "Enumerated({})", i),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::BitString(bs) => write!(f, "BitString({})", bs),
            Element::OctetString(os) => write!(f, "OctetString({})", os),
            Element::ConstructedOctetString(os) => {
                write!(f, "OctetString({})", to_hex(&os.to_bytes()))
            }
            Element::Null => write!(f, "Null"),
            Element::UTF8String(s) => write!(f, "UTF8String({})", s),
            Element::PrintableString(s) => write!(f, "PrintableString({})", s),
            Element::IA5String(s) => write!(f, "IA5String({})", s),
            Element::T61String(s) => write!(f, "T61String({})", s),
            Element::VisibleString(s) => write!(f, "VisibleString({})", s),
            Element::UniversalString(s) => write!(f, "UniversalString({})", s),
            Element::BMPString(s) => write!(f, "BMPString({})", s),
            Element::UTCTime(t) => write!(f, "UTCTime({})", t),
            Element::GeneralizedTime(t) => write!(f, "GeneralizedTime({})", t),
            Element::Sequence { elements, .. } => write!(f, "Sequence({})", elements),
            Element::Set { elements, .. } => write!(f, "Set({})", elements),
            Element::Tagged(tagged) => write!(f, "{}", tagged),
            Element::Unknown(unknown) => write!(f, "{}", unknown),
        }
    }
}

/// How a constructed value marks the end of its contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Framing {
    /// The length field states the content size.
    #[default]
    Definite,
    /// The contents end with an end-of-contents marker.
    Indefinite,
}

/// An ordered, immutable run of child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elements {
    inner: Vec<Element>,
}

impl Elements {
    pub fn as_slice(&self) -> &[Element] {
        &self.inner
    }

    pub fn into_vec(self) -> Vec<Element> {
        self.inner
    }
}

impl Deref for Elements {
    type Target = [Element];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Vec<Element>> for Elements {
    fn from(inner: Vec<Element>) -> Self {
        Elements { inner }
    }
}

impl FromIterator<Element> for Elements {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Elements {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Elements {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Display for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, element) in self.inner.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

/// Accumulates children while one level of a constructed value is decoded.
#[derive(Debug, Default)]
pub struct ElementsBuilder {
    inner: Vec<Element>,
}

impl ElementsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.inner.push(element);
    }

    pub fn finish(self) -> Elements {
        Elements { inner: self.inner }
    }
}

/// BOOLEAN, keeping the content octet so that any non-zero value survives
/// a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boolean {
    octet: u8,
}

impl Boolean {
    pub fn value(&self) -> bool {
        self.octet != 0
    }

    pub fn octet(&self) -> u8 {
        self.octet
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Boolean {
            octet: if value { 0xff } else { 0x00 },
        }
    }
}

impl TryFrom<&[u8]> for Boolean {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        match value {
            [octet] => Ok(Boolean { octet: *octet }),
            _ => Err(Error::InvalidBoolean(value.len())),
        }
    }
}

impl Display for Boolean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ASN.1 integers are arbitrary sized two's complement values. The content
// octets are kept as they were read; the numeric value is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    contents: Vec<u8>,
}

impl Integer {
    pub fn value(&self) -> BigInt {
        BigInt::from_signed_bytes_be(&self.contents)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.value().to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.value().to_u64()
    }
}

impl TryFrom<&[u8]> for Integer {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::IntegerNoData);
        }
        Ok(Integer {
            contents: value.to_vec(),
        })
    }
}

impl From<&BigInt> for Integer {
    fn from(value: &BigInt) -> Self {
        Integer {
            contents: value.to_signed_bytes_be(),
        }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::from(&BigInt::from(value))
    }
}

impl TryFrom<&Integer> for i64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value.to_i64().ok_or(Error::IntegerOutOfRangeI64)
    }
}

impl TryFrom<&Integer> for u64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value.to_u64().ok_or(Error::IntegerOutOfRangeU64)
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value().to_string())
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = s.parse::<BigInt>().map_err(serde::de::Error::custom)?;
        Ok(Integer::from(&value))
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// OBJECT IDENTIFIER in its encoded form: base-128 subidentifiers, the
/// first of which packs the first two arcs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    contents: Vec<u8>,
}

impl ObjectIdentifier {
    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    pub fn arcs(&self) -> Result<Vec<u64>> {
        let mut subidentifiers = Vec::new();
        let mut value = 0u64;
        for &octet in &self.contents {
            if value > (u64::MAX >> 7) {
                return Err(Error::ObjectIdentifierArcOverflow);
            }
            value = (value << 7) | u64::from(octet & 0x7f);
            if octet & 0x80 == 0 {
                subidentifiers.push(value);
                value = 0;
            }
        }

        let mut subidentifiers = subidentifiers.into_iter();
        let first = subidentifiers
            .next()
            .ok_or(Error::ObjectIdentifierNoData)?;
        let (root, second) = match first {
            0..=39 => (0, first),
            40..=79 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut arcs = vec![root, second];
        arcs.extend(subidentifiers);
        Ok(arcs)
    }

    pub fn from_arcs(arcs: &[u64]) -> Result<Self> {
        let (root, second, rest) = match arcs {
            [root, second, rest @ ..] => (*root, *second, rest),
            _ => return Err(Error::ObjectIdentifierTooFewComponents),
        };
        if root > 2 || (root < 2 && second >= 40) {
            return Err(Error::ObjectIdentifierInvalidComponent(format!(
                "{}.{}",
                root, second
            )));
        }
        let first = (root * 40)
            .checked_add(second)
            .ok_or(Error::ObjectIdentifierArcOverflow)?;

        let mut contents = Vec::new();
        for arc in std::iter::once(first).chain(rest.iter().copied()) {
            let mut septets = vec![(arc & 0x7f) as u8];
            let mut remaining = arc >> 7;
            while remaining > 0 {
                septets.push((remaining & 0x7f) as u8 | 0x80);
                remaining >>= 7;
            }
            contents.extend(septets.iter().rev());
        }
        Ok(ObjectIdentifier { contents })
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        match value.last() {
            None => Err(Error::ObjectIdentifierNoData),
            Some(last) if last & 0x80 != 0 => Err(Error::ObjectIdentifierIncompleteEncoding),
            Some(_) => Ok(ObjectIdentifier {
                contents: value.to_vec(),
            }),
        }
    }
}

impl TryFrom<Vec<u8>> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::try_from(value.as_slice())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .split('.')
            .map(|arc| arc.parse::<u64>().map_err(Error::ParseInt))
            .collect::<Result<Vec<u64>>>()?;
        Self::from_arcs(&arcs)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.arcs() {
            Ok(arcs) => {
                let dotted = arcs
                    .iter()
                    .map(|arc| arc.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                write!(f, "{}", dotted)
            }
            Err(_) => write!(f, "0x{}", to_hex(&self.contents)),
        }
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        *self == other.to_string()
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectIdentifier::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// BIT STRING with its count of unused trailing bits (0-7).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Result<Self> {
        // an empty bit string has no last octet to pad
        if unused > 7 || (data.is_empty() && unused != 0) {
            return Err(Error::UnsupportedBitStringPadding(unused));
        }
        Ok(BitString { unused, data })
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(usize::from(self.unused))
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        match value.split_first() {
            Some((&unused, data)) => BitString::new(unused, data.to_vec()),
            None => Err(Error::BitStringNoData),
        }
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last = self.data.len().saturating_sub(1);
        for (i, byte) in self.data.iter().enumerate() {
            if i == last && self.unused > 0 {
                let width = 8 - usize::from(self.unused);
                write!(f, "{:0width$b}", byte >> self.unused, width = width)?;
            } else {
                write!(f, "{:08b}", byte)?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BitStringRepr {
    bit_length: usize,
    bits: String,
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let bits = self
                .data
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(":");
            BitStringRepr {
                bit_length: self.bit_len(),
                bits,
            }
            .serialize(serializer)
        } else {
            (self.unused, &self.data).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (unused, data) = if deserializer.is_human_readable() {
            let repr = BitStringRepr::deserialize(deserializer)?;
            let data = from_hex(&repr.bits)
                .ok_or_else(|| serde::de::Error::custom("invalid hex string"))?;
            let unused = (data.len() * 8)
                .checked_sub(repr.bit_length)
                .and_then(|unused| u8::try_from(unused).ok())
                .ok_or_else(|| serde::de::Error::custom("bit_length does not match bits"))?;
            (unused, data)
        } else {
            <(u8, Vec<u8>)>::deserialize(deserializer)?
        };
        BitString::new(unused, data).map_err(serde::de::Error::custom)
    }
}

/// Primitive OCTET STRING.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(inner: Vec<u8>) -> Self {
        OctetString { inner }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", to_hex(&self.inner))
    }
}

impl Serialize for OctetString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&to_hex(&self.inner))
        } else {
            self.inner.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for OctetString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            let inner = from_hex(&s).ok_or_else(|| serde::de::Error::custom("invalid hex string"))?;
            Ok(OctetString { inner })
        } else {
            let inner = Vec::<u8>::deserialize(deserializer)?;
            Ok(OctetString { inner })
        }
    }
}

/// OCTET STRING in the constructed form, split into chunks.
///
/// Every chunk is itself a primitive or constructed octet string; the value
/// is the concatenation of all chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructedOctetString {
    chunks: Elements,
    framing: Framing,
}

impl ConstructedOctetString {
    pub fn new(chunks: Elements, framing: Framing) -> Result<Self> {
        let valid = chunks.iter().all(|chunk| {
            matches!(
                chunk,
                Element::OctetString(_) | Element::ConstructedOctetString(_)
            )
        });
        if !valid {
            return Err(Error::OctetStringChunkInvalid);
        }
        Ok(ConstructedOctetString { chunks, framing })
    }

    pub fn chunks(&self) -> &Elements {
        &self.chunks
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// The concatenated value of all chunks.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for chunk in &self.chunks {
            match chunk {
                Element::OctetString(octets) => bytes.extend_from_slice(octets.as_bytes()),
                Element::ConstructedOctetString(nested) => bytes.extend(nested.to_bytes()),
                _ => {}
            }
        }
        bytes
    }
}

/// A value whose tag has no dedicated node kind, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownTag {
    tag: Tag,
    contents: Vec<u8>,
}

impl UnknownTag {
    pub fn new(tag: Tag, contents: Vec<u8>) -> Self {
        UnknownTag { tag, contents }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

impl Display for UnknownTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown({}, {})", self.tag, to_hex(&self.contents))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> Option<Vec<u8>> {
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == ':' || *c == '-'))
        .collect();
    if cleaned.len() % 2 != 0 {
        return None;
    }
    cleaned
        .chunks(2)
        .map(|pair| {
            let high = pair[0].to_digit(16)?;
            let low = pair[1].to_digit(16)?;
            u8::try_from(high * 16 + low).ok()
        })
        .collect()
}
