//! The recursive BER decoder.
//!
//! One function, `read_item`, reads a header and builds a node. Definite
//! length contents are read into a buffer first and constructed children are
//! decoded from a [`Source`] over that buffer, offset so that positions stay
//! absolute. Indefinite length contents are decoded from the enclosing
//! source until the end-of-contents marker comes back.

use std::io::Read;

use ber::{Length, Source, Tag, TagClass, UniversalTag};

use crate::error::{Error, Result};
use crate::tagging::{ChildCountHeuristic, TagContext, Tagged, TaggingPolicy};
use crate::{
    BitString, BmpString, Boolean, ConstructedOctetString, Element, Elements, ElementsBuilder,
    Framing, GeneralizedTime, Ia5String, Integer, ObjectIdentifier, OctetString, PrintableString,
    T61String, UniversalString, UnknownTag, UtcTime, Utf8String, VisibleString,
};

/// Nesting limit used by [`DecodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest constructed nesting accepted; a top-level value has depth 0.
    pub max_depth: usize,
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reads successive top-level values from a byte stream.
///
/// ```
/// use asn1::{Asn1Reader, Element};
///
/// let bytes: &[u8] = &[0x30, 0x80, 0x02, 0x01, 0x05, 0x00, 0x00];
/// let mut reader = Asn1Reader::new(bytes);
/// let value = reader.read_next_value().unwrap().unwrap();
/// assert!(matches!(value, Element::Sequence { .. }));
/// assert!(reader.read_next_value().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Asn1Reader<R, P = ChildCountHeuristic> {
    source: Source<R>,
    policy: P,
    options: DecodeOptions,
    failed: bool,
}

impl<R: Read> Asn1Reader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_policy(inner, ChildCountHeuristic)
    }
}

impl<R: Read, P: TaggingPolicy> Asn1Reader<R, P> {
    pub fn with_policy(inner: R, policy: P) -> Self {
        Asn1Reader {
            source: Source::new(inner),
            policy,
            options: DecodeOptions::default(),
            failed: false,
        }
    }

    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Decodes the next top-level value.
    ///
    /// Returns `Ok(None)` when the stream ends exactly at a value boundary.
    /// An end of stream anywhere inside a value is `TruncatedInput`.
    pub fn read_next_value(&mut self) -> Result<Option<Element>> {
        let offset = self.source.position();
        let context = Context {
            policy: &self.policy,
            options: &self.options,
        };
        match read_item(&mut self.source, &context, 0)? {
            None => Ok(None),
            Some(Item::Value(element)) => Ok(Some(element)),
            Some(Item::EndOfContents) => Err(Error::UnexpectedEndOfContents { offset }),
        }
    }

    /// Offset of the next unread octet.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

/// Yields values until the stream is exhausted or the first error.
impl<R: Read, P: TaggingPolicy> Iterator for Asn1Reader<R, P> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.read_next_value().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

struct Context<'a, P> {
    policy: &'a P,
    options: &'a DecodeOptions,
}

impl<P> Context<'_, P> {
    fn descend(&self, depth: usize) -> Result<usize> {
        let next = depth + 1;
        if next > self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(next)
    }
}

enum Item {
    Value(Element),
    /// `00 00`; only meaningful inside indefinite length contents.
    EndOfContents,
}

fn read_item<R: Read, P: TaggingPolicy>(
    source: &mut Source<R>,
    context: &Context<'_, P>,
    depth: usize,
) -> Result<Option<Item>> {
    let offset = source.position();
    let Some(tag) = source.read_tag_octet()? else {
        return Ok(None);
    };
    let length = source.read_length()?;
    log::trace!("offset {}: {} length {}", offset, tag, length);

    match length {
        Length::Definite(len) => {
            let base = source.position();
            let contents = source.read_exact(len)?;
            if tag == Tag::END_OF_CONTENTS && len == 0 {
                return Ok(Some(Item::EndOfContents));
            }
            build_from_bytes(tag, contents, base, context, depth).map(|e| Some(Item::Value(e)))
        }
        Length::Indefinite => {
            build_indefinite(source, tag, context, depth).map(|e| Some(Item::Value(e)))
        }
    }
}

fn build_from_bytes<P: TaggingPolicy>(
    tag: Tag,
    contents: Vec<u8>,
    base: u64,
    context: &Context<'_, P>,
    depth: usize,
) -> Result<Element> {
    if tag.class() != TagClass::Universal {
        if !tag.is_constructed() {
            log::debug!(
                "[{} {}] primitive, kept as implicit octets",
                tag.class(),
                tag.number()
            );
            return Ok(Element::Tagged(Tagged::implicit_octets(tag, contents)));
        }
        let depth = context.descend(depth)?;
        let children = read_children_definite(&contents, base, context, depth)?;
        let tag_context = TagContext {
            tag,
            framing: Framing::Definite,
        };
        return context
            .policy
            .resolve(tag_context, children)
            .map(Element::Tagged);
    }

    let element = match (UniversalTag::from(tag.number()), tag.is_constructed()) {
        (UniversalTag::Boolean, false) => Element::Boolean(Boolean::try_from(contents.as_slice())?),
        (UniversalTag::Integer, false) => Element::Integer(Integer::try_from(contents.as_slice())?),
        (UniversalTag::Enumerated, false) => {
            Element::Enumerated(Integer::try_from(contents.as_slice())?)
        }
        (UniversalTag::BitString, false) => {
            Element::BitString(BitString::try_from(contents.as_slice())?)
        }
        (UniversalTag::OctetString, false) => Element::OctetString(OctetString::from(contents)),
        (UniversalTag::OctetString, true) => {
            let depth = context.descend(depth)?;
            let chunks = read_children_definite(&contents, base, context, depth)?;
            Element::ConstructedOctetString(ConstructedOctetString::new(
                chunks,
                Framing::Definite,
            )?)
        }
        (UniversalTag::Null, false) => {
            if !contents.is_empty() {
                return Err(Error::NullNotEmpty(contents.len()));
            }
            Element::Null
        }
        (UniversalTag::ObjectIdentifier, false) => {
            Element::ObjectIdentifier(ObjectIdentifier::try_from(contents)?)
        }
        (UniversalTag::UTF8String, false) => Element::UTF8String(Utf8String::from(contents)),
        (UniversalTag::PrintableString, false) => {
            Element::PrintableString(PrintableString::from(contents))
        }
        (UniversalTag::IA5String, false) => Element::IA5String(Ia5String::from(contents)),
        (UniversalTag::T61String, false) => Element::T61String(T61String::from(contents)),
        (UniversalTag::VisibleString, false) => {
            Element::VisibleString(VisibleString::from(contents))
        }
        (UniversalTag::UniversalString, false) => {
            Element::UniversalString(UniversalString::from(contents))
        }
        (UniversalTag::BMPString, false) => Element::BMPString(BmpString::from(contents)),
        (UniversalTag::UTCTime, false) => Element::UTCTime(UtcTime::from(contents)),
        (UniversalTag::GeneralizedTime, false) => {
            Element::GeneralizedTime(GeneralizedTime::from(contents))
        }
        (UniversalTag::Sequence, true) => {
            let depth = context.descend(depth)?;
            Element::Sequence {
                elements: read_children_definite(&contents, base, context, depth)?,
                framing: Framing::Definite,
            }
        }
        (UniversalTag::Set, true) => {
            let depth = context.descend(depth)?;
            Element::Set {
                elements: read_children_definite(&contents, base, context, depth)?,
                framing: Framing::Definite,
            }
        }
        _ => Element::Unknown(UnknownTag::new(tag, contents)),
    };
    Ok(element)
}

fn build_indefinite<R: Read, P: TaggingPolicy>(
    source: &mut Source<R>,
    tag: Tag,
    context: &Context<'_, P>,
    depth: usize,
) -> Result<Element> {
    if !tag.is_constructed() {
        return Err(Error::UnsupportedIndefiniteLength { tag: tag.octet() });
    }

    if tag.class() != TagClass::Universal {
        let depth = context.descend(depth)?;
        let children = read_children_indefinite(source, context, depth)?;
        let tag_context = TagContext {
            tag,
            framing: Framing::Indefinite,
        };
        return context
            .policy
            .resolve(tag_context, children)
            .map(Element::Tagged);
    }

    match UniversalTag::from(tag.number()) {
        UniversalTag::Sequence => {
            let depth = context.descend(depth)?;
            Ok(Element::Sequence {
                elements: read_children_indefinite(source, context, depth)?,
                framing: Framing::Indefinite,
            })
        }
        UniversalTag::Set => {
            let depth = context.descend(depth)?;
            Ok(Element::Set {
                elements: read_children_indefinite(source, context, depth)?,
                framing: Framing::Indefinite,
            })
        }
        UniversalTag::OctetString => {
            let depth = context.descend(depth)?;
            let chunks = read_children_indefinite(source, context, depth)?;
            Ok(Element::ConstructedOctetString(
                ConstructedOctetString::new(chunks, Framing::Indefinite)?,
            ))
        }
        _ => Err(Error::UnsupportedIndefiniteLength { tag: tag.octet() }),
    }
}

fn read_children_definite<P: TaggingPolicy>(
    contents: &[u8],
    base: u64,
    context: &Context<'_, P>,
    depth: usize,
) -> Result<Elements> {
    let mut source = Source::with_offset(contents, base);
    let mut children = ElementsBuilder::new();
    loop {
        let offset = source.position();
        match read_item(&mut source, context, depth)? {
            None => return Ok(children.finish()),
            Some(Item::Value(element)) => children.push(element),
            Some(Item::EndOfContents) => return Err(Error::UnexpectedEndOfContents { offset }),
        }
    }
}

fn read_children_indefinite<R: Read, P: TaggingPolicy>(
    source: &mut Source<R>,
    context: &Context<'_, P>,
    depth: usize,
) -> Result<Elements> {
    let mut children = ElementsBuilder::new();
    loop {
        match read_item(source, context, depth)? {
            Some(Item::Value(element)) => children.push(element),
            Some(Item::EndOfContents) => return Ok(children.finish()),
            None => {
                return Err(ber::error::Error::TruncatedInput {
                    offset: source.position(),
                    needed: 2,
                }
                .into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ber::{Tag, TagClass};
    use rstest::rstest;

    use crate::decoder::{Asn1Reader, DecodeOptions};
    use crate::error::Error;
    use crate::tagging::{AlwaysImplicit, Tagged, Tagging};
    use crate::{
        BitString, BmpString, Boolean, ConstructedOctetString, Element, Elements, Framing,
        Integer, ObjectIdentifier, OctetString, PrintableString, UnknownTag, UtcTime, Utf8String,
    };

    fn decode(input: &[u8]) -> Result<Option<Element>, Error> {
        Asn1Reader::new(input).read_next_value()
    }

    fn decode_one(input: &[u8]) -> Element {
        decode(input).unwrap().unwrap()
    }

    fn int(value: i64) -> Element {
        Element::Integer(Integer::from(value))
    }

    fn octets(bytes: &[u8]) -> Element {
        Element::OctetString(OctetString::from(bytes))
    }

    fn sequence(elements: Vec<Element>, framing: Framing) -> Element {
        Element::Sequence {
            elements: Elements::from(elements),
            framing,
        }
    }

    fn context_tag(number: u8) -> Tag {
        Tag::new(TagClass::ContextSpecific, true, number).unwrap()
    }

    #[test]
    fn test_empty_stream() {
        assert!(decode(&[]).unwrap().is_none());
    }

    #[rstest(input, expected,
        case(vec![0x01, 0x01, 0xff], Element::Boolean(Boolean::from(true))),
        case(vec![0x01, 0x01, 0x00], Element::Boolean(Boolean::from(false))),
        case(vec![0x02, 0x01, 0x05], int(5)),
        case(vec![0x02, 0x02, 0xff, 0x7f], int(-129)),
        case(vec![0x0a, 0x01, 0x02], Element::Enumerated(Integer::from(2))),
        case(vec![0x03, 0x02, 0x07, 0x80], Element::BitString(BitString::new(7, vec![0x80]).unwrap())),
        case(vec![0x04, 0x03, 0x01, 0x02, 0x03], octets(&[0x01, 0x02, 0x03])),
        case(vec![0x04, 0x00], octets(&[])),
        case(vec![0x05, 0x00], Element::Null),
        case(vec![0x06, 0x03, 0x55, 0x04, 0x03], Element::ObjectIdentifier("2.5.4.3".parse::<ObjectIdentifier>().unwrap())),
        case(vec![0x0c, 0x03, 0x61, 0x62, 0x63], Element::UTF8String(Utf8String::new("abc"))),
        case(vec![0x13, 0x02, 0x4a, 0x50], Element::PrintableString(PrintableString::new("JP"))),
        case(vec![0x1e, 0x02, 0x00, 0x41], Element::BMPString(BmpString::new("A"))),
        case(vec![0x17, 0x0d, 0x32, 0x35, 0x30, 0x35, 0x32, 0x33, 0x30, 0x39, 0x31, 0x30, 0x34, 0x37, 0x5a], Element::UTCTime(UtcTime::from(b"250523091047Z".to_vec()))),
    )]
    fn test_decode_primitive(input: Vec<u8>, expected: Element) {
        assert_eq!(expected, decode_one(&input));
    }

    #[rstest(input, tag,
        case(vec![0x07, 0x01, 0x41], 0x07),
        case(vec![0x08, 0x00], 0x08),
        case(vec![0x23, 0x03, 0x03, 0x01, 0x00], 0x23),
        case(vec![0x00, 0x01, 0x00], 0x00),
    )]
    fn test_decode_unknown_keeps_raw_contents(input: Vec<u8>, tag: u8) {
        let Element::Unknown(unknown) = decode_one(&input) else {
            panic!("expected an unknown node");
        };
        assert_eq!(tag, unknown.tag().octet());
        assert_eq!(&input[2..], unknown.contents());
    }

    #[test]
    fn test_decode_definite_sequence() {
        let input = [0x30, 0x06, 0x02, 0x01, 0x01, 0x01, 0x01, 0xff];
        assert_eq!(
            sequence(vec![int(1), Element::Boolean(Boolean::from(true))], Framing::Definite),
            decode_one(&input)
        );
    }

    #[test]
    fn test_decode_definite_set() {
        let input = [0x31, 0x04, 0x05, 0x00, 0x05, 0x00];
        assert_eq!(
            Element::Set {
                elements: Elements::from(vec![Element::Null, Element::Null]),
                framing: Framing::Definite,
            },
            decode_one(&input)
        );
    }

    #[test]
    fn test_decode_indefinite_sequence() {
        let input = [
            0x30, 0x80, 0x02, 0x01, 0x01, 0x30, 0x80, 0x05, 0x00, 0x00, 0x00, 0x04, 0x01,
            0xaa, 0x00, 0x00,
        ];
        assert_eq!(
            sequence(
                vec![
                    int(1),
                    sequence(vec![Element::Null], Framing::Indefinite),
                    octets(&[0xaa]),
                ],
                Framing::Indefinite
            ),
            decode_one(&input)
        );
    }

    #[test]
    fn test_decode_indefinite_set() {
        let input = [0x31, 0x80, 0x01, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(
            Element::Set {
                elements: Elements::from(vec![Element::Boolean(Boolean::from(false))]),
                framing: Framing::Indefinite,
            },
            decode_one(&input)
        );
    }

    #[rstest(input,
        case(vec![0x30, 0x80, 0x02, 0x01, 0x01]),
        case(vec![0x30, 0x80, 0x02, 0x01, 0x01, 0x00]),
        case(vec![0x30, 0x80]),
        case(vec![0xa0, 0x80, 0x05, 0x00]),
    )]
    fn test_decode_indefinite_missing_terminator(input: Vec<u8>) {
        assert!(matches!(
            decode(&input),
            Err(Error::Ber(ber::error::Error::TruncatedInput { .. }))
        ));
    }

    #[test]
    fn test_decode_constructed_octet_string_indefinite() {
        let input = [
            0x24, 0x80, 0x04, 0x02, 0x01, 0x02, 0x04, 0x01, 0x03, 0x00, 0x00,
        ];
        let Element::ConstructedOctetString(value) = decode_one(&input) else {
            panic!("expected a constructed octet string");
        };
        assert_eq!(Framing::Indefinite, value.framing());
        assert_eq!(2, value.chunks().len());
        assert_eq!(vec![0x01, 0x02, 0x03], value.to_bytes());
    }

    #[test]
    fn test_decode_constructed_octet_string_definite() {
        let input = [0x24, 0x07, 0x04, 0x01, 0x0a, 0x24, 0x02, 0x04, 0x00];
        let expected = ConstructedOctetString::new(
            Elements::from(vec![
                octets(&[0x0a]),
                Element::ConstructedOctetString(
                    ConstructedOctetString::new(Elements::from(vec![octets(&[])]), Framing::Definite)
                        .unwrap(),
                ),
            ]),
            Framing::Definite,
        )
        .unwrap();
        assert_eq!(Element::ConstructedOctetString(expected), decode_one(&input));
    }

    #[rstest(input,
        case(vec![0x24, 0x80, 0x02, 0x01, 0x01, 0x00, 0x00]),
        case(vec![0x24, 0x02, 0x05, 0x00]),
    )]
    fn test_decode_constructed_octet_string_bad_chunk(input: Vec<u8>) {
        assert!(matches!(decode(&input), Err(Error::OctetStringChunkInvalid)));
    }

    #[test]
    fn test_decode_tagged_primitive_is_implicit_octets() {
        // [2] IMPLICIT IA5String "a.jp" as found in a subjectAltName
        let input = [0x82, 0x04, 0x61, 0x2e, 0x6a, 0x70];
        let Element::Tagged(tagged) = decode_one(&input) else {
            panic!("expected a tagged value");
        };
        assert_eq!(Tagging::Implicit, tagged.tagging());
        assert_eq!(2, tagged.number());
        assert_eq!(Some(&octets(b"a.jp")), tagged.inner());
    }

    #[rstest(input, framing,
        case(vec![0xa0, 0x03, 0x02, 0x01, 0x02], Framing::Definite),
        case(vec![0xa0, 0x80, 0x02, 0x01, 0x02, 0x00, 0x00], Framing::Indefinite),
    )]
    fn test_decode_tagged_single_child_is_explicit(input: Vec<u8>, framing: Framing) {
        assert_eq!(
            Element::Tagged(Tagged::explicit(context_tag(0), int(2), framing)),
            decode_one(&input)
        );
    }

    #[rstest(input, framing,
        case(vec![0xa1, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02], Framing::Definite),
        case(vec![0xa1, 0x80, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02, 0x00, 0x00], Framing::Indefinite),
    )]
    fn test_decode_tagged_many_children_is_implicit_sequence(input: Vec<u8>, framing: Framing) {
        assert_eq!(
            Element::Tagged(Tagged::implicit_sequence(
                context_tag(1),
                Elements::from(vec![int(1), int(2)]),
                framing
            )),
            decode_one(&input)
        );
    }

    #[rstest(input, framing,
        case(vec![0xa3, 0x00], Framing::Definite),
        case(vec![0xa3, 0x80, 0x00, 0x00], Framing::Indefinite),
    )]
    fn test_decode_tagged_empty(input: Vec<u8>, framing: Framing) {
        assert_eq!(
            Element::Tagged(Tagged::empty(context_tag(3), framing)),
            decode_one(&input)
        );
    }

    #[rstest(input, class,
        case(vec![0x61, 0x02, 0x05, 0x00], TagClass::Application),
        case(vec![0xe2, 0x02, 0x05, 0x00], TagClass::Private),
    )]
    fn test_decode_application_and_private_tags(input: Vec<u8>, class: TagClass) {
        let Element::Tagged(tagged) = decode_one(&input) else {
            panic!("expected a tagged value");
        };
        assert_eq!(class, tagged.class());
        assert_eq!(Tagging::Explicit, tagged.tagging());
        assert_eq!(Some(&Element::Null), tagged.inner());
    }

    #[test]
    fn test_decode_with_always_implicit_policy() {
        let input = [0xa0, 0x03, 0x02, 0x01, 0x02];
        let element = Asn1Reader::with_policy(&input[..], AlwaysImplicit)
            .read_next_value()
            .unwrap()
            .unwrap();
        assert_eq!(
            Element::Tagged(Tagged::implicit_sequence(
                context_tag(0),
                Elements::from(vec![int(2)]),
                Framing::Definite
            )),
            element
        );
    }

    #[rstest(input, tag,
        case(vec![0x04, 0x80, 0x00, 0x00], 0x04),
        case(vec![0x02, 0x80, 0x00, 0x00], 0x02),
        case(vec![0x80, 0x80, 0x00, 0x00], 0x80),
        case(vec![0x00, 0x80], 0x00),
        case(vec![0x23, 0x80, 0x03, 0x01, 0x00, 0x00, 0x00], 0x23),
        case(vec![0x2c, 0x80, 0x0c, 0x01, 0x61, 0x00, 0x00], 0x2c),
    )]
    fn test_decode_unsupported_indefinite_length(input: Vec<u8>, tag: u8) {
        assert!(matches!(
            decode(&input),
            Err(Error::UnsupportedIndefiniteLength { tag: t }) if t == tag
        ));
    }

    #[rstest(input,
        case(vec![0x03, 0x02, 0x08, 0x00]),
        case(vec![0x03, 0x02, 0xff, 0x00]),
        case(vec![0x30, 0x04, 0x03, 0x02, 0x09, 0x00]),
        case(vec![0x03, 0x01, 0x07]),
    )]
    fn test_decode_bit_string_padding_rejected(input: Vec<u8>) {
        assert!(matches!(
            decode(&input),
            Err(Error::UnsupportedBitStringPadding(_))
        ));
    }

    #[rstest(input,
        case(vec![0x1f, 0x21, 0x00]),
        case(vec![0x30, 0x03, 0x9f, 0x01, 0x00]),
        case(vec![0x30, 0x80, 0x3f, 0x00, 0x00, 0x00]),
    )]
    fn test_decode_high_tag_number_rejected(input: Vec<u8>) {
        assert!(matches!(
            decode(&input),
            Err(Error::Ber(ber::error::Error::UnsupportedHighTagNumber(_)))
        ));
    }

    #[rstest(input,
        case(vec![0x04, 0x85, 0x00, 0x00, 0x00, 0x00, 0x01, 0xaa]),
        case(vec![0x30, 0x85, 0x01, 0x00, 0x00, 0x00, 0x00]),
        case(vec![0x04, 0x84, 0x80, 0x00, 0x00, 0x00]),
    )]
    fn test_decode_malformed_length(input: Vec<u8>) {
        assert!(matches!(
            decode(&input),
            Err(Error::Ber(ber::error::Error::MalformedLength { .. }))
        ));
    }

    #[rstest(input,
        case(vec![0x01, 0x02, 0xff, 0x00]),
        case(vec![0x01, 0x00]),
    )]
    fn test_decode_invalid_boolean(input: Vec<u8>) {
        assert!(matches!(decode(&input), Err(Error::InvalidBoolean(_))));
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x00], "INTEGER"),
        case(vec![0x06, 0x00], "OBJECT IDENTIFIER"),
        case(vec![0x06, 0x02, 0x2a, 0x86], "OBJECT IDENTIFIER"),
        case(vec![0x03, 0x00], "BIT STRING"),
        case(vec![0x05, 0x01, 0x00], "NULL"),
    )]
    fn test_decode_shape_errors(input: Vec<u8>, expected: &str) {
        let err = decode(&input).unwrap_err();
        assert!(err.to_string().starts_with(expected), "{}", err);
    }

    #[rstest(input, offset,
        case(vec![0x00, 0x00], 0),
        case(vec![0x05, 0x00, 0x00, 0x00], 2),
        case(vec![0x30, 0x04, 0x05, 0x00, 0x00, 0x00], 4),
    )]
    fn test_decode_unexpected_end_of_contents(input: Vec<u8>, offset: u64) {
        let mut reader = Asn1Reader::new(input.as_slice());
        let result = loop {
            match reader.read_next_value() {
                Ok(Some(_)) => continue,
                other => break other,
            }
        };
        assert!(matches!(
            result,
            Err(Error::UnexpectedEndOfContents { offset: o }) if o == offset
        ));
    }

    #[test]
    fn test_decode_truncation_at_every_cut_point() {
        let inputs: Vec<Vec<u8>> = vec![
            vec![0x30, 0x08, 0x02, 0x01, 0x01, 0xa0, 0x03, 0x01, 0x01, 0xff],
            vec![0x30, 0x80, 0x02, 0x01, 0x01, 0x24, 0x80, 0x04, 0x01, 0xaa, 0x00, 0x00, 0x00, 0x00],
            vec![0x04, 0x81, 0x80].into_iter().chain(std::iter::repeat_n(0x5a, 0x80)).collect(),
            vec![0xa1, 0x80, 0x05, 0x00, 0x05, 0x00, 0x00, 0x00],
        ];
        for input in inputs {
            assert!(decode(&input).unwrap().is_some());
            for cut in 1..input.len() {
                let result = decode(&input[..cut]);
                assert!(
                    matches!(result, Err(Error::Ber(ber::error::Error::TruncatedInput { .. }))),
                    "cut at {} of {:02x?}: {:?}",
                    cut,
                    input,
                    result
                );
            }
        }
    }

    #[test]
    fn test_decode_truncated_offset_is_absolute() {
        // the inner OCTET STRING claims 5 octets but its parent only holds 2
        let input = [0x30, 0x04, 0x04, 0x05, 0x01, 0x02];
        assert!(matches!(
            decode(&input),
            Err(Error::Ber(ber::error::Error::TruncatedInput { offset: 6, needed: 3 }))
        ));
    }

    fn nested_sequences(depth: usize) -> Vec<u8> {
        let mut encoded = vec![0x05, 0x00];
        for _ in 0..depth {
            let mut outer = vec![0x30, encoded.len() as u8];
            outer.extend(encoded);
            encoded = outer;
        }
        encoded
    }

    #[rstest(depth, max_depth, ok,
        case(3, 3, true),
        case(4, 3, false),
        case(10, 64, true),
        case(0, 0, true),
        case(1, 0, false),
    )]
    fn test_decode_depth_limit(depth: usize, max_depth: usize, ok: bool) {
        let input = nested_sequences(depth);
        let result = Asn1Reader::new(input.as_slice())
            .options(DecodeOptions::default().with_max_depth(max_depth))
            .read_next_value();
        if ok {
            assert!(result.unwrap().is_some());
        } else {
            assert!(matches!(result, Err(Error::DepthExceeded { limit }) if limit == max_depth));
        }
    }

    #[test]
    fn test_decode_depth_limit_indefinite() {
        let mut input = Vec::new();
        for _ in 0..100 {
            input.extend([0x30, 0x80]);
        }
        for _ in 0..100 {
            input.extend([0x00, 0x00]);
        }
        assert!(matches!(
            decode(&input),
            Err(Error::DepthExceeded { limit: 64 })
        ));
    }

    #[test]
    fn test_reader_iterates_over_top_level_values() {
        let input = [0x02, 0x01, 0x01, 0x05, 0x00, 0x30, 0x80, 0x00, 0x00];
        let values = Asn1Reader::new(&input[..])
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            vec![int(1), Element::Null, sequence(vec![], Framing::Indefinite)],
            values
        );
    }

    #[test]
    fn test_reader_stops_after_error() {
        let input = [0x02, 0x01, 0x01, 0x03, 0x01, 0x09, 0x05, 0x00];
        let mut reader = Asn1Reader::new(&input[..]);
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_reports_position() {
        let input = [0x05, 0x00, 0x02, 0x01, 0x07];
        let mut reader = Asn1Reader::new(&input[..]);
        reader.read_next_value().unwrap();
        assert_eq!(2, reader.position());
        reader.read_next_value().unwrap();
        assert_eq!(5, reader.position());
        assert!(reader.into_inner().is_empty());
    }

    #[test]
    fn test_unknown_constructed_universal_is_kept() {
        let input = [0x28, 0x02, 0x05, 0x00];
        assert_eq!(
            Element::Unknown(UnknownTag::new(Tag::try_from(0x28).unwrap(), vec![0x05, 0x00])),
            decode_one(&input)
        );
    }
}
