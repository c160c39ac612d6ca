//! Character string kinds.
//!
//! Every kind stores its content octets unchanged. `to_text` decodes them
//! according to the kind's character repertoire and `new` encodes text into
//! the kind's octet form.

use std::fmt::Display;

use crate::error::{Error, Result};

macro_rules! character_string {
    ($(#[$meta:meta])* $name:ident, $label:literal, $encode:path, $decode:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            contents: Vec<u8>,
        }

        impl $name {
            pub fn new(text: &str) -> Self {
                $name {
                    contents: $encode(text),
                }
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.contents
            }

            pub fn into_bytes(self) -> Vec<u8> {
                self.contents
            }

            pub fn to_text(&self) -> Result<String> {
                $decode(&self.contents).ok_or(Error::InvalidStringEncoding { kind: $label })
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(contents: Vec<u8>) -> Self {
                $name { contents }
            }
        }

        impl From<&[u8]> for $name {
            fn from(contents: &[u8]) -> Self {
                $name {
                    contents: contents.to_vec(),
                }
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.contents
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.to_text() {
                    Ok(text) => write!(f, "{}", text),
                    Err(_) => write!(f, "{}", String::from_utf8_lossy(&self.contents)),
                }
            }
        }
    };
}

character_string!(Utf8String, "UTF8String", encode_utf8, decode_utf8);
character_string!(
    /// The restricted set `A-Z a-z 0-9 ' ( ) + , - . / : = ?` and space.
    PrintableString,
    "PrintableString",
    encode_utf8,
    decode_octets
);
character_string!(
    /// International Alphabet No. 5, in practice ASCII.
    Ia5String,
    "IA5String",
    encode_utf8,
    decode_octets
);
character_string!(T61String, "T61String", encode_utf8, decode_octets);
character_string!(VisibleString, "VisibleString", encode_utf8, decode_octets);
character_string!(
    /// UCS-4, four big-endian octets per character.
    UniversalString,
    "UniversalString",
    encode_utf32be,
    decode_utf32be
);
character_string!(
    /// UCS-2, two big-endian octets per character. Characters outside the
    /// Basic Multilingual Plane are written as UTF-16 surrogate pairs.
    BmpString,
    "BMPString",
    encode_utf16be,
    decode_utf16be
);

fn encode_utf8(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

fn encode_utf16be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn encode_utf32be(text: &str) -> Vec<u8> {
    text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect()
}

fn decode_utf8(contents: &[u8]) -> Option<String> {
    String::from_utf8(contents.to_vec()).ok()
}

// one octet per character, read as ISO 8859-1
fn decode_octets(contents: &[u8]) -> Option<String> {
    Some(contents.iter().map(|&b| char::from(b)).collect())
}

fn decode_utf16be(contents: &[u8]) -> Option<String> {
    if contents.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = contents
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

fn decode_utf32be(contents: &[u8]) -> Option<String> {
    if contents.len() % 4 != 0 {
        return None;
    }
    contents
        .chunks_exact(4)
        .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
        .collect()
}
