//! Directory-name attribute values.
//!
//! This crate turns the textual value of a distinguished-name attribute,
//! such as the `Tokyo` in `ST=Tokyo`, into the ASN.1 value that carries it.
//! [`DefaultEntryConverter`] picks the narrowest string kind that can hold
//! the text and accepts `#`-prefixed hex for pre-encoded values.
//!
//! Attribute names are mapped to object identifiers through [`OidLookup`];
//! [`StandardAttributes`] covers the names of RFC 4514 and RFC 5280.

pub mod attribute;
pub mod converter;
pub mod error;

pub use attribute::{OidLookup, StandardAttributes};
pub use converter::{
    DefaultEntryConverter, EntryConverter, can_be_printable, can_be_utf8, convert_hex_encoded,
};
pub use error::{Error, Result};
