//! # tsuzuri
//!
//! Core traits for moving between the layers of the tsuzuri BER toolkit.
//!
//! This crate defines the `Decoder` and `Encoder` traits that every other
//! crate in the workspace implements for its own types.
//!
//! ## Overview
//!
//! The layers look like this:
//! ```text
//! bytes → (ber primitives) → Element tree → directory-name values
//! ```
//!
//! Raw bytes are turned into a tree of `asn1::Element` nodes with the
//! `Decoder` trait, and nodes are serialized back to bytes with the
//! `Encoder` trait.
//!
//! ## Type Safety
//!
//! The marker traits `DecodableFrom` and `EncodableTo` restrict which
//! conversions exist, so an unsupported pair fails to compile rather than
//! at runtime.
//!
//! ## Example
//!
//! ```ignore
//! use tsuzuri::decoder::Decoder;
//! use tsuzuri::encoder::Encoder;
//! use asn1::ASN1Object;
//!
//! let bytes: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x07];
//! let object: ASN1Object = bytes.decode().unwrap();
//! let encoded: Vec<u8> = object.encode().unwrap();
//! assert_eq!(bytes, encoded.as_slice());
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
