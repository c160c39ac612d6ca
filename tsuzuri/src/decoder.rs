//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` converts a source `T` into a destination `D`. The
//! destination opts in through the `DecodableFrom<T>` marker, so only
//! conversions a crate has declared are callable.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use tsuzuri::decoder::{Decoder, DecodableFrom};
//!
//! struct Octets(Vec<u8>);
//! struct Count(usize);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! impl DecodableFrom<Octets> for Count {}
//!
//! impl Decoder<Octets, Count> for Octets {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<Count, Self::Error> {
//!         Ok(Count(self.0.len()))
//!     }
//! }
//! ```
//!
//! # Example
//!
//! The `asn1` crate decodes byte slices into an `ASN1Object` holding every
//! top-level value of the buffer:
//!
//! ```ignore
//! use tsuzuri::decoder::Decoder;
//! use asn1::ASN1Object;
//!
//! let bytes: &[u8] = &[0x05, 0x00, 0x05, 0x00];
//! let object: ASN1Object = bytes.decode().unwrap();
//! assert_eq!(object.elements().len(), 2);
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination type must implement
/// `DecodableFrom<T>`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T> {}
