//! Error types for decoding BER values and reading typed leaf values.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur while decoding a value tree or converting leaves.
#[derive(Debug, Error)]
pub enum Error {
    /// Header or content octets could not be read.
    #[error(transparent)]
    Ber(#[from] ber::error::Error),

    // Framing errors
    #[error("indefinite length is not allowed for identifier octet 0x{tag:02x}")]
    UnsupportedIndefiniteLength { tag: u8 },
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
    #[error("unexpected end-of-contents marker at offset {offset}")]
    UnexpectedEndOfContents { offset: u64 },

    // Boolean errors
    #[error("BOOLEAN: contents must be exactly one octet, got {0}")]
    InvalidBoolean(usize),

    // Integer errors
    #[error("INTEGER: no data")]
    IntegerNoData,
    #[error("INTEGER: value out of range for i64")]
    IntegerOutOfRangeI64,
    #[error("INTEGER: value out of range for u64")]
    IntegerOutOfRangeU64,

    // ObjectIdentifier errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: arc does not fit in 64 bits")]
    ObjectIdentifierArcOverflow,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,
    #[error("OBJECT IDENTIFIER: invalid component '{0}'")]
    ObjectIdentifierInvalidComponent(String),
    #[error("OBJECT IDENTIFIER: parse int error: {0}")]
    ParseInt(#[source] ParseIntError),

    // BitString errors
    #[error("BIT STRING: no data")]
    BitStringNoData,
    #[error("BIT STRING: unused bits {0} out of range (must be 0-7)")]
    UnsupportedBitStringPadding(u8),

    #[error("NULL: contents must be empty, got {0} octet(s)")]
    NullNotEmpty(usize),

    #[error("constructed OCTET STRING: chunk is not an octet string")]
    OctetStringChunkInvalid,

    // Accessor errors
    #[error("{kind}: contents are not valid text")]
    InvalidStringEncoding { kind: &'static str },
    #[error("UTCTime: invalid format '{0}'")]
    UtcTimeInvalidFormat(String),
    #[error("GeneralizedTime: invalid format '{0}'")]
    GeneralizedTimeInvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
