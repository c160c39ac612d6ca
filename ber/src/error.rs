//! Error types for reading BER headers and contents.

use thiserror::Error;

/// Errors raised while reading tag octets, length fields and contents.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream ended before a declared length, a length field or an
    /// end-of-contents marker was satisfied.
    #[error("truncated input at offset {offset}: {needed} more octet(s) required")]
    TruncatedInput { offset: u64, needed: usize },

    /// The length field uses more than 4 octets, or its magnitude does not
    /// fit in 31 bits.
    #[error("malformed length at offset {offset}: {reason}")]
    MalformedLength { offset: u64, reason: &'static str },

    /// The identifier octet uses the high-tag-number form (tag number 31).
    #[error("unsupported high tag number in identifier octet 0x{0:02x}")]
    UnsupportedHighTagNumber(u8),

    /// The underlying byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
