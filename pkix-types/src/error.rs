use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("hex value: {reason} at offset {offset}")]
    MalformedHex { offset: usize, reason: &'static str },
    #[error("hex value: no octets after '#'")]
    EmptyHexEncoding,
    #[error("unknown attribute name: {0}")]
    UnknownAttribute(String),
    #[error(transparent)]
    Asn1(#[from] asn1::error::Error),
}
