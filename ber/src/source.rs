use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};
use crate::{INDEFINITE_LENGTH, Length, MAX_LENGTH_OCTETS, Tag};

const READ_CHUNK: usize = 4096;

/// A byte source that remembers how many octets it has handed out.
///
/// Wraps any reader; short reads and `Interrupted` errors are retried until
/// the request is satisfied or the reader reports end of stream. A source
/// built over a nested buffer can start counting at the buffer's offset in
/// the enclosing stream so that error offsets stay absolute.
#[derive(Debug)]
pub struct Source<R> {
    inner: R,
    position: u64,
}

impl<R: Read> Source<R> {
    pub fn new(inner: R) -> Self {
        Self::with_offset(inner, 0)
    }

    pub fn with_offset(inner: R, offset: u64) -> Self {
        Source {
            inner,
            position: offset,
        }
    }

    /// Offset of the next octet to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads one identifier octet.
    ///
    /// Returns `Ok(None)` when the stream is exhausted. This is the only
    /// end-of-input signal that is not an error.
    pub fn read_tag_octet(&mut self) -> Result<Option<Tag>> {
        match self.read_octet()? {
            Some(octet) => Tag::try_from(octet).map(Some),
            None => Ok(None),
        }
    }

    /// Reads a length field in short, long or indefinite form.
    pub fn read_length(&mut self) -> Result<Length> {
        let offset = self.position;
        let first = self.require_octet(1)?;
        if first < 0x80 {
            return Ok(Length::Definite(usize::from(first)));
        }
        if first == INDEFINITE_LENGTH {
            return Ok(Length::Indefinite);
        }

        // long form: low 7 bits count the big-endian length octets that follow
        let count = usize::from(first & 0x7f);
        if count > MAX_LENGTH_OCTETS {
            return Err(Error::MalformedLength {
                offset,
                reason: "length field uses more than 4 octets",
            });
        }
        let mut length = 0u32;
        for i in 0..count {
            let next = self.require_octet(count - i)?;
            length = (length << 8) | u32::from(next);
        }
        if length > i32::MAX as u32 {
            return Err(Error::MalformedLength {
                offset,
                reason: "length does not fit in 31 bits",
            });
        }
        usize::try_from(length)
            .map(Length::Definite)
            .map_err(|_| Error::MalformedLength {
                offset,
                reason: "length exceeds the address space",
            })
    }

    /// Reads exactly `len` octets.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        // grow with the data actually received, not with the declared length
        let mut contents = Vec::with_capacity(len.min(READ_CHUNK));
        let mut chunk = [0u8; READ_CHUNK];
        while contents.len() < len {
            let want = (len - contents.len()).min(READ_CHUNK);
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => {
                    return Err(Error::TruncatedInput {
                        offset: self.position,
                        needed: len - contents.len(),
                    });
                }
                Ok(n) => {
                    contents.extend_from_slice(&chunk[..n]);
                    self.position += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(contents)
    }

    fn read_octet(&mut self) -> Result<Option<u8>> {
        let mut octet = [0u8; 1];
        loop {
            match self.inner.read(&mut octet) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(octet[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    fn require_octet(&mut self, needed: usize) -> Result<u8> {
        self.read_octet()?.ok_or(Error::TruncatedInput {
            offset: self.position,
            needed,
        })
    }
}
