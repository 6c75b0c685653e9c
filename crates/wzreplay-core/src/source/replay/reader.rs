use std::io::{ErrorKind, Read};

use crate::protocols::common::varint;

use super::error::ReplayErrorKind;
use super::layout;

/// Sequential reader over the container byte stream.
///
/// Tracks the absolute offset so short reads can say where the input ended.
/// Fixed-width fields are big-endian; packet lengths use the netplay varint.
pub struct StreamReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the 4-byte file signature without validating it.
    pub fn read_magic(&mut self) -> Result<[u8; layout::MAGIC_LEN], ReplayErrorKind> {
        let mut magic = [0u8; layout::MAGIC_LEN];
        self.fill(&mut magic)?;
        Ok(magic)
    }

    pub fn read_u8(&mut self) -> Result<u8, ReplayErrorKind> {
        let mut byte = [0u8; 1];
        self.fill(&mut byte)?;
        Ok(byte[0])
    }

    /// Fixed-width big-endian `u32`, used for container framing.
    pub fn read_be_u32(&mut self) -> Result<u32, ReplayErrorKind> {
        let mut bytes = [0u8; layout::FIXED_FIELD_LEN];
        self.fill(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Netplay varint, used for message lengths.
    pub fn read_varint(&mut self) -> Result<u32, ReplayErrorKind> {
        varint::decode_u32_with(|| self.read_u8())
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the bytes actually delivered, so a corrupt
    /// length fails with `ShortRead` instead of allocating up front.
    ///
    /// # Examples
    /// ```text
    /// use wzreplay_core::source::replay::reader::StreamReader;
    ///
    /// let mut reader = StreamReader::new(&[1u8, 2, 3][..]);
    /// assert_eq!(reader.read_block(2).unwrap(), vec![1, 2]);
    /// assert!(reader.read_block(5).is_err());
    /// ```
    pub fn read_block(&mut self, len: u32) -> Result<Vec<u8>, ReplayErrorKind> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let start = self.offset;
        let mut block = Vec::new();
        let read = (&mut self.inner)
            .take(u64::from(len))
            .read_to_end(&mut block)?;
        self.offset += read as u64;
        if read < len as usize {
            return Err(ReplayErrorKind::ShortRead {
                offset: start,
                needed: u64::from(len),
                available: read as u64,
            });
        }
        Ok(block)
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReplayErrorKind> {
        let start = self.offset;
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ReplayErrorKind::ShortRead {
                        offset: start,
                        needed: buf.len() as u64,
                        available: filled as u64,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.offset += n as u64;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ReplayErrorKind::Io(err)),
            }
        }
        Ok(())
    }
}
