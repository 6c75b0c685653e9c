use super::error::WireError;
use super::varint;

/// Sequential reader over a bounded payload slice.
///
/// Fixed-width integers are big-endian. `read_u32` is the protocol varint,
/// not a fixed-width read; container framing uses its own fixed reads.
pub struct WireReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let byte = self
            .payload
            .get(self.offset)
            .copied()
            .ok_or_else(|| self.short(1))?;
        self.offset += 1;
        Ok(byte)
    }

    /// Single byte where any nonzero value means `true`.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        varint::decode_u32_with(|| self.read_u8())
    }

    pub fn read_s32(&mut self) -> Result<i32, WireError> {
        self.read_u32().map(varint::signed_from_varint)
    }

    /// Exactly `len` bytes; `len == 0` returns an empty slice without reading.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if len == 0 {
            return Ok(&[]);
        }
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.payload.len())
            .ok_or_else(|| self.short(len))?;
        let payload = self.payload;
        let bytes = &payload[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Varint length followed by that many big-endian 16-bit code units.
    ///
    /// Each unit becomes one `char`; units that are not scalar values
    /// (lone surrogates) become U+FFFD instead of failing the read.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let units = self.read_u32()? as usize;
        let len = units.checked_mul(2).ok_or_else(|| self.short(units))?;
        let bytes = self.read_bytes(len)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|unit| u32::from(u16::from_be_bytes([unit[0], unit[1]])))
            .map(|unit| char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect())
    }

    fn short(&self, needed: usize) -> WireError {
        WireError::ShortRead {
            offset: self.offset,
            needed,
            available: self.remaining(),
        }
    }
}
