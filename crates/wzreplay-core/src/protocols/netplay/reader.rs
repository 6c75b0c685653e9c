use crate::protocols::common::WireReader;

use super::error::DecodeError;
use super::model::Coord;

/// Payload reader that tags every failure with the packet type and the
/// field being read.
pub struct PacketReader<'a> {
    inner: WireReader<'a>,
    type_code: u8,
}

impl<'a> PacketReader<'a> {
    pub fn new(type_code: u8, payload: &'a [u8]) -> Self {
        Self {
            inner: WireReader::new(payload),
            type_code,
        }
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        let result = self.inner.read_u8();
        self.tag(result, field)
    }

    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        let result = self.inner.read_bool();
        self.tag(result, field)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        let result = self.inner.read_u16();
        self.tag(result, field)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let result = self.inner.read_u32();
        self.tag(result, field)
    }

    pub fn read_s32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        let result = self.inner.read_s32();
        self.tag(result, field)
    }

    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let result = self.inner.read_string();
        self.tag(result, field)
    }

    pub fn read_coord(&mut self) -> Result<Coord, DecodeError> {
        Ok(Coord {
            x: self.read_s32("coord_x")?,
            y: self.read_s32("coord_y")?,
        })
    }

    /// Varint count, then that many varint deltas added to a running total
    /// starting at zero.
    pub fn read_delta_ids(&mut self, field: &'static str) -> Result<Vec<u32>, DecodeError> {
        let count = self.read_u32(field)?;
        // Every delta takes at least one byte.
        let mut ids = Vec::with_capacity((count as usize).min(self.remaining()));
        let mut total = 0u32;
        for _ in 0..count {
            total = total.wrapping_add(self.read_u32(field)?);
            ids.push(total);
        }
        Ok(ids)
    }

    fn tag<T>(
        &self,
        result: Result<T, crate::protocols::common::WireError>,
        field: &'static str,
    ) -> Result<T, DecodeError> {
        result.map_err(|source| DecodeError::Truncated {
            type_code: self.type_code,
            field,
            source,
        })
    }
}
