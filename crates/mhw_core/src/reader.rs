use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Result, SaveError};

/// Little-endian cursor over a decrypted save buffer.
///
/// Every read and skip is bounds checked against the borrowed slice; an
/// overrun returns [`SaveError::OutOfRange`] and the cursor should not be
/// used for the rest of the slot.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.take(2).map(LittleEndian::read_u16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.take(4).map(LittleEndian::read_u32)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.take(8).map(LittleEndian::read_i64)
    }

    pub fn read_u16_vec(&mut self, n: usize) -> Result<Vec<u16>> {
        let mut result = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.read_u16()?);
        }
        Ok(result)
    }

    pub fn read_u32_array<const N: usize>(&mut self) -> Result<[u32; N]> {
        let mut result = [0u32; N];
        for item in &mut result {
            *item = self.read_u32()?;
        }
        Ok(result)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Read a fixed-width field and trim it at the first NUL.
    pub fn read_fixed_cstr(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.take(n)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(n);
        Ok(&bytes[..end])
    }

    /// Move relative to the current position without interpreting bytes.
    pub fn skip(&mut self, n: i64) -> Result<()> {
        let target = i64::try_from(self.position)
            .ok()
            .and_then(|pos| pos.checked_add(n))
            .filter(|&target| target >= 0 && target as u64 <= self.data.len() as u64)
            .ok_or(SaveError::OutOfRange {
                position: self.position,
                wanted: n,
                len: self.data.len(),
            })?;
        self.position = target as usize;
        Ok(())
    }

    pub fn skip_bytes(&mut self, n: usize) -> Result<()> {
        self.skip(i64::try_from(n).unwrap_or(i64::MAX))
    }

    pub fn seek_absolute(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(SaveError::OutOfRange {
                position: self.position,
                wanted: offset as i64 - self.position as i64,
                len: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(SaveError::OutOfRange {
                position: self.position,
                wanted: n as i64,
                len: self.data.len(),
            })?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}
