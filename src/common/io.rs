use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::common::error::{ProbeError, Result};

/// Bounded cursor over an in-memory byte slice.
///
/// All multi-byte reads go through [`byteorder`]; every read fails with
/// [`ProbeError::UnexpectedEof`] when fewer bytes remain than requested.
/// [`ByteReader::peek`] hands out an independent snapshot cursor over the
/// same slice — reads through the snapshot never advance the original,
/// which is what lets format matching stay non-destructive.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// An independent cursor at the current position.
    pub fn peek(&self) -> ByteReader<'a> {
        self.clone()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(ProbeError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    /// 24-bit big-endian field, as used by FLAC block lengths and frame
    /// size bounds.
    pub fn read_u24_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u24(self.take(3)?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_in_order() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16_le().unwrap(), 0x0302);
        assert_eq!(r.read_u16_be().unwrap(), 0x0405);
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.position(), 5);
    }

    #[test]
    fn u24_be() {
        let data = [0x00, 0x06, 0xBA];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u24_be().unwrap(), 0x0006BA);
    }

    #[test]
    fn short_read_is_eof() {
        let data = [0x01, 0x02];
        let mut r = ByteReader::new(&data);
        assert!(matches!(r.read_u32_le(), Err(ProbeError::UnexpectedEof)));
        // A failed read must not consume anything.
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn peek_does_not_advance_origin() {
        let data = [0xAA, 0xBB, 0xCC];
        let r = ByteReader::new(&data);
        let mut p = r.peek();
        assert_eq!(p.read_u16_be().unwrap(), 0xAABB);
        assert_eq!(r.position(), 0);
        assert_eq!(r.remaining(), 3);
    }
}
