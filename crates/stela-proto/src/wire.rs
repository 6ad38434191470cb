//! Wire format utilities.
//!
//! [`WireReader`] is a bounds-checked cursor over a received packet: every
//! read either returns the requested bytes or fails with the offending
//! offset. [`WireWriter`] appends big-endian fields to a growing response
//! buffer and supports patching already-written positions, which the
//! responder uses to fix up header flags and counts after the answer
//! section is assembled.

use crate::error::{Error, Result};
use crate::name::Name;
use bytes::{BufMut, Bytes, BytesMut};

/// A cursor for reading DNS wire format data.
///
/// Bounds are checked on every access; the reader never panics on
/// truncated input.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    /// The underlying packet.
    data: &'a [u8],
    /// Current position.
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader positioned at the start of the buffer.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at the given offset.
    #[inline]
    pub const fn new_at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Returns the current position.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true if there are no remaining bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(Error::unexpected_eof(self.pos));
        }
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        if self.pos + 2 > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + 2));
        }
        let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    /// Reads a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        if self.pos + 4 > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + 4));
        }
        let value = u32::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    /// Reads a slice of bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(Error::unexpected_eof(self.pos + len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads a domain name, resolving compression pointers.
    ///
    /// The position advances past the name's span at this nesting level:
    /// up to and including the terminating zero label, or the first
    /// compression pointer if the name uses one. Pointer targets elsewhere
    /// in the packet are followed without moving the cursor there.
    pub fn read_name(&mut self) -> Result<Name> {
        let (name, next) = Name::parse(self.data, self.pos)?;
        self.pos = next;
        Ok(name)
    }
}

/// A writer for DNS wire format data.
///
/// Wraps a `BytesMut`; appends never fail. Size enforcement happens after
/// assembly via [`WireWriter::truncate`], matching the responder's
/// whole-message truncation policy.
#[derive(Debug, Default)]
pub struct WireWriter {
    /// The underlying buffer.
    buf: BytesMut,
}

impl WireWriter {
    /// Creates an empty wire writer.
    pub fn new() -> Self {
        Self { buf: BytesMut::new() }
    }

    /// Creates a wire writer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the current length.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Writes a big-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    /// Writes a big-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    /// Writes a slice of bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Overwrites a big-endian u16 at a previously written position.
    ///
    /// Used to fill in header flags, section counts, and RDLENGTH fields
    /// once their values are known. Out-of-range offsets are ignored.
    pub fn patch_u16(&mut self, offset: usize, value: u16) {
        if offset + 2 <= self.buf.len() {
            self.buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
        }
    }

    /// Cuts the buffer down to `len` bytes; no-op if already shorter.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Returns a view of the written bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the data as frozen bytes.
    #[inline]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_reader() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A];
        let mut reader = WireReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x12);
        assert_eq!(reader.read_u16().unwrap(), 0x3456);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x78, 0x9A]);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_wire_reader_bounds() {
        let data = [0x12, 0x34];
        let mut reader = WireReader::new(&data);

        assert_eq!(
            reader.read_u32(),
            Err(Error::unexpected_eof(4)),
        );
        // A failed read must not move the cursor.
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn test_wire_reader_offset() {
        let data = [0xFF, 0xFF, 0x00, 0x2A];
        let mut reader = WireReader::new_at(&data, 2);

        assert_eq!(reader.read_u16().unwrap(), 0x002A);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_wire_reader_read_name() {
        // "example.com" followed by trailing data
        let data = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, 0xDE, 0xAD,
        ];
        let mut reader = WireReader::new(&data);

        let name = reader.read_name().unwrap();
        assert_eq!(name.to_string(), "example.com");
        assert_eq!(reader.position(), 13);
        assert_eq!(reader.read_u16().unwrap(), 0xDEAD);
    }

    #[test]
    fn test_wire_writer() {
        let mut writer = WireWriter::with_capacity(16);

        writer.write_u8(0x12);
        writer.write_u16(0x3456);
        writer.write_u32(0x789A_BCDE);

        assert_eq!(writer.len(), 7);
        assert_eq!(
            writer.as_bytes(),
            &[0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE]
        );
    }

    #[test]
    fn test_wire_writer_patch() {
        let mut writer = WireWriter::new();
        writer.write_u16(0x0000);
        writer.write_u16(0xFFFF);

        writer.patch_u16(0, 0x8180);
        assert_eq!(writer.as_bytes(), &[0x81, 0x80, 0xFF, 0xFF]);

        // Out of range is ignored
        writer.patch_u16(3, 0x1234);
        assert_eq!(writer.as_bytes(), &[0x81, 0x80, 0xFF, 0xFF]);
    }

    #[test]
    fn test_wire_writer_truncate() {
        let mut writer = WireWriter::new();
        writer.write_bytes(&[1, 2, 3, 4, 5, 6]);

        writer.truncate(4);
        assert_eq!(writer.as_bytes(), &[1, 2, 3, 4]);

        writer.truncate(10);
        assert_eq!(writer.len(), 4);

        assert_eq!(&writer.freeze()[..], &[1, 2, 3, 4]);
    }
}
