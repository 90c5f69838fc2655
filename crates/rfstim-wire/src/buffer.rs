use bytes::BytesMut;

use crate::error::{Result, WireError};

const INITIAL_CAPACITY: usize = 256;

/// Append-only byte store with a forward read cursor.
///
/// Writes always append at the end; reads consume sequentially from the
/// cursor. There is no random access and no rewind — one instance carries
/// one message, written once and then read once.
#[derive(Debug, Default)]
pub struct WireBuffer {
    bytes: BytesMut,
    read_pos: usize,
}

impl WireBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            bytes: BytesMut::with_capacity(INITIAL_CAPACITY),
            read_pos: 0,
        }
    }

    /// Create a buffer pre-filled with received wire bytes, cursor at zero.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            bytes: BytesMut::from(data),
            read_pos: 0,
        }
    }

    /// Append bytes at the end. Cannot fail; the buffer grows as needed.
    pub fn write(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Read exactly `n` bytes from the cursor and advance it.
    ///
    /// Fails with [`WireError::OutOfRange`] when fewer than `n` bytes
    /// remain unread; the cursor is not moved on failure.
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        let remaining = self.bytes.len() - self.read_pos;
        if n > remaining {
            return Err(WireError::OutOfRange {
                needed: n,
                remaining,
            });
        }
        let start = self.read_pos;
        self.read_pos += n;
        Ok(&self.bytes[start..start + n])
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    /// Read a fixed-width word as its raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Bytes written so far (read or not).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes not yet consumed by reads.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.read_pos
    }

    /// The full written contents, independent of the read cursor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back() {
        let mut buf = WireBuffer::new();
        buf.write(b"abc");
        buf.write(b"de");

        assert_eq!(buf.len(), 5);
        assert_eq!(buf.read(3).unwrap(), b"abc");
        assert_eq!(buf.read(2).unwrap(), b"de");
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn short_read_fails_without_advancing() {
        let mut buf = WireBuffer::new();
        buf.write(b"xy");

        let err = buf.read(3).unwrap_err();
        assert!(matches!(
            err,
            WireError::OutOfRange {
                needed: 3,
                remaining: 2
            }
        ));
        // Cursor untouched; the two bytes are still readable.
        assert_eq!(buf.read(2).unwrap(), b"xy");
    }

    #[test]
    fn read_from_empty_fails() {
        let mut buf = WireBuffer::new();
        assert!(matches!(
            buf.read_byte(),
            Err(WireError::OutOfRange { .. })
        ));
    }

    #[test]
    fn writes_after_reads_append_at_end() {
        let mut buf = WireBuffer::new();
        buf.write(b"ab");
        assert_eq!(buf.read(1).unwrap(), b"a");
        buf.write(b"c");
        assert_eq!(buf.read(2).unwrap(), b"bc");
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn from_bytes_reads_from_start() {
        let mut buf = WireBuffer::from_bytes(&[1, 2, 3]);
        assert_eq!(buf.read_array::<2>().unwrap(), [1, 2]);
        assert_eq!(buf.read_byte().unwrap(), 3);
    }

    #[test]
    fn zero_length_read_always_succeeds() {
        let mut buf = WireBuffer::new();
        assert_eq!(buf.read(0).unwrap(), b"");
    }
}
