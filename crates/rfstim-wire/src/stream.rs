use crate::buffer::WireBuffer;
use crate::codec::WireValue;
use crate::error::Result;

/// Typed façade over one [`WireBuffer`].
///
/// Carries no state of its own — it exists so multiple typed writes and
/// reads against one message buffer chain ergonomically. A stream is
/// exclusively owned by the single "build a message" (or "decode a
/// message") operation that created it.
#[derive(Debug, Default)]
pub struct WireStream {
    buf: WireBuffer,
}

impl WireStream {
    /// Create an empty stream for writing.
    pub fn new() -> Self {
        Self {
            buf: WireBuffer::new(),
        }
    }

    /// Create a stream over received wire bytes for reading.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            buf: WireBuffer::from_bytes(data),
        }
    }

    /// Append one typed value. Writes cannot fail; returns `self` so
    /// writes chain: `stream.write(&freq_set).write(&power_set)`.
    pub fn write<T: WireValue>(&mut self, value: &T) -> &mut Self {
        value.encode(&mut self.buf);
        self
    }

    /// Read one typed value from the cursor.
    pub fn read<T: WireValue>(&mut self) -> Result<T> {
        T::decode(&mut self.buf)
    }

    /// All bytes written so far, independent of the read cursor.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Total bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes not yet consumed by reads.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}
