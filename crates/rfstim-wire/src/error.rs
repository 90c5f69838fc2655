/// Errors that can occur during wire encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A decode tried to read more bytes than remain unread in the buffer.
    #[error("read past end of buffer (needed {needed} bytes, {remaining} remaining)")]
    OutOfRange { needed: usize, remaining: usize },

    /// The leading tag byte does not belong to the shape being decoded.
    #[error("unexpected wire tag 0x{tag:02X} while decoding {expected}")]
    UnexpectedTag { tag: u8, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, WireError>;
