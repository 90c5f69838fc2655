//! Tag-prefixed binary wire codec for instrument command streams.
//!
//! This is the core value-add layer of rfstim. Every value travels as a
//! single leading tag byte (a MessagePack-compatible subset: integers,
//! float64, strings, sequences and key-ordered maps) followed by a
//! width-minimal, big-endian payload. The tag alone determines the decode
//! path — no external type hint is transmitted.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod order;
pub mod stream;

pub use buffer::WireBuffer;
pub use codec::{OrdF64, WireValue};
pub use error::{Result, WireError};
pub use stream::WireStream;
