//! Type-directed encode/decode for the tag-prefixed wire format.
//!
//! One [`WireValue`] impl exists per supported value shape: integers,
//! `f64`, `String`, homogeneous sequences and key-ordered maps. Dispatch
//! on the encode side is static — the value's type selects the codec; the
//! single leading tag byte is the only runtime-inspected type information,
//! and only on decode.
//!
//! Encoding is always width-minimal (the smallest representation that
//! round-trips the value). Decoding accepts any well-formed width for the
//! requested shape, so an over-wide encoding still decodes correctly.
//! Length prefixes and multi-byte payloads are big-endian on the wire
//! regardless of host endianness.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::buffer::WireBuffer;
use crate::error::{Result, WireError};
use crate::order;

/// Largest positive fixint (encoded as the raw value byte).
pub const POSITIVE_FIXINT_MAX: u8 = 0x7F;
/// Smallest negative fixint tag byte (0xE0..=0xFF, signed interpretation).
pub const NEGATIVE_FIXINT_MIN: u8 = 0xE0;

/// float64 tag; 8 big-endian bytes of IEEE-754 bit pattern follow.
pub const TAG_FLOAT64: u8 = 0xCB;

pub const TAG_UINT8: u8 = 0xCC;
pub const TAG_UINT16: u8 = 0xCD;
pub const TAG_UINT32: u8 = 0xCE;
pub const TAG_UINT64: u8 = 0xCF;

pub const TAG_INT8: u8 = 0xD0;
pub const TAG_INT16: u8 = 0xD1;
pub const TAG_INT32: u8 = 0xD2;
pub const TAG_INT64: u8 = 0xD3;

/// fixstr tag base; length = tag - 0xA0, up to 31 bytes.
pub const FIXSTR_BASE: u8 = 0xA0;
pub const TAG_STR8: u8 = 0xD9;
pub const TAG_STR16: u8 = 0xDA;
pub const TAG_STR32: u8 = 0xDB;

/// fixarray tag base; length = tag - 0x90, up to 15 elements.
pub const FIXARRAY_BASE: u8 = 0x90;
pub const TAG_ARRAY16: u8 = 0xDC;
pub const TAG_ARRAY32: u8 = 0xDD;

/// fixmap tag base; length = tag - 0x80, up to 15 pairs.
pub const FIXMAP_BASE: u8 = 0x80;
pub const TAG_MAP16: u8 = 0xDE;
pub const TAG_MAP32: u8 = 0xDF;

// Decoded collection lengths come off the wire; preallocation is capped so
// a hostile length prefix cannot reserve unbounded memory before the
// element reads fail with OutOfRange.
const MAX_PREALLOC: usize = 4096;

/// A value shape the wire codec understands.
///
/// The impl set is closed: attempting to encode a type without an impl is
/// a compile error, which is the only "unsupported shape" signal this
/// codec has or needs.
pub trait WireValue: Sized {
    /// Append this value's wire form to `buf`. Writes cannot fail.
    fn encode(&self, buf: &mut WireBuffer);

    /// Read one value of this shape from `buf`.
    fn decode(buf: &mut WireBuffer) -> Result<Self>;
}

fn put_u16(buf: &mut WireBuffer, v: u16) {
    buf.write(&order::to_network16(v).to_ne_bytes());
}

fn put_u32(buf: &mut WireBuffer, v: u32) {
    buf.write(&order::to_network32(v).to_ne_bytes());
}

fn put_u64(buf: &mut WireBuffer, v: u64) {
    buf.write(&order::to_network64(v).to_ne_bytes());
}

fn take_u16(buf: &mut WireBuffer) -> Result<u16> {
    Ok(order::to_host16(u16::from_ne_bytes(buf.read_array()?)))
}

fn take_u32(buf: &mut WireBuffer) -> Result<u32> {
    Ok(order::to_host32(u32::from_ne_bytes(buf.read_array()?)))
}

fn take_u64(buf: &mut WireBuffer) -> Result<u64> {
    Ok(order::to_host64(u64::from_ne_bytes(buf.read_array()?)))
}

fn encode_unsigned(buf: &mut WireBuffer, v: u64) {
    if v <= POSITIVE_FIXINT_MAX as u64 {
        buf.write(&[v as u8]);
    } else if v <= u8::MAX as u64 {
        buf.write(&[TAG_UINT8, v as u8]);
    } else if v <= u16::MAX as u64 {
        buf.write(&[TAG_UINT16]);
        put_u16(buf, v as u16);
    } else if v <= u32::MAX as u64 {
        buf.write(&[TAG_UINT32]);
        put_u32(buf, v as u32);
    } else {
        buf.write(&[TAG_UINT64]);
        put_u64(buf, v);
    }
}

fn encode_signed(buf: &mut WireBuffer, v: i64) {
    if v >= 0 {
        encode_unsigned(buf, v as u64);
    } else if v >= -32 {
        buf.write(&[v as i8 as u8]);
    } else if v >= i8::MIN as i64 {
        buf.write(&[TAG_INT8, v as i8 as u8]);
    } else if v >= i16::MIN as i64 {
        buf.write(&[TAG_INT16]);
        put_u16(buf, v as i16 as u16);
    } else if v >= i32::MIN as i64 {
        buf.write(&[TAG_INT32]);
        put_u32(buf, v as i32 as u32);
    } else {
        buf.write(&[TAG_INT64]);
        put_u64(buf, v as u64);
    }
}

/// Tag-driven integer decode, widened into `i128` so every wire width and
/// sign fits losslessly; the caller's impl narrows to its target type.
fn decode_integer(buf: &mut WireBuffer) -> Result<i128> {
    let tag = buf.read_byte()?;
    let value = match tag {
        0x00..=POSITIVE_FIXINT_MAX => tag as i128,
        NEGATIVE_FIXINT_MIN..=0xFF => (tag as i8) as i128,
        TAG_UINT8 => buf.read_byte()? as i128,
        TAG_UINT16 => take_u16(buf)? as i128,
        TAG_UINT32 => take_u32(buf)? as i128,
        TAG_UINT64 => take_u64(buf)? as i128,
        TAG_INT8 => (buf.read_byte()? as i8) as i128,
        TAG_INT16 => (take_u16(buf)? as i16) as i128,
        TAG_INT32 => (take_u32(buf)? as i32) as i128,
        TAG_INT64 => (take_u64(buf)? as i64) as i128,
        _ => {
            return Err(WireError::UnexpectedTag {
                tag,
                expected: "integer",
            })
        }
    };
    Ok(value)
}

macro_rules! impl_wire_unsigned {
    ($($t:ty),*) => {$(
        impl WireValue for $t {
            fn encode(&self, buf: &mut WireBuffer) {
                encode_unsigned(buf, *self as u64);
            }

            fn decode(buf: &mut WireBuffer) -> Result<Self> {
                Ok(decode_integer(buf)? as $t)
            }
        }
    )*};
}

macro_rules! impl_wire_signed {
    ($($t:ty),*) => {$(
        impl WireValue for $t {
            fn encode(&self, buf: &mut WireBuffer) {
                encode_signed(buf, *self as i64);
            }

            fn decode(buf: &mut WireBuffer) -> Result<Self> {
                Ok(decode_integer(buf)? as $t)
            }
        }
    )*};
}

impl_wire_unsigned!(u8, u16, u32, u64, usize);
impl_wire_signed!(i8, i16, i32, i64);

impl WireValue for f64 {
    fn encode(&self, buf: &mut WireBuffer) {
        buf.write(&[TAG_FLOAT64]);
        put_u64(buf, self.to_bits());
    }

    fn decode(buf: &mut WireBuffer) -> Result<Self> {
        let tag = buf.read_byte()?;
        if tag != TAG_FLOAT64 {
            return Err(WireError::UnexpectedTag {
                tag,
                expected: "float64",
            });
        }
        Ok(f64::from_bits(take_u64(buf)?))
    }
}

impl WireValue for String {
    fn encode(&self, buf: &mut WireBuffer) {
        let bytes = self.as_bytes();
        let len = bytes.len();
        if len <= 31 {
            buf.write(&[FIXSTR_BASE + len as u8]);
        } else if len <= u8::MAX as usize {
            buf.write(&[TAG_STR8, len as u8]);
        } else if len <= u16::MAX as usize {
            buf.write(&[TAG_STR16]);
            put_u16(buf, len as u16);
        } else {
            buf.write(&[TAG_STR32]);
            put_u32(buf, len as u32);
        }
        buf.write(bytes);
    }

    fn decode(buf: &mut WireBuffer) -> Result<Self> {
        let tag = buf.read_byte()?;
        let len = match tag {
            FIXSTR_BASE..=0xBF => (tag - FIXSTR_BASE) as usize,
            TAG_STR8 => buf.read_byte()? as usize,
            TAG_STR16 => take_u16(buf)? as usize,
            TAG_STR32 => take_u32(buf)? as usize,
            _ => {
                return Err(WireError::UnexpectedTag {
                    tag,
                    expected: "string",
                })
            }
        };
        let raw = buf.read(len)?;
        Ok(String::from_utf8_lossy(raw).into_owned())
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn encode(&self, buf: &mut WireBuffer) {
        let len = self.len();
        if len <= 15 {
            buf.write(&[FIXARRAY_BASE + len as u8]);
        } else if len <= u16::MAX as usize {
            buf.write(&[TAG_ARRAY16]);
            put_u16(buf, len as u16);
        } else {
            buf.write(&[TAG_ARRAY32]);
            put_u32(buf, len as u32);
        }
        for item in self {
            item.encode(buf);
        }
    }

    fn decode(buf: &mut WireBuffer) -> Result<Self> {
        let tag = buf.read_byte()?;
        let len = match tag {
            FIXARRAY_BASE..=0x9F => (tag - FIXARRAY_BASE) as usize,
            TAG_ARRAY16 => take_u16(buf)? as usize,
            TAG_ARRAY32 => take_u32(buf)? as usize,
            _ => {
                return Err(WireError::UnexpectedTag {
                    tag,
                    expected: "sequence",
                })
            }
        };
        let mut out = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            out.push(T::decode(buf)?);
        }
        Ok(out)
    }
}

impl<K: WireValue + Ord, V: WireValue> WireValue for BTreeMap<K, V> {
    fn encode(&self, buf: &mut WireBuffer) {
        let len = self.len();
        if len <= 15 {
            buf.write(&[FIXMAP_BASE + len as u8]);
        } else if len <= u16::MAX as usize {
            buf.write(&[TAG_MAP16]);
            put_u16(buf, len as u16);
        } else {
            buf.write(&[TAG_MAP32]);
            put_u32(buf, len as u32);
        }
        // BTreeMap iterates in ascending key order, which is the wire order.
        for (key, value) in self {
            key.encode(buf);
            value.encode(buf);
        }
    }

    fn decode(buf: &mut WireBuffer) -> Result<Self> {
        let tag = buf.read_byte()?;
        let len = match tag {
            FIXMAP_BASE..=0x8F => (tag - FIXMAP_BASE) as usize,
            TAG_MAP16 => take_u16(buf)? as usize,
            TAG_MAP32 => take_u32(buf)? as usize,
            _ => {
                return Err(WireError::UnexpectedTag {
                    tag,
                    expected: "map",
                })
            }
        };
        let mut out = BTreeMap::new();
        for _ in 0..len {
            let key = K::decode(buf)?;
            let value = V::decode(buf)?;
            // Duplicate wire keys: last occurrence wins.
            out.insert(key, value);
        }
        Ok(out)
    }
}

/// `f64` with a total order, usable as a map key.
///
/// Frequency and power sets travel as maps keyed by the physical value;
/// `f64` itself is not `Ord`, so keys wear this wrapper in ordered
/// containers. Ordering is `f64::total_cmp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdF64(pub f64);

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for OrdF64 {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl WireValue for OrdF64 {
    fn encode(&self, buf: &mut WireBuffer) {
        self.0.encode(buf);
    }

    fn decode(buf: &mut WireBuffer) -> Result<Self> {
        Ok(Self(f64::decode(buf)?))
    }
}
