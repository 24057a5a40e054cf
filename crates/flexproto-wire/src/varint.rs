//! Base-128 varint encoding of fixed-width integers

use crate::buffer::{FlexReader, Sink};
use crate::error::{WireError, WireResult};
use crate::zigzag::ZigZag;

/// Longest varint this crate produces (a `u64` needs 70 bits of groups)
pub const MAX_VARINT_LEN: usize = 10;

/// Fixed-width integer with a flex wire representation
///
/// Unsigned types are written as-is, signed types are zigzag-encoded at their
/// own width first.
pub trait FlexInt: Copy + Sized {
    /// Upper bound on the encoded size in bytes
    const MAX_ENCODED_SIZE: usize;

    /// Width of the integer type
    const BITS: u32;

    /// Value as written to the wire, before varint encoding
    fn to_wire(self) -> u64;

    /// Rebuild a value from its decoded wire form
    fn from_wire(raw: u64) -> WireResult<Self>;
}

macro_rules! impl_flex_unsigned {
    ($t:ty, $max:expr) => {
        impl FlexInt for $t {
            const MAX_ENCODED_SIZE: usize = $max;
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn to_wire(self) -> u64 {
                u64::from(self)
            }

            #[inline]
            fn from_wire(raw: u64) -> WireResult<Self> {
                <$t>::try_from(raw).map_err(|_| WireError::VarintOverflow { bits: <$t>::BITS })
            }
        }
    };
}

macro_rules! impl_flex_signed {
    ($t:ty, $u:ty, $max:expr) => {
        impl FlexInt for $t {
            const MAX_ENCODED_SIZE: usize = $max;
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn to_wire(self) -> u64 {
                u64::from(self.zigzag())
            }

            #[inline]
            fn from_wire(raw: u64) -> WireResult<Self> {
                let unsigned = <$u>::try_from(raw)
                    .map_err(|_| WireError::VarintOverflow { bits: <$t>::BITS })?;
                Ok(<$t>::unzigzag(unsigned))
            }
        }
    };
}

impl_flex_unsigned!(u8, 2);
impl_flex_unsigned!(u16, 3);
impl_flex_unsigned!(u32, 5);
impl_flex_unsigned!(u64, 10);
impl_flex_signed!(i8, u8, 2);
impl_flex_signed!(i16, u16, 3);
impl_flex_signed!(i32, u32, 5);
impl_flex_signed!(i64, u64, 10);

/// Write `value` as an unsigned varint
///
/// Zero is a single `0x00` byte.
pub fn encode_unsigned<S: Sink + ?Sized>(out: &mut S, mut value: u64) -> WireResult<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = group;
            len += 1;
            break;
        }
        buf[len] = group | 0x80;
        len += 1;
    }
    out.put(&buf[..len])
}

/// Read an unsigned varint of at most `max_len` bytes
///
/// Fails with [`WireError::VarintOverflow`] when the continuation bit is still
/// set after `max_len` bytes, or when a group would shift bits past 64.
pub fn decode_unsigned(input: &mut FlexReader<'_>, max_len: usize) -> WireResult<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for _ in 0..max_len {
        let byte = input.get()?;
        let group = u64::from(byte & 0x7F);
        let shifted = group
            .checked_shl(shift)
            .filter(|shifted| shifted >> shift == group)
            .ok_or(WireError::VarintOverflow { bits: u64::BITS })?;
        value |= shifted;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
    Err(WireError::VarintOverflow { bits: u64::BITS })
}

/// Encode a fixed-width integer
pub fn encode_int<T: FlexInt, S: Sink + ?Sized>(out: &mut S, value: T) -> WireResult<()> {
    encode_unsigned(out, value.to_wire())
}

/// Decode a fixed-width integer, rejecting values outside its range
pub fn decode_int<T: FlexInt>(input: &mut FlexReader<'_>) -> WireResult<T> {
    let raw = decode_unsigned(input, T::MAX_ENCODED_SIZE).map_err(|err| match err {
        WireError::VarintOverflow { .. } => WireError::VarintOverflow { bits: T::BITS },
        other => other,
    })?;
    T::from_wire(raw)
}
