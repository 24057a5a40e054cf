//! Encode/decode traits and the composite wire forms

use crate::buffer::{FlexReader, Sink};
use crate::error::{WireError, WireResult};
use crate::varint::{MAX_VARINT_LEN, decode_int, decode_unsigned, encode_int, encode_unsigned};

/// Trait for values with a flex wire encoding
pub trait FlexEncode {
    /// Append the encoded value to `out`
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()>;
}

/// Trait for values that can be decoded from flex wire data
pub trait FlexDecode: Sized {
    /// Decode one value, advancing `input` past it
    fn decode(input: &mut FlexReader<'_>) -> WireResult<Self>;
}

macro_rules! impl_codec_int {
    ($($t:ty),*) => {
        $(
            impl FlexEncode for $t {
                fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
                    encode_int(out, *self)
                }
            }

            impl FlexDecode for $t {
                fn decode(input: &mut FlexReader<'_>) -> WireResult<Self> {
                    decode_int::<$t>(input)
                }
            }
        )*
    };
}

impl_codec_int!(u8, u16, u32, u64, i8, i16, i32, i64);

fn read_len(input: &mut FlexReader<'_>) -> WireResult<usize> {
    let raw = decode_unsigned(input, MAX_VARINT_LEN)?;
    usize::try_from(raw).map_err(|_| WireError::LengthOverflow(raw))
}

/// Write a length prefix followed by the raw bytes
pub fn encode_bytes<S: Sink + ?Sized>(out: &mut S, bytes: &[u8]) -> WireResult<()> {
    encode_unsigned(out, bytes.len() as u64)?;
    out.put(bytes)
}

/// Read a length prefix and borrow that many bytes from the input
pub fn decode_bytes<'a>(input: &mut FlexReader<'a>) -> WireResult<&'a [u8]> {
    let len = read_len(input)?;
    input.take(len)
}

/// Encode a string as length-prefixed UTF-8
pub fn encode_string<S: Sink + ?Sized>(out: &mut S, value: &str) -> WireResult<()> {
    encode_bytes(out, value.as_bytes())
}

/// Decode a length-prefixed UTF-8 string
pub fn decode_string(input: &mut FlexReader<'_>) -> WireResult<String> {
    let bytes = decode_bytes(input)?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Decode a length-prefixed opaque byte sequence
pub fn decode_blob(input: &mut FlexReader<'_>) -> WireResult<Vec<u8>> {
    Ok(decode_bytes(input)?.to_vec())
}

/// Encode a count prefix followed by each element, using `element` as the
/// element codec
pub fn encode_variable_array<T, S, F>(out: &mut S, items: &[T], mut element: F) -> WireResult<()>
where
    S: Sink + ?Sized,
    F: FnMut(&mut S, &T) -> WireResult<()>,
{
    encode_unsigned(out, items.len() as u64)?;
    for item in items {
        element(out, item)?;
    }
    Ok(())
}

/// Decode a count prefix and that many elements
///
/// Elements may encode to zero bytes, so the count is not checked against
/// the remaining input; preallocation is bounded by it instead.
pub fn decode_variable_array<T, F>(input: &mut FlexReader<'_>, mut element: F) -> WireResult<Vec<T>>
where
    F: FnMut(&mut FlexReader<'_>) -> WireResult<T>,
{
    let count = read_len(input)?;
    let mut items = Vec::with_capacity(count.min(input.remaining()));
    for _ in 0..count {
        items.push(element(input)?);
    }
    Ok(items)
}

/// Encode exactly the elements of `items`, without a count prefix
pub fn encode_fixed_array<T, S, F>(out: &mut S, items: &[T], mut element: F) -> WireResult<()>
where
    S: Sink + ?Sized,
    F: FnMut(&mut S, &T) -> WireResult<()>,
{
    for item in items {
        element(out, item)?;
    }
    Ok(())
}

/// Decode exactly `N` elements
///
/// Fails with [`WireError::BufferUnderrun`] at the first element the input
/// cannot hold.
pub fn decode_fixed_array<T, F, const N: usize>(
    input: &mut FlexReader<'_>,
    mut element: F,
) -> WireResult<[T; N]>
where
    F: FnMut(&mut FlexReader<'_>) -> WireResult<T>,
{
    let mut items = Vec::with_capacity(N);
    for _ in 0..N {
        items.push(element(input)?);
    }
    items
        .try_into()
        .map_err(|items: Vec<T>| WireError::BufferUnderrun {
            needed: N,
            available: items.len(),
        })
}

impl FlexEncode for String {
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
        encode_string(out, self)
    }
}

impl FlexEncode for str {
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
        encode_string(out, self)
    }
}

impl FlexDecode for String {
    fn decode(input: &mut FlexReader<'_>) -> WireResult<Self> {
        decode_string(input)
    }
}

/// Opaque byte sequence with the string wire form
///
/// A `Vec<u8>` is a variable array of `u8` and varint-encodes every byte; a
/// `Blob` copies the bytes raw after the length prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob(bytes)
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FlexEncode for Blob {
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
        encode_bytes(out, &self.0)
    }
}

impl FlexDecode for Blob {
    fn decode(input: &mut FlexReader<'_>) -> WireResult<Self> {
        decode_blob(input).map(Blob)
    }
}

impl<T: FlexEncode> FlexEncode for Vec<T> {
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
        encode_variable_array(out, self, |out, item| item.encode(out))
    }
}

impl<T: FlexDecode> FlexDecode for Vec<T> {
    fn decode(input: &mut FlexReader<'_>) -> WireResult<Self> {
        decode_variable_array(input, T::decode)
    }
}

impl<T: FlexEncode, const N: usize> FlexEncode for [T; N] {
    fn encode<S: Sink + ?Sized>(&self, out: &mut S) -> WireResult<()> {
        encode_fixed_array(out, self, |out, item| item.encode(out))
    }
}

impl<T: FlexDecode, const N: usize> FlexDecode for [T; N] {
    fn decode(input: &mut FlexReader<'_>) -> WireResult<Self> {
        decode_fixed_array(input, T::decode)
    }
}

/// Encode a value into a fresh buffer
pub fn to_vec<T: FlexEncode + ?Sized>(value: &T) -> WireResult<Vec<u8>> {
    let mut out = Vec::new();
    value.encode(&mut out)?;
    Ok(out)
}

/// Decode a value that must span all of `bytes`
pub fn from_slice<T: FlexDecode>(bytes: &[u8]) -> WireResult<T> {
    let mut input = FlexReader::new(bytes);
    let value = T::decode(&mut input)?;
    input.finish()?;
    Ok(value)
}
