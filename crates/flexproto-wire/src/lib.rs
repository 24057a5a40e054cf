//! flexproto-wire - Flex wire primitives
//!
//! This crate provides:
//! - [`zigzag`] / [`unzigzag`] for mapping signed integers onto unsigned ones
//! - [`FlexInt`] for base-128 varint encoding of fixed-width integers
//! - [`FlexReader`] (bounds-checked input) and the [`Sink`] output trait
//! - [`FlexEncode`] / [`FlexDecode`] for strings, blobs and arrays
//!
//! # Wire format
//!
//! Every integer is written as an unsigned base-128 varint: the low 7 bits of
//! each byte carry data, the high bit flags that more bytes follow, and the
//! least significant group comes first. Signed integers are zigzag-encoded at
//! their own width first, so their size grows with magnitude regardless of
//! sign.
//!
//! Strings and blobs are a varint byte length followed by the raw bytes.
//! Variable-size arrays are a varint count followed by the elements, fixed-size
//! arrays are just the elements. There are no tags or field ids.

mod buffer;
mod codec;
mod error;
mod varint;
mod zigzag;

pub use buffer::{FlexReader, Sink, SliceWriter};
pub use codec::{
    Blob, FlexDecode, FlexEncode, decode_blob, decode_bytes, decode_fixed_array,
    decode_string, decode_variable_array, encode_bytes, encode_fixed_array, encode_string,
    encode_variable_array, from_slice, to_vec,
};
pub use error::{WireError, WireResult};
pub use varint::{FlexInt, MAX_VARINT_LEN, decode_int, decode_unsigned, encode_int, encode_unsigned};
pub use zigzag::{ZigZag, unzigzag, zigzag};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Blob, FlexDecode, FlexEncode, FlexInt, FlexReader, Sink, SliceWriter, WireError,
        WireResult,
    };
}
