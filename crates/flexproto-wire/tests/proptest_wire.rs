//! Property-based tests for the flex wire primitives
//!
//! Every fixed-width integer, string, blob and array must survive an
//! encode/decode round trip, and no decode may read past the end of its
//! input.

use flexproto_wire::{
    Blob, FlexDecode, FlexEncode, FlexInt, FlexReader, WireError, from_slice, to_vec, unzigzag,
    zigzag,
};
use proptest::prelude::*;

fn round_trip<T>(value: T) -> Result<(), TestCaseError>
where
    T: FlexEncode + FlexDecode + PartialEq + std::fmt::Debug,
{
    let bytes = to_vec(&value).expect("encoding into a Vec cannot fail");
    let decoded: T = from_slice(&bytes).expect("decoding what was encoded should succeed");
    prop_assert_eq!(decoded, value);
    Ok(())
}

fn within_max_size<T: FlexInt + FlexEncode>(value: T) -> Result<(), TestCaseError> {
    let bytes = to_vec(&value).expect("encoding into a Vec cannot fail");
    prop_assert!(bytes.len() <= T::MAX_ENCODED_SIZE);
    Ok(())
}

proptest! {
    /// Property: zigzag and unzigzag are mutual inverses
    #[test]
    fn proptest_zigzag_inverse_i64(value in any::<i64>()) {
        prop_assert_eq!(unzigzag::<i64>(zigzag(value)), value);
    }

    #[test]
    fn proptest_zigzag_inverse_i32(value in any::<i32>()) {
        prop_assert_eq!(unzigzag::<i32>(zigzag(value)), value);
    }

    /// Property: zigzag keeps small magnitudes small
    #[test]
    fn proptest_zigzag_magnitude(value in -1_000_000i64..1_000_000) {
        prop_assert!(zigzag(value) <= value.unsigned_abs() * 2);
    }

    /// Property: every integer width round-trips
    #[test]
    fn proptest_u32_roundtrip(value in any::<u32>()) {
        round_trip(value)?;
        within_max_size(value)?;
    }

    #[test]
    fn proptest_i32_roundtrip(value in any::<i32>()) {
        round_trip(value)?;
        within_max_size(value)?;
    }

    #[test]
    fn proptest_u64_roundtrip(value in any::<u64>()) {
        round_trip(value)?;
        within_max_size(value)?;
    }

    #[test]
    fn proptest_i64_roundtrip(value in any::<i64>()) {
        round_trip(value)?;
        within_max_size(value)?;
    }

    /// Property: strings round-trip, including empty and multi-byte lengths
    #[test]
    fn proptest_string_roundtrip(value in ".{0,300}") {
        round_trip(value)?;
    }

    #[test]
    fn proptest_blob_roundtrip(data in prop::collection::vec(any::<u8>(), 0..1_000)) {
        round_trip(Blob(data))?;
    }

    #[test]
    fn proptest_variable_array_roundtrip(items in prop::collection::vec(any::<i16>(), 0..200)) {
        round_trip(items)?;
    }

    #[test]
    fn proptest_fixed_array_roundtrip(items in any::<[i64; 8]>()) {
        round_trip(items)?;
    }

    /// Property: a truncated encoding never decodes and never reads past its end
    #[test]
    fn proptest_truncated_input_is_rejected(
        items in prop::collection::vec(any::<u64>(), 1..50),
        cut in any::<prop::sample::Index>()
    ) {
        let bytes = to_vec(&items).expect("encoding into a Vec cannot fail");
        let cut = cut.index(bytes.len());
        let mut reader = FlexReader::new(&bytes[..cut]);

        let result = Vec::<u64>::decode(&mut reader);

        prop_assert!(
            matches!(result, Err(WireError::BufferUnderrun { .. })),
            "expected BufferUnderrun, got {:?}",
            result
        );
        prop_assert!(reader.position() <= cut);
    }
}

#[test]
fn test_fixed_array_shorter_than_n_elements() {
    let bytes = to_vec(&[1u8, 2, 3]).expect("encoding into a Vec cannot fail");

    let result = from_slice::<[u8; 5]>(&bytes);

    assert!(matches!(result, Err(WireError::BufferUnderrun { .. })));
}
