//! Zigzag transform between signed and unsigned integers of the same width
//!
//! `0, -1, 1, -2, 2, ...` map to `0, 1, 2, 3, 4, ...`, so values of small
//! magnitude stay small after the transform and encode to few varint bytes.

/// Signed integer type with a zigzag mapping onto its unsigned counterpart
pub trait ZigZag: Copy {
    /// Unsigned type of the same width
    type Unsigned: Copy;

    /// Map a signed value to its zigzag form
    fn zigzag(self) -> Self::Unsigned;

    /// Inverse of [`ZigZag::zigzag`]
    fn unzigzag(value: Self::Unsigned) -> Self;
}

macro_rules! impl_zigzag {
    ($signed:ty, $unsigned:ty) => {
        impl ZigZag for $signed {
            type Unsigned = $unsigned;

            #[inline]
            fn zigzag(self) -> $unsigned {
                ((self << 1) ^ (self >> (<$signed>::BITS - 1))) as $unsigned
            }

            #[inline]
            fn unzigzag(value: $unsigned) -> $signed {
                ((value >> 1) as $signed) ^ -((value & 1) as $signed)
            }
        }
    };
}

impl_zigzag!(i8, u8);
impl_zigzag!(i16, u16);
impl_zigzag!(i32, u32);
impl_zigzag!(i64, u64);

/// Zigzag-encode a signed value
///
/// ```
/// use flexproto_wire::zigzag;
///
/// assert_eq!(zigzag(0i32), 0);
/// assert_eq!(zigzag(-1i32), 1);
/// assert_eq!(zigzag(1i32), 2);
/// assert_eq!(zigzag(i8::MIN), u8::MAX);
/// ```
#[inline]
pub fn zigzag<T: ZigZag>(value: T) -> T::Unsigned {
    value.zigzag()
}

/// Decode a zigzag-encoded value back to its signed form
#[inline]
pub fn unzigzag<T: ZigZag>(value: T::Unsigned) -> T {
    T::unzigzag(value)
}
