//! Error types for the flex wire format

use thiserror::Error;

/// Result type alias for wire operations
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while encoding or decoding flex data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A read would go past the end of the input
    #[error("buffer underrun: needed {needed} byte(s), {available} available")]
    BufferUnderrun { needed: usize, available: usize },

    /// A write would go past the end of a fixed-capacity output
    #[error("buffer overflow: needed {needed} byte(s), {available} available")]
    BufferOverflow { needed: usize, available: usize },

    /// A varint does not fit the integer width it is decoded into
    #[error("varint exceeds {bits}-bit range")]
    VarintOverflow { bits: u32 },

    /// A length or count prefix does not fit in `usize`
    #[error("length prefix {0} does not fit in memory")]
    LengthOverflow(u64),

    /// String bytes are not valid UTF-8
    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    /// Input left over after a complete value was decoded
    #[error("{remaining} trailing byte(s) after value")]
    TrailingBytes { remaining: usize },
}

impl WireError {
    /// Short stable name of the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            WireError::BufferUnderrun { .. } => "buffer_underrun",
            WireError::BufferOverflow { .. } => "buffer_overflow",
            WireError::VarintOverflow { .. } => "varint_overflow",
            WireError::LengthOverflow(_) => "length_overflow",
            WireError::InvalidUtf8(_) => "invalid_utf8",
            WireError::TrailingBytes { .. } => "trailing_bytes",
        }
    }
}

impl From<std::string::FromUtf8Error> for WireError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WireError::InvalidUtf8(err.utf8_error().to_string())
    }
}
