//! Error types for schema loading and code generation

use flexproto_wire::WireError;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type alias for the reference codec
pub type CodecResult<T> = Result<T, CodecError>;

/// Fatal errors raised while loading a schema or generating code
///
/// Every variant aborts the run before any output is committed.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A field's type token could not be classified
    #[error("unresolved type `{unresolved}` in field `{struct_name}.{field}` (declared as `{token}`)")]
    UnresolvedType {
        struct_name: String,
        field: String,
        token: String,
        unresolved: String,
    },

    /// `fixarray_N_T` with an N that is not a positive integer
    #[error(
        "malformed fixed array size in field `{struct_name}.{field}`: `{token}` (expected fixarray_<N>_<TYPE> with N >= 1)"
    )]
    MalformedFixedArraySize {
        struct_name: String,
        field: String,
        token: String,
    },

    /// Two definitions collide within one uniqueness scope
    #[error("duplicate {scope} name `{name}`")]
    DuplicateName { scope: String, name: String },

    /// Structs that embed each other by value
    #[error("direct embedding cycle: {}", path.join(" -> "))]
    DirectEmbeddingCycle { path: Vec<String> },

    /// A type enum member that names no known type
    #[error("type enum `{type_enum}` member `{token}` does not name a known type")]
    UnresolvedTypeEnumMember { type_enum: String, token: String },

    /// Enum underlying type is not a basic integer type
    #[error("enum `{enum_name}` has invalid underlying type `{token}`")]
    InvalidEnumRepr { enum_name: String, token: String },

    /// Enum constant value does not fit the underlying type
    #[error("enum `{enum_name}` constant `{constant}` = {value} does not fit `{repr}`")]
    EnumValueOutOfRange {
        enum_name: String,
        constant: String,
        value: i128,
        repr: String,
    },

    /// A reference to a definition that is not part of the document
    #[error("unknown reference `{0}`")]
    UnknownReference(String),

    /// Malformed schema text
    #[error("schema parse error: {0}")]
    Parse(String),

    /// Failure reading the schema source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Short stable name of the error kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaError::UnresolvedType { .. } => "unresolved_type",
            SchemaError::MalformedFixedArraySize { .. } => "malformed_fixed_array_size",
            SchemaError::DuplicateName { .. } => "duplicate_name",
            SchemaError::DirectEmbeddingCycle { .. } => "direct_embedding_cycle",
            SchemaError::UnresolvedTypeEnumMember { .. } => "unresolved_type_enum_member",
            SchemaError::InvalidEnumRepr { .. } => "invalid_enum_repr",
            SchemaError::EnumValueOutOfRange { .. } => "enum_value_out_of_range",
            SchemaError::UnknownReference(_) => "unknown_reference",
            SchemaError::Parse(_) => "parse",
            SchemaError::Io(_) => "io",
        }
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

/// Errors from encoding or decoding dynamic values against a schema
///
/// `path` locates the offending value, e.g. `Scene.bodies[2].name`.
#[derive(Error, Debug)]
pub enum CodecError {
    /// No struct of that name in the document
    #[error("unknown struct `{0}`")]
    UnknownStruct(String),

    /// The struct is external and has no field list to drive the codec
    #[error("struct `{0}` is external and has no declared fields")]
    ExternalStruct(String),

    /// A struct value lacks one of the declared fields
    #[error("missing field `{path}`")]
    MissingField { path: String },

    /// The value's kind does not match the field type
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An integer that does not fit the field's integer type
    #[error("value {value} at `{path}` does not fit `{ty}`")]
    OutOfRange {
        path: String,
        value: i128,
        ty: &'static str,
    },

    /// A fixed array value with the wrong number of elements
    #[error("fixed array `{path}` needs {expected} elements, got {actual}")]
    FixedArrayLength {
        path: String,
        expected: usize,
        actual: usize,
    },

    /// An array of zero-byte elements whose count exceeds the decode limit
    #[error("array `{path}` claims {count} elements that encode to no bytes (limit {limit})")]
    EmptyElementCount {
        path: String,
        count: usize,
        limit: usize,
    },

    /// Wire-level failure while reading or writing `path`
    #[error("wire error at `{path}`: {source}")]
    Wire {
        path: String,
        #[source]
        source: WireError,
    },

    /// The document itself is inconsistent
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
