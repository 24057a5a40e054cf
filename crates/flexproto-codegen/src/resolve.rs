//! Type token classification
//!
//! Field type tokens are plain strings in the schema (`int32_t`,
//! `array_Point`, `fixarray_4_uint8_t`, ...). [`TypeResolver`] turns each
//! token into a [`FieldType`] exactly once, so later stages work on the
//! resolved variant and never look at the text again.
//!
//! # Rules (first match wins)
//!
//! | Token | Result |
//! |-------|--------|
//! | `int8_t` ... `uint64_t` | `FixedInt` |
//! | `string` | `String` |
//! | `blob` | `Blob` |
//! | `array_<T>` | `VariableArray(T)` |
//! | `fixarray_<N>_<T>` | `FixedArray(T, N)` |
//! | declared type enum | `TypeEnumRef` |
//! | declared enum | `EnumRef` |
//! | declared or external struct | `StructRef` |

use std::collections::HashSet;

use crate::schema::{FieldType, IntType};

const STRING_TOKEN: &str = "string";
const BLOB_TOKEN: &str = "blob";
const ARRAY_PREFIX: &str = "array_";
const FIXARRAY_PREFIX: &str = "fixarray_";

/// Tokens that always name a builtin type and can never be declared
pub fn is_builtin_token(token: &str) -> bool {
    IntType::from_token(token).is_some() || token == STRING_TOKEN || token == BLOB_TOKEN
}

/// Why a token failed to resolve
///
/// Carries the innermost offending token; the loader adds the struct and
/// field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No rule matched this (sub-)token
    Unresolved { token: String },

    /// The count of a `fixarray_` token is not a positive integer
    MalformedFixedArraySize { token: String },
}

/// Classifies type tokens against the names a schema declares
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    structs: HashSet<String>,
    enums: HashSet<String>,
    type_enums: HashSet<String>,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a struct name (declared or external)
    pub fn declare_struct(&mut self, name: impl Into<String>) {
        self.structs.insert(name.into());
    }

    pub fn declare_enum(&mut self, name: impl Into<String>) {
        self.enums.insert(name.into());
    }

    pub fn declare_type_enum(&mut self, name: impl Into<String>) {
        self.type_enums.insert(name.into());
    }

    /// Resolve a type token into its [`FieldType`]
    pub fn resolve(&self, token: &str) -> Result<FieldType, ResolveError> {
        if let Some(int) = IntType::from_token(token) {
            return Ok(FieldType::FixedInt(int));
        }
        if token == STRING_TOKEN {
            return Ok(FieldType::String);
        }
        if token == BLOB_TOKEN {
            return Ok(FieldType::Blob);
        }
        if let Some(element) = token.strip_prefix(ARRAY_PREFIX) {
            let element = self.resolve(element)?;
            return Ok(FieldType::VariableArray(Box::new(element)));
        }
        if let Some(rest) = token.strip_prefix(FIXARRAY_PREFIX) {
            return self.resolve_fixed_array(token, rest);
        }
        if self.type_enums.contains(token) {
            return Ok(FieldType::TypeEnumRef(token.to_string()));
        }
        if self.enums.contains(token) {
            return Ok(FieldType::EnumRef(token.to_string()));
        }
        if self.structs.contains(token) {
            return Ok(FieldType::StructRef(token.to_string()));
        }

        Err(ResolveError::Unresolved {
            token: token.to_string(),
        })
    }

    fn resolve_fixed_array(&self, token: &str, rest: &str) -> Result<FieldType, ResolveError> {
        let malformed = || ResolveError::MalformedFixedArraySize {
            token: token.to_string(),
        };

        let (count, element) = rest.split_once('_').ok_or_else(malformed)?;
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let count: usize = count.parse().map_err(|_| malformed())?;
        if count == 0 {
            return Err(malformed());
        }

        let element = self.resolve(element)?;
        Ok(FieldType::FixedArray(Box::new(element), count))
    }
}
