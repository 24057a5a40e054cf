//! Schema-driven reference codec
//!
//! Encodes and decodes dynamic [`Value`] trees for any struct of a loaded
//! [`SchemaDocument`], byte for byte the way the generated C++ does. Both
//! sides walk the same [`Strategy`] values the emitters render, so this is
//! an executable model of a generated header.
//!
//! ```
//! use flexproto_codegen::codec::{ReferenceCodec, Value};
//! use flexproto_codegen::loader::load_str;
//!
//! let doc = load_str(r#"
//! [[struct]]
//! name = "Point"
//! fields = [{ name = "x", type = "int32_t" }, { name = "y", type = "int32_t" }]
//! "#).unwrap();
//!
//! let codec = ReferenceCodec::new(&doc);
//! let point = Value::structure([("x", Value::Int(-5)), ("y", Value::Int(1_000_000))]);
//!
//! let bytes = codec.encode("Point", &point).unwrap();
//! assert_eq!(bytes, [0x09, 0x80, 0x89, 0x7A]);
//! assert_eq!(codec.decode("Point", &bytes).unwrap(), point);
//! ```

use flexproto_wire::{
    FlexReader, MAX_VARINT_LEN, Sink, WireError, decode_blob, decode_int, decode_string,
    decode_unsigned, encode_bytes, encode_int, encode_string, encode_unsigned,
};
use tracing::trace;

use crate::emit::{CodecPlan, Strategy};
use crate::error::{CodecError, CodecResult};
use crate::schema::{IntType, SchemaDocument, StructDef};

/// Most elements an array may claim when its elements encode to no bytes
///
/// Such a count is not bounded by the input length.
pub const MAX_EMPTY_ELEMENTS: usize = 1 << 16;

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Any fixed-width integer
    Int(i128),

    String(String),

    Blob(Vec<u8>),

    /// Elements of a variable or fixed array
    Array(Vec<Value>),

    /// Field name / value pairs
    Struct(Vec<(String, Value)>),

    /// Underlying value of an enum constant
    Enum(i128),

    /// Ordinal of a type enum member
    Tag(u32),
}

impl Value {
    /// Build a struct value from name / value pairs
    pub fn structure<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Self {
        Value::Struct(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Look up a field of a struct value
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::String(_) => "string",
            Value::Blob(_) => "blob",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Enum(_) => "enum",
            Value::Tag(_) => "type tag",
        }
    }
}

/// Encoder / decoder of [`Value`]s for the structs of one document
///
/// Struct values may carry entries that are not declared fields; they are
/// ignored on encode.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCodec<'d> {
    doc: &'d SchemaDocument,
}

impl<'d> ReferenceCodec<'d> {
    pub fn new(doc: &'d SchemaDocument) -> Self {
        Self { doc }
    }

    /// Encode a struct value into a new buffer
    pub fn encode(&self, struct_name: &str, value: &Value) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out, struct_name, value)?;
        Ok(out)
    }

    /// Append the encoding of a struct value to `out`
    pub fn encode_into<S: Sink + ?Sized>(
        &self,
        out: &mut S,
        struct_name: &str,
        value: &Value,
    ) -> CodecResult<()> {
        self.encode_struct(out, struct_name, value, struct_name)
    }

    /// Decode a struct value that spans all of `bytes`
    pub fn decode(&self, struct_name: &str, bytes: &[u8]) -> CodecResult<Value> {
        let mut input = FlexReader::new(bytes);
        let value = self.decode_from(&mut input, struct_name)?;
        input.finish().map_err(|source| wire(struct_name, source))?;
        Ok(value)
    }

    /// Decode one struct value from the front of `input`
    pub fn decode_from(&self, input: &mut FlexReader<'_>, struct_name: &str) -> CodecResult<Value> {
        self.decode_struct(input, struct_name, struct_name)
    }

    fn plan(&self, struct_name: &str) -> CodecResult<CodecPlan<'d>> {
        let def: &'d StructDef = match self.doc.struct_def(struct_name) {
            Some(def) => def,
            None if self.doc.is_external(struct_name) => {
                return Err(CodecError::ExternalStruct(struct_name.to_string()));
            }
            None => return Err(CodecError::UnknownStruct(struct_name.to_string())),
        };
        Ok(CodecPlan::new(def, self.doc)?)
    }

    fn encode_struct<S: Sink + ?Sized>(
        &self,
        out: &mut S,
        struct_name: &str,
        value: &Value,
        path: &str,
    ) -> CodecResult<()> {
        if !matches!(value, Value::Struct(_)) {
            return Err(mismatch(path, "struct", value));
        }

        let plan = self.plan(struct_name)?;
        for (name, strategy) in plan.fields() {
            let field_path = format!("{path}.{name}");
            let field = value
                .field(name)
                .ok_or_else(|| CodecError::MissingField {
                    path: field_path.clone(),
                })?;
            self.encode_value(out, strategy, field, &field_path)?;
        }
        Ok(())
    }

    fn encode_value<S: Sink + ?Sized>(
        &self,
        out: &mut S,
        strategy: &Strategy,
        value: &Value,
        path: &str,
    ) -> CodecResult<()> {
        trace!(path, "Encoding value");

        match (strategy, value) {
            (Strategy::Int(int), Value::Int(v)) => write_int(out, *int, *v, path),
            (Strategy::String, Value::String(s)) => {
                encode_string(out, s).map_err(|source| wire(path, source))
            }
            (Strategy::Blob, Value::Blob(b)) => {
                encode_bytes(out, b).map_err(|source| wire(path, source))
            }
            (Strategy::VariableArray(element), Value::Array(items)) => {
                encode_unsigned(out, items.len() as u64).map_err(|source| wire(path, source))?;
                self.encode_elements(out, element, items, path)
            }
            (Strategy::FixedArray(element, count), Value::Array(items)) => {
                if items.len() != *count {
                    return Err(CodecError::FixedArrayLength {
                        path: path.to_string(),
                        expected: *count,
                        actual: items.len(),
                    });
                }
                self.encode_elements(out, element, items, path)
            }
            (Strategy::Struct(name), _) => self.encode_struct(out, name, value, path),
            (Strategy::Enum { repr, .. }, Value::Enum(v)) => write_int(out, *repr, *v, path),
            (Strategy::Tag { .. }, Value::Tag(tag)) => {
                encode_int(out, *tag).map_err(|source| wire(path, source))
            }
            (strategy, value) => Err(mismatch(path, expected_kind(strategy), value)),
        }
    }

    fn encode_elements<S: Sink + ?Sized>(
        &self,
        out: &mut S,
        element: &Strategy,
        items: &[Value],
        path: &str,
    ) -> CodecResult<()> {
        for (index, item) in items.iter().enumerate() {
            self.encode_value(out, element, item, &format!("{path}[{index}]"))?;
        }
        Ok(())
    }

    fn decode_struct(
        &self,
        input: &mut FlexReader<'_>,
        struct_name: &str,
        path: &str,
    ) -> CodecResult<Value> {
        let plan = self.plan(struct_name)?;
        let mut fields = Vec::with_capacity(plan.fields().len());

        for (name, strategy) in plan.fields() {
            let field_path = format!("{path}.{name}");
            let value = self.decode_value(input, strategy, &field_path)?;
            fields.push((name.to_string(), value));
        }

        Ok(Value::Struct(fields))
    }

    fn decode_value(
        &self,
        input: &mut FlexReader<'_>,
        strategy: &Strategy,
        path: &str,
    ) -> CodecResult<Value> {
        trace!(path, position = input.position(), "Decoding value");

        let value = match strategy {
            Strategy::Int(int) => Value::Int(read_int(input, *int, path)?),
            Strategy::String => {
                Value::String(decode_string(input).map_err(|source| wire(path, source))?)
            }
            Strategy::Blob => Value::Blob(decode_blob(input).map_err(|source| wire(path, source))?),
            Strategy::VariableArray(element) => {
                let count = decode_unsigned(input, MAX_VARINT_LEN)
                    .map_err(|source| wire(path, source))?;
                let count = usize::try_from(count)
                    .map_err(|_| wire(path, WireError::LengthOverflow(count)))?;
                Value::Array(self.decode_elements(input, element, count, path)?)
            }
            Strategy::FixedArray(element, count) => {
                Value::Array(self.decode_elements(input, element, *count, path)?)
            }
            Strategy::Struct(name) => self.decode_struct(input, name, path)?,
            Strategy::Enum { repr, .. } => Value::Enum(read_int(input, *repr, path)?),
            Strategy::Tag { .. } => Value::Tag(
                decode_int::<u32>(input).map_err(|source| wire(path, source))?,
            ),
        };

        Ok(value)
    }

    fn decode_elements(
        &self,
        input: &mut FlexReader<'_>,
        element: &Strategy,
        count: usize,
        path: &str,
    ) -> CodecResult<Vec<Value>> {
        if self.never_empty(element, &mut Vec::new()) {
            input.ensure(count).map_err(|source| wire(path, source))?;
        } else if count > MAX_EMPTY_ELEMENTS {
            return Err(CodecError::EmptyElementCount {
                path: path.to_string(),
                count,
                limit: MAX_EMPTY_ELEMENTS,
            });
        }

        let mut items = Vec::with_capacity(count.min(input.remaining()));
        for index in 0..count {
            items.push(self.decode_value(input, element, &format!("{path}[{index}]"))?);
        }
        Ok(items)
    }

    /// Whether every encoding of `strategy` takes at least one byte
    ///
    /// A struct qualifies when one of its fields does. Structs without a
    /// field list and structs already on `seen` do not.
    fn never_empty(&self, strategy: &Strategy, seen: &mut Vec<String>) -> bool {
        match strategy {
            Strategy::FixedArray(element, _) => self.never_empty(element, seen),
            Strategy::Struct(name) => {
                let Some(def) = self.doc.struct_def(name) else {
                    return false;
                };
                if seen.contains(name) {
                    return false;
                }

                seen.push(name.clone());
                let found = def.fields.iter().any(|field| {
                    Strategy::new(&field.ty, self.doc)
                        .is_ok_and(|strategy| self.never_empty(&strategy, seen))
                });
                seen.pop();
                found
            }
            _ => true,
        }
    }
}

fn expected_kind(strategy: &Strategy) -> &'static str {
    match strategy {
        Strategy::Int(_) => "integer",
        Strategy::String => "string",
        Strategy::Blob => "blob",
        Strategy::VariableArray(_) | Strategy::FixedArray(_, _) => "array",
        Strategy::Struct(_) => "struct",
        Strategy::Enum { .. } => "enum",
        Strategy::Tag { .. } => "type tag",
    }
}

fn mismatch(path: &str, expected: &'static str, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: value.kind_name(),
    }
}

fn wire(path: &str, source: WireError) -> CodecError {
    CodecError::Wire {
        path: path.to_string(),
        source,
    }
}

fn write_int<S: Sink + ?Sized>(out: &mut S, int: IntType, value: i128, path: &str) -> CodecResult<()> {
    let out_of_range = |_| CodecError::OutOfRange {
        path: path.to_string(),
        value,
        ty: int.c_name(),
    };

    let written = match (int.width, int.signed) {
        (8, true) => encode_int(out, i8::try_from(value).map_err(out_of_range)?),
        (16, true) => encode_int(out, i16::try_from(value).map_err(out_of_range)?),
        (32, true) => encode_int(out, i32::try_from(value).map_err(out_of_range)?),
        (64, true) => encode_int(out, i64::try_from(value).map_err(out_of_range)?),
        (8, false) => encode_int(out, u8::try_from(value).map_err(out_of_range)?),
        (16, false) => encode_int(out, u16::try_from(value).map_err(out_of_range)?),
        (32, false) => encode_int(out, u32::try_from(value).map_err(out_of_range)?),
        _ => encode_int(out, u64::try_from(value).map_err(out_of_range)?),
    };

    written.map_err(|source| wire(path, source))
}

fn read_int(input: &mut FlexReader<'_>, int: IntType, path: &str) -> CodecResult<i128> {
    let read = match (int.width, int.signed) {
        (8, true) => decode_int::<i8>(input).map(i128::from),
        (16, true) => decode_int::<i16>(input).map(i128::from),
        (32, true) => decode_int::<i32>(input).map(i128::from),
        (64, true) => decode_int::<i64>(input).map(i128::from),
        (8, false) => decode_int::<u8>(input).map(i128::from),
        (16, false) => decode_int::<u16>(input).map(i128::from),
        (32, false) => decode_int::<u32>(input).map(i128::from),
        _ => decode_int::<u64>(input).map(i128::from),
    };

    read.map_err(|source| wire(path, source))
}
