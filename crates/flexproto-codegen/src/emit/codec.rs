//! Encoder and decoder emission
//!
//! Each field type is mapped once to a [`Strategy`]; the encoder and the
//! decoder of a struct are both rendered from the same strategies, so the
//! two always agree on field order and wire shape. The reference codec in
//! [`crate::codec`] walks the same strategies.
//!
//! Generated functions use the bounds-checked calling convention:
//!
//! ```cpp
//! inline auto encode_other(uint8_t *& data, uint8_t * end_data, const Point & value) -> void;
//! inline auto decode_other(const uint8_t *& data, const uint8_t * end_data, Point & value) -> void;
//! ```

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{FieldType, IntType, SchemaDocument, StructDef, TYPE_ENUM_REPR};

/// Wire handling of one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Varint, zigzag for signed types
    Int(IntType),

    /// Varint length + UTF-8 bytes
    String,

    /// Varint length + raw bytes
    Blob,

    /// Varint count + elements
    VariableArray(Box<Strategy>),

    /// Exactly `count` elements
    FixedArray(Box<Strategy>, usize),

    /// Delegates to the struct's own codec
    Struct(String),

    /// Enum constant carried as its underlying integer
    Enum { name: String, repr: IntType },

    /// Type enum ordinal carried as `uint32_t`
    Tag { name: String },
}

impl Strategy {
    /// Derive the strategy for a resolved field type
    pub fn new(ty: &FieldType, doc: &SchemaDocument) -> SchemaResult<Strategy> {
        Ok(match ty {
            FieldType::FixedInt(int) => Strategy::Int(*int),
            FieldType::String => Strategy::String,
            FieldType::Blob => Strategy::Blob,
            FieldType::VariableArray(element) => {
                Strategy::VariableArray(Box::new(Strategy::new(element, doc)?))
            }
            FieldType::FixedArray(element, count) => {
                Strategy::FixedArray(Box::new(Strategy::new(element, doc)?), *count)
            }
            FieldType::StructRef(name) => Strategy::Struct(name.clone()),
            FieldType::EnumRef(name) => {
                let def = doc
                    .enum_def(name)
                    .ok_or_else(|| SchemaError::UnknownReference(name.clone()))?;
                Strategy::Enum {
                    name: name.clone(),
                    repr: def.repr,
                }
            }
            FieldType::TypeEnumRef(name) => {
                if doc.type_enum_def(name).is_none() {
                    return Err(SchemaError::UnknownReference(name.clone()));
                }
                Strategy::Tag { name: name.clone() }
            }
        })
    }

    /// Statement appending `target` to the output
    ///
    /// `depth` numbers the element variables of nested array lambdas.
    pub fn encode_stmt(&self, target: &str, depth: usize) -> String {
        match self {
            Strategy::Int(_) => format!("encode(data, end_data, {target});"),
            Strategy::String => format!("encode_string(data, end_data, {target});"),
            Strategy::Blob => format!("encode_blob(data, end_data, {target});"),
            Strategy::VariableArray(element) => {
                let var = format!("e{depth}");
                format!(
                    "encode_variable_array(data, end_data, {target}, [&](const auto & {var}) {{ {} }});",
                    element.encode_stmt(&var, depth + 1)
                )
            }
            Strategy::FixedArray(element, _) => {
                let var = format!("e{depth}");
                format!(
                    "encode_fixed_array(data, end_data, {target}, [&](const auto & {var}) {{ {} }});",
                    element.encode_stmt(&var, depth + 1)
                )
            }
            Strategy::Struct(_) => format!("encode_other(data, end_data, {target});"),
            Strategy::Enum { repr, .. } => format!(
                "encode(data, end_data, static_cast<{}>({target}));",
                repr.c_name()
            ),
            Strategy::Tag { .. } => format!(
                "encode(data, end_data, static_cast<{}>({target}));",
                TYPE_ENUM_REPR.c_name()
            ),
        }
    }

    /// Statement reading `target` from the input
    pub fn decode_stmt(&self, target: &str, depth: usize) -> String {
        match self {
            Strategy::Int(int) => format!("{target} = decode<{}>(data, end_data);", int.c_name()),
            Strategy::String => format!("decode_string(data, end_data, {target});"),
            Strategy::Blob => format!("decode_blob(data, end_data, {target});"),
            Strategy::VariableArray(element) => {
                let var = format!("e{depth}");
                format!(
                    "decode_variable_array(data, end_data, {target}, [&](auto & {var}) {{ {} }});",
                    element.decode_stmt(&var, depth + 1)
                )
            }
            Strategy::FixedArray(element, _) => {
                let var = format!("e{depth}");
                format!(
                    "decode_fixed_array(data, end_data, {target}, [&](auto & {var}) {{ {} }});",
                    element.decode_stmt(&var, depth + 1)
                )
            }
            Strategy::Struct(_) => format!("decode_other(data, end_data, {target});"),
            Strategy::Enum { name, repr } => format!(
                "{target} = static_cast<{name}>(decode<{}>(data, end_data));",
                repr.c_name()
            ),
            Strategy::Tag { name } => format!(
                "{target} = static_cast<{name}>(decode<{}>(data, end_data));",
                TYPE_ENUM_REPR.c_name()
            ),
        }
    }
}

/// Strategies for every field of one struct, in wire order
#[derive(Debug, Clone)]
pub struct CodecPlan<'d> {
    def: &'d StructDef,
    fields: Vec<(&'d str, Strategy)>,
}

impl<'d> CodecPlan<'d> {
    pub fn new(def: &'d StructDef, doc: &SchemaDocument) -> SchemaResult<Self> {
        let fields = def
            .fields
            .iter()
            .map(|field| -> SchemaResult<_> {
                Ok((field.name.as_str(), Strategy::new(&field.ty, doc)?))
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self { def, fields })
    }

    pub fn struct_name(&self) -> &str {
        &self.def.name
    }

    /// `(field name, strategy)` pairs in wire order
    pub fn fields(&self) -> &[(&'d str, Strategy)] {
        &self.fields
    }

    /// Full `encode_other` definition
    pub fn emit_encoder(&self) -> String {
        let mut code = String::new();

        code.push_str(&encoder_signature(&self.def.name));
        code.push_str("\n{\n");
        for (name, strategy) in &self.fields {
            code.push_str(&format!(
                "    {}\n",
                strategy.encode_stmt(&format!("value.{name}"), 0)
            ));
        }
        code.push_str("}\n");
        code
    }

    /// Full `decode_other` definition
    pub fn emit_decoder(&self) -> String {
        let mut code = String::new();

        code.push_str(&decoder_signature(&self.def.name));
        code.push_str("\n{\n");
        for (name, strategy) in &self.fields {
            code.push_str(&format!(
                "    {}\n",
                strategy.decode_stmt(&format!("value.{name}"), 0)
            ));
        }
        code.push_str("}\n");
        code
    }
}

fn encoder_signature(name: &str) -> String {
    format!("inline auto encode_other(uint8_t *& data, uint8_t * end_data, const {name} & value) -> void")
}

fn decoder_signature(name: &str) -> String {
    format!(
        "inline auto decode_other(const uint8_t *& data, const uint8_t * end_data, {name} & value) -> void"
    )
}

/// Encoder and decoder prototypes for each struct
pub fn emit_prototypes<'a>(structs: impl IntoIterator<Item = &'a StructDef>) -> String {
    let mut code = String::new();

    for def in structs {
        code.push_str(&encoder_signature(&def.name));
        code.push_str(";\n");
        code.push_str(&decoder_signature(&def.name));
        code.push_str(";\n");
    }

    code
}

/// Encoder followed by decoder for one struct
pub fn emit_codec(def: &StructDef, doc: &SchemaDocument) -> SchemaResult<String> {
    let plan = CodecPlan::new(def, doc)?;

    let mut code = plan.emit_encoder();
    code.push('\n');
    code.push_str(&plan.emit_decoder());

    debug!(name = %def.name, fields = def.fields.len(), "Emitted codec");
    Ok(code)
}

#[cfg(test)]
#[path = "codec/codec_tests.rs"]
mod codec_tests;
