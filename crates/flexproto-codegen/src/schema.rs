//! Schema model shared by every emitter.
//!
//! The loader builds one [`SchemaDocument`] per run; after that it is only
//! read. Every field's type token has already been resolved into a
//! [`FieldType`], so emitters never re-parse tokens.
//!
//! # Structure
//!
//! - [`SchemaDocument`]: root aggregate, definitions in declaration order
//! - [`StructDef`] / [`Field`]: ordered fields; field order is wire order
//! - [`EnumDef`]: integer enumerations with resolved constant values
//! - [`TypeEnumDef`]: type → ordinal tables
//! - [`FieldType`]: the resolved kind of a field

use crate::options::GeneratorOptions;

/// Fixed-width integer type (`int8_t` ... `uint64_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntType {
    /// Width in bits: 8, 16, 32 or 64
    pub width: u8,

    /// Whether the type is signed
    pub signed: bool,
}

impl IntType {
    pub const INT8: IntType = IntType::new(8, true);
    pub const INT16: IntType = IntType::new(16, true);
    pub const INT32: IntType = IntType::new(32, true);
    pub const INT64: IntType = IntType::new(64, true);
    pub const UINT8: IntType = IntType::new(8, false);
    pub const UINT16: IntType = IntType::new(16, false);
    pub const UINT32: IntType = IntType::new(32, false);
    pub const UINT64: IntType = IntType::new(64, false);

    /// All basic integer types, in token order
    pub const ALL: [IntType; 8] = [
        IntType::INT8,
        IntType::INT16,
        IntType::INT32,
        IntType::INT64,
        IntType::UINT8,
        IntType::UINT16,
        IntType::UINT32,
        IntType::UINT64,
    ];

    const fn new(width: u8, signed: bool) -> Self {
        Self { width, signed }
    }

    /// Look up a basic integer type by its token
    pub fn from_token(token: &str) -> Option<IntType> {
        IntType::ALL.into_iter().find(|ty| ty.c_name() == token)
    }

    /// The token / C++ spelling of this type
    pub fn c_name(self) -> &'static str {
        match (self.width, self.signed) {
            (8, true) => "int8_t",
            (16, true) => "int16_t",
            (32, true) => "int32_t",
            (64, true) => "int64_t",
            (8, false) => "uint8_t",
            (16, false) => "uint16_t",
            (32, false) => "uint32_t",
            _ => "uint64_t",
        }
    }

    /// Smallest representable value
    pub fn min(self) -> i128 {
        if self.signed {
            -(1i128 << (self.width - 1))
        } else {
            0
        }
    }

    /// Largest representable value
    pub fn max(self) -> i128 {
        if self.signed {
            (1i128 << (self.width - 1)) - 1
        } else {
            (1i128 << self.width) - 1
        }
    }

    /// Whether `value` is representable
    pub fn contains(self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

/// Underlying integer type of enums that do not name one
pub const DEFAULT_ENUM_REPR: IntType = IntType::INT32;

/// Underlying integer type of every type enum
pub const TYPE_ENUM_REPR: IntType = IntType::UINT32;

/// Resolved field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Fixed-width integer, varint on the wire.
    FixedInt(IntType),

    /// Length-prefixed text.
    String,

    /// Length-prefixed opaque bytes.
    Blob,

    /// Count-prefixed sequence.
    VariableArray(Box<FieldType>),

    /// Exactly `count` elements, no prefix.
    FixedArray(Box<FieldType>, usize),

    /// Another struct, encoded by its own codec.
    StructRef(String),

    /// Integer enumeration.
    EnumRef(String),

    /// Type-tag enumeration.
    TypeEnumRef(String),
}

impl FieldType {
    /// Human-readable kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldType::FixedInt(_) => "integer",
            FieldType::String => "string",
            FieldType::Blob => "blob",
            FieldType::VariableArray(_) => "variable array",
            FieldType::FixedArray(_, _) => "fixed array",
            FieldType::StructRef(_) => "struct",
            FieldType::EnumRef(_) => "enum",
            FieldType::TypeEnumRef(_) => "type enum",
        }
    }

    /// Struct stored by value inside a field of this type, if any
    ///
    /// Fixed arrays hold their elements inline; variable arrays are an
    /// indirection and never embed.
    pub fn embedded_struct(&self) -> Option<&str> {
        match self {
            FieldType::StructRef(name) => Some(name),
            FieldType::FixedArray(element, _) => element.embedded_struct(),
            _ => None,
        }
    }
}

/// A field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: String,

    /// Resolved type.
    pub ty: FieldType,

    /// Type token as written in the schema.
    pub token: String,
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// The struct name.
    pub name: String,

    /// Fields in wire order.
    pub fields: Vec<Field>,

    /// Layout defined outside the generated header.
    pub external: bool,
}

/// An enum constant with its resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    pub name: String,

    /// Wide enough for every `int64_t` and `uint64_t` value.
    pub value: i128,
}

/// An integer enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub repr: IntType,
    pub constants: Vec<EnumConstant>,
}

/// A member of a type enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnumMember {
    /// Member token, also the enumerator name.
    pub name: String,

    /// Resolved type the member stands for.
    pub ty: FieldType,
}

/// A type → ordinal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnumDef {
    pub name: String,
    pub members: Vec<TypeEnumMember>,
}

impl TypeEnumDef {
    /// Ordinal of `member`: its 0-based position
    pub fn tag_of(&self, member: &str) -> Option<u32> {
        self.members
            .iter()
            .position(|m| m.name == member)
            .and_then(|index| u32::try_from(index).ok())
    }
}

/// Root aggregate of a loaded schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Namespace wrapping the generated code.
    pub namespace: Option<String>,

    /// External includes, in emission order.
    pub includes: Vec<String>,

    /// Names of structs defined outside the generated header.
    pub external_structs: Vec<String>,

    /// Struct definitions in declaration order.
    pub structs: Vec<StructDef>,

    /// Enum definitions in declaration order.
    pub enums: Vec<EnumDef>,

    /// Type enum definitions in declaration order.
    pub type_enums: Vec<TypeEnumDef>,

    /// Options from the schema's `[generator]` table.
    pub options: GeneratorOptions,
}

impl SchemaDocument {
    /// Find a declared struct by name
    pub fn struct_def(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Find an enum by name
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Find a type enum by name
    pub fn type_enum_def(&self, name: &str) -> Option<&TypeEnumDef> {
        self.type_enums.iter().find(|e| e.name == name)
    }

    /// Whether `name` is listed as an external struct
    pub fn is_external(&self, name: &str) -> bool {
        self.external_structs.iter().any(|s| s == name)
    }

    /// Structs whose layout is emitted
    pub fn local_structs(&self) -> impl Iterator<Item = &StructDef> {
        self.structs.iter().filter(|s| !s.external)
    }
}

#[cfg(test)]
#[path = "schema/schema_tests.rs"]
mod schema_tests;
