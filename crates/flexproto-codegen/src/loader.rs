//! Schema loading
//!
//! Parses the TOML schema format into a [`SchemaDocument`], checking name
//! uniqueness, resolving every type token, assigning enum values and
//! rejecting direct embedding cycles. A document returned from here is
//! ready for every emitter and for the reference codec.
//!
//! ```toml
//! namespace = "demo"
//! external_structs = ["Vec3"]
//!
//! [[enum]]
//! name = "Color"
//! repr = "uint8_t"
//! constants = [{ name = "Red" }, { name = "Green", value = 5 }]
//!
//! [[struct]]
//! name = "Point"
//! fields = [{ name = "x", type = "int32_t" }, { name = "y", type = "int32_t" }]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::embedding;
use crate::emit::cpp_type;
use crate::error::{SchemaError, SchemaResult};
use crate::options::GeneratorOptions;
use crate::resolve::{ResolveError, TypeResolver, is_builtin_token};
use crate::schema::{
    DEFAULT_ENUM_REPR, EnumConstant, EnumDef, Field, IntType, SchemaDocument, StructDef,
    TypeEnumDef, TypeEnumMember,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    #[serde(default)]
    namespace: Option<String>,

    #[serde(default)]
    includes: Vec<String>,

    #[serde(default)]
    external_structs: Vec<String>,

    #[serde(default)]
    generator: GeneratorOptions,

    #[serde(default, rename = "enum")]
    enums: Vec<RawEnum>,

    #[serde(default, rename = "type_enum")]
    type_enums: Vec<RawTypeEnum>,

    #[serde(default, rename = "struct")]
    structs: Vec<RawStruct>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
    name: String,

    #[serde(default)]
    repr: Option<String>,

    #[serde(default)]
    constants: Vec<RawConstant>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConstant {
    name: String,

    #[serde(default)]
    value: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTypeEnum {
    name: String,

    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStruct {
    name: String,

    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,

    #[serde(rename = "type")]
    ty: String,
}

/// Load a schema from a file
pub fn load_file(path: impl AsRef<Path>) -> SchemaResult<SchemaDocument> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading schema");

    let text = std::fs::read_to_string(path)?;
    load_str(&text)
}

/// Load a schema from TOML text
pub fn load_str(text: &str) -> SchemaResult<SchemaDocument> {
    let raw: RawSchema = toml::from_str(text)?;

    check_type_names(&raw)?;

    let mut resolver = TypeResolver::new();
    for s in &raw.structs {
        resolver.declare_struct(&s.name);
    }
    for name in &raw.external_structs {
        resolver.declare_struct(name);
    }
    for e in &raw.enums {
        resolver.declare_enum(&e.name);
    }
    for t in &raw.type_enums {
        resolver.declare_type_enum(&t.name);
    }

    let enums = raw
        .enums
        .iter()
        .map(load_enum)
        .collect::<SchemaResult<Vec<_>>>()?;

    let type_enums = raw
        .type_enums
        .iter()
        .map(|t| load_type_enum(t, &resolver))
        .collect::<SchemaResult<Vec<_>>>()?;

    let external: HashSet<&str> = raw.external_structs.iter().map(String::as_str).collect();
    let structs = raw
        .structs
        .iter()
        .map(|s| load_struct(s, &resolver, external.contains(s.name.as_str())))
        .collect::<SchemaResult<Vec<_>>>()?;

    let doc = SchemaDocument {
        namespace: raw.namespace.filter(|ns| !ns.is_empty()),
        includes: raw.includes,
        external_structs: raw.external_structs,
        structs,
        enums,
        type_enums,
        options: raw.generator,
    };

    embedding::layout_order(&doc)?;

    info!(
        structs = doc.structs.len(),
        enums = doc.enums.len(),
        type_enums = doc.type_enums.len(),
        "Loaded schema"
    );

    Ok(doc)
}

/// Struct, enum and type enum names share one namespace with the builtins
fn check_type_names(raw: &RawSchema) -> SchemaResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    let declared = raw
        .structs
        .iter()
        .map(|s| s.name.as_str())
        .chain(raw.enums.iter().map(|e| e.name.as_str()))
        .chain(raw.type_enums.iter().map(|t| t.name.as_str()));

    for name in declared {
        if is_builtin_token(name) || !seen.insert(name) {
            return Err(duplicate("type", name));
        }
    }

    let mut externals: HashSet<&str> = HashSet::new();
    for name in raw.external_structs.iter().map(String::as_str) {
        if !externals.insert(name) {
            return Err(duplicate("external struct", name));
        }
        // An external name may also be declared as a struct, nothing else
        let is_struct = raw.structs.iter().any(|s| s.name == name);
        if is_builtin_token(name) || (!is_struct && seen.contains(name)) {
            return Err(duplicate("type", name));
        }
    }

    Ok(())
}

fn load_enum(raw: &RawEnum) -> SchemaResult<EnumDef> {
    let repr = match &raw.repr {
        Some(token) => IntType::from_token(token).ok_or_else(|| SchemaError::InvalidEnumRepr {
            enum_name: raw.name.clone(),
            token: token.clone(),
        })?,
        None => DEFAULT_ENUM_REPR,
    };

    let mut names = HashSet::new();
    let mut constants = Vec::with_capacity(raw.constants.len());
    let mut next: i128 = 0;

    for constant in &raw.constants {
        if !names.insert(constant.name.as_str()) {
            return Err(duplicate(
                &format!("constant in enum `{}`", raw.name),
                &constant.name,
            ));
        }

        let value = constant.value.map(i128::from).unwrap_or(next);
        if !repr.contains(value) {
            return Err(SchemaError::EnumValueOutOfRange {
                enum_name: raw.name.clone(),
                constant: constant.name.clone(),
                value,
                repr: repr.c_name().to_string(),
            });
        }

        constants.push(EnumConstant {
            name: constant.name.clone(),
            value,
        });
        next = value + 1;
    }

    debug!(name = %raw.name, repr = repr.c_name(), constants = constants.len(), "Loaded enum");

    Ok(EnumDef {
        name: raw.name.clone(),
        repr,
        constants,
    })
}

fn load_type_enum(raw: &RawTypeEnum, resolver: &TypeResolver) -> SchemaResult<TypeEnumDef> {
    let scope = format!("member of type enum `{}`", raw.name);
    let mut names = HashSet::new();
    let mut cpp_types = HashSet::new();
    let mut members = Vec::with_capacity(raw.types.len());

    for token in &raw.types {
        if !names.insert(token.as_str()) {
            return Err(duplicate(&scope, token));
        }

        let ty = resolver
            .resolve(token)
            .map_err(|_| SchemaError::UnresolvedTypeEnumMember {
                type_enum: raw.name.clone(),
                token: token.clone(),
            })?;

        // Each member specializes the tag template on its C++ type
        if !cpp_types.insert(cpp_type(&ty)) {
            return Err(duplicate(&scope, token));
        }

        members.push(TypeEnumMember {
            name: token.clone(),
            ty,
        });
    }

    debug!(name = %raw.name, members = members.len(), "Loaded type enum");

    Ok(TypeEnumDef {
        name: raw.name.clone(),
        members,
    })
}

fn load_struct(raw: &RawStruct, resolver: &TypeResolver, external: bool) -> SchemaResult<StructDef> {
    let mut names = HashSet::new();
    let mut fields = Vec::with_capacity(raw.fields.len());

    for field in &raw.fields {
        if !names.insert(field.name.as_str()) {
            return Err(duplicate(&format!("field in struct `{}`", raw.name), &field.name));
        }

        let ty = resolver.resolve(&field.ty).map_err(|err| match err {
            ResolveError::Unresolved { token } => SchemaError::UnresolvedType {
                struct_name: raw.name.clone(),
                field: field.name.clone(),
                token: field.ty.clone(),
                unresolved: token,
            },
            ResolveError::MalformedFixedArraySize { .. } => SchemaError::MalformedFixedArraySize {
                struct_name: raw.name.clone(),
                field: field.name.clone(),
                token: field.ty.clone(),
            },
        })?;

        fields.push(Field {
            name: field.name.clone(),
            ty,
            token: field.ty.clone(),
        });
    }

    debug!(name = %raw.name, fields = fields.len(), external, "Loaded struct");

    Ok(StructDef {
        name: raw.name.clone(),
        fields,
        external,
    })
}

fn duplicate(scope: &str, name: &str) -> SchemaError {
    SchemaError::DuplicateName {
        scope: scope.to_string(),
        name: name.to_string(),
    }
}
