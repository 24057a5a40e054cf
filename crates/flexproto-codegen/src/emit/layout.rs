//! Struct layout emission

use tracing::debug;

use crate::schema::{FieldType, SchemaDocument, StructDef};

/// C++ spelling of a resolved field type.
///
/// | Field type | C++ |
/// |------------|-----|
/// | `FixedInt` | `int32_t`, `uint8_t`, ... |
/// | `String` | `std::string` |
/// | `Blob` | `std::vector<uint8_t>` |
/// | `VariableArray(T)` | `std::vector<T>` |
/// | `FixedArray(T, N)` | `std::array<T, N>` |
/// | references | the referenced name |
pub fn cpp_type(ty: &FieldType) -> String {
    match ty {
        FieldType::FixedInt(int) => int.c_name().to_string(),
        FieldType::String => "std::string".to_string(),
        FieldType::Blob => "std::vector<uint8_t>".to_string(),
        FieldType::VariableArray(element) => format!("std::vector<{}>", cpp_type(element)),
        FieldType::FixedArray(element, count) => {
            format!("std::array<{}, {}>", cpp_type(element), count)
        }
        FieldType::StructRef(name) | FieldType::EnumRef(name) | FieldType::TypeEnumRef(name) => {
            name.clone()
        }
    }
}

/// `struct Name;` for every struct whose layout is emitted
pub fn emit_forward_declarations(doc: &SchemaDocument) -> String {
    let mut code = String::new();

    for def in doc.local_structs() {
        code.push_str(&format!("struct {};\n", def.name));
    }

    code
}

/// Layout of one struct, members in declared order
pub fn emit_struct(def: &StructDef) -> String {
    let mut code = String::new();

    code.push_str(&format!("struct {}\n{{\n", def.name));
    for field in &def.fields {
        code.push_str(&format!("    {} {}{{}};\n", cpp_type(&field.ty), field.name));
    }
    code.push_str("};\n");

    debug!(name = %def.name, fields = def.fields.len(), "Emitted struct layout");
    code
}
