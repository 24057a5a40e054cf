//! Enum and type enum emission

use tracing::debug;

use super::layout::cpp_type;
use crate::schema::{EnumDef, TYPE_ENUM_REPR, TypeEnumDef};

/// `enum class Name : U { ... };` with every value explicit
pub fn emit_enum(def: &EnumDef) -> String {
    let mut code = String::new();

    code.push_str(&format!("enum class {} : {}\n{{\n", def.name, def.repr.c_name()));
    for constant in &def.constants {
        code.push_str(&format!(
            "    {} = {},\n",
            constant.name,
            cpp_literal(constant.value)
        ));
    }
    code.push_str("};\n");

    debug!(name = %def.name, constants = def.constants.len(), "Emitted enum");
    code
}

/// The enumeration of a type enum; member `i` has value `i`
pub fn emit_type_enum(def: &TypeEnumDef) -> String {
    let mut code = String::new();

    code.push_str(&format!(
        "enum class {} : {}\n{{\n",
        def.name,
        TYPE_ENUM_REPR.c_name()
    ));
    for (ordinal, member) in def.members.iter().enumerate() {
        code.push_str(&format!("    {} = {},\n", member.name, ordinal));
    }
    code.push_str("};\n");

    debug!(name = %def.name, members = def.members.len(), "Emitted type enum");
    code
}

/// Compile-time type → tag table of a type enum
///
/// `Name_tag<T>::value` is the enumerator for `T`; the primary template is
/// left undefined so a type outside the table fails to compile.
pub fn emit_type_tags(def: &TypeEnumDef) -> String {
    let mut code = String::new();

    code.push_str(&format!("template<typename T> struct {}_tag;\n", def.name));
    for member in &def.members {
        code.push_str(&format!(
            "template<> struct {name}_tag<{ty}>\n{{\n    static constexpr {name} value = {name}::{member};\n}};\n",
            name = def.name,
            ty = cpp_type(&member.ty),
            member = member.name,
        ));
    }

    code
}

/// Integer literal that is valid C++ for every `int64_t` / `uint64_t` value
fn cpp_literal(value: i128) -> String {
    if value == i128::from(i64::MIN) {
        format!("({} - 1)", i64::MIN + 1)
    } else if value > i128::from(i64::MAX) {
        format!("{value}ULL")
    } else {
        value.to_string()
    }
}
