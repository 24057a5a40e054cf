//! Header assembly
//!
//! Sections are written in a fixed order:
//!
//! ```text
//! banner
//! #ifndef / #define guard
//! #include "<runtime header>"
//! using namespace flexproto;
//! external includes
//! namespace open
//!     forward declarations
//!     enums
//!     type tag tables
//!     struct layouts (embedded structs first)
//!     codec prototypes
//!     codec bodies
//! namespace close
//! #endif
//! ```

use tracing::{debug, info};

use crate::embedding::layout_order;
use crate::emit;
use crate::error::SchemaResult;
use crate::naming::include_guard;
use crate::schema::SchemaDocument;

/// Render the complete header for `doc`
///
/// `output_name` is the header's file name; it names the include guard
/// unless the options carry an explicit one.
pub fn assemble(doc: &SchemaDocument, output_name: &str) -> SchemaResult<String> {
    let options = &doc.options;
    let guard = options
        .include_guard
        .clone()
        .unwrap_or_else(|| include_guard(output_name));

    let layouts = layout_order(doc)?;
    let mut code = String::new();

    if options.banner {
        code.push_str(&format!(
            "// {output_name}\n// Generated by flexproto {}. Do not edit.\n\n",
            env!("CARGO_PKG_VERSION")
        ));
    }

    code.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));
    code.push_str(&format!("#include {}\n\n", quote_include(&options.runtime_header)));
    code.push_str("using namespace flexproto;\n\n");

    if !doc.includes.is_empty() {
        for include in &doc.includes {
            code.push_str(&format!("#include {}\n", quote_include(include)));
        }
        code.push('\n');
    }

    if let Some(namespace) = &doc.namespace {
        code.push_str(&format!("namespace {namespace}\n{{\n\n"));
    }

    push_section(&mut code, emit::emit_forward_declarations(doc));

    for def in &doc.enums {
        push_section(&mut code, emit::emit_enum(def));
    }
    for def in &doc.type_enums {
        push_section(&mut code, emit::emit_type_enum(def));
    }
    for def in &doc.type_enums {
        push_section(&mut code, emit::emit_type_tags(def));
    }

    for def in &layouts {
        push_section(&mut code, emit::emit_struct(def));
    }

    push_section(&mut code, emit::emit_prototypes(&doc.structs));

    for def in &doc.structs {
        push_section(&mut code, emit::emit_codec(def, doc)?);
    }

    if let Some(namespace) = &doc.namespace {
        code.push_str(&format!("}} // namespace {namespace}\n\n"));
    }

    code.push_str(&format!("#endif // {guard}\n"));

    debug!(guard = %guard, layouts = layouts.len(), "Assembled header");
    info!(
        output = output_name,
        bytes = code.len(),
        codecs = doc.structs.len(),
        "Generated header"
    );

    Ok(code)
}

/// Append a non-empty section followed by a blank line
fn push_section(code: &mut String, section: String) {
    if !section.is_empty() {
        code.push_str(&section);
        code.push('\n');
    }
}

/// `"name"` unless already written as `<name>` or `"name"`
fn quote_include(include: &str) -> String {
    let bracketed = include.starts_with('<') && include.ends_with('>');
    let quoted = include.len() >= 2 && include.starts_with('"') && include.ends_with('"');

    if bracketed || quoted {
        include.to_string()
    } else {
        format!("\"{include}\"")
    }
}
