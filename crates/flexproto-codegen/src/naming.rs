//! Output naming conventions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `schemas/defs.toml` | [`output_path_for`] | `schemas/defs_toml.h` |
//! | `defs_toml.h` | [`include_guard`] | `DEFS_TOML_H` |

use std::path::{Path, PathBuf};

/// Default header path for a schema file.
///
/// Every `.` in the file name becomes `_` and `.h` is appended; the header
/// lands next to the schema.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use flexproto_codegen::naming::output_path_for;
///
/// assert_eq!(output_path_for(Path::new("defs.toml")), Path::new("defs_toml.h"));
/// assert_eq!(output_path_for(Path::new("a/b.c.toml")), Path::new("a/b_c_toml.h"));
/// ```
pub fn output_path_for(schema: &Path) -> PathBuf {
    let file_name = schema
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_else(|| "schema".to_string());

    schema.with_file_name(format!("{file_name}.h"))
}

/// Include guard macro derived from the output file name.
///
/// # Examples
///
/// ```
/// use flexproto_codegen::naming::include_guard;
///
/// assert_eq!(include_guard("defs_toml.h"), "DEFS_TOML_H");
/// assert_eq!(include_guard("my-proto.h"), "MY_PROTO_H");
/// ```
pub fn include_guard(output_name: &str) -> String {
    output_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
