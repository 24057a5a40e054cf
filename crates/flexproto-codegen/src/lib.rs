//! flexproto-codegen - Schema-driven C++ header generation
//!
//! This crate provides:
//! - [`loader`]: TOML schema → [`SchemaDocument`], with every type token
//!   resolved by [`resolve::TypeResolver`]
//! - [`emit`]: section emitters for layouts, enums, type tags and codecs
//! - [`assemble`]: the complete header in its fixed section order
//! - [`codec`]: a reference codec that encodes dynamic values exactly as the
//!   generated C++ does
//!
//! # Example
//!
//! ```
//! use flexproto_codegen::{generate, loader};
//!
//! let doc = loader::load_str(r#"
//! [[struct]]
//! name = "List"
//! fields = [{ name = "items", type = "array_int32_t" }]
//! "#).unwrap();
//!
//! let header = generate(&doc, "list_toml.h").unwrap();
//! assert!(header.contains("struct List"));
//! assert!(header.contains("encode_variable_array(data, end_data, value.items"));
//! ```

pub mod assemble;
pub mod codec;
pub mod embedding;
pub mod emit;
pub mod error;
pub mod loader;
pub mod naming;
pub mod options;
pub mod resolve;
pub mod schema;

pub use codec::{ReferenceCodec, Value};
pub use error::{CodecError, CodecResult, SchemaError, SchemaResult};
pub use options::GeneratorOptions;
pub use schema::{FieldType, IntType, SchemaDocument};

/// Generate the header text for a loaded document
///
/// `output_name` is the file name the header will be written under.
pub fn generate(doc: &SchemaDocument, output_name: &str) -> SchemaResult<String> {
    assemble::assemble(doc, output_name)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodecError, FieldType, GeneratorOptions, ReferenceCodec, SchemaDocument, SchemaError,
        Value, generate,
    };
}
