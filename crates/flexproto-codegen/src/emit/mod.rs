//! C++ section emitters
//!
//! Each emitter renders one kind of section from the loaded
//! [`SchemaDocument`](crate::schema::SchemaDocument); the assembler puts the
//! sections together in their fixed order.
//!
//! - [`layout`]: forward declarations and struct layouts
//! - [`enums`]: enums, type enums and their tag tables
//! - [`codec`]: encoder/decoder prototypes and bodies

pub mod codec;
pub mod enums;
pub mod layout;

pub use codec::{CodecPlan, Strategy, emit_codec, emit_prototypes};
pub use enums::{emit_enum, emit_type_enum, emit_type_tags};
pub use layout::{cpp_type, emit_forward_declarations, emit_struct};
