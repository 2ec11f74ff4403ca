//! Purpose: Define the stable public Rust API boundary for `omittable`.
//! Exports: The container, the field codec, field capabilities, patch and report helpers.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only public path to the core types.
//! Invariants: Internal modules remain private and are not directly exposed.

mod classify;
mod version;

pub use crate::core::codec::{
    FieldPresence, FieldReader, FieldWriter, decode_field, encode_field, serialize_struct_field,
};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::fields::MapFieldWriter;
pub use crate::core::omittable::{Omittable, OmittableState};
pub use crate::core::patch::{apply_field, merge_patch};
pub use classify::{
    ExpectedType, FieldStatus, check_field, classification_json, classify_fields,
};
pub use version::{ModuleVersion, module_version};
