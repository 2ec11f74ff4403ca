// Core modules implementing the omittable container, its field codec, and error modeling.
pub mod codec;
pub mod error;
pub mod fields;
pub mod omittable;
pub mod patch;
mod serde_impl;
