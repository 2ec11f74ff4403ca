//! Purpose: Three-state optional values (absent, null, present) for serde and JSON.
//! Exports: `api` (container, field codec, patch and report helpers), `json` (decode boundary).
//! Role: Library backing the `omittable` CLI and downstream serde users.
//! Invariants: Absent and Null stay distinct through every encode/decode path.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
pub mod json;
