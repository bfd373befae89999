//! Field definitions and the per-type schema table.
//!
//! A [`Schema`] is the declaration-ordered list of `(field name,
//! [`Definition`])` pairs for one record type, derived once and cached
//! process-wide by [`schema_of`]. Both engines consume it: the decoder to
//! know what each field expects from the URL, the encoder to know what each
//! field contributes back.

mod registry;
mod types;

pub use registry::schema_of;
pub use types::{Definition, Schema};
