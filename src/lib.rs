//! # typedurl
//!
//! **typedurl** is a schema-driven, bidirectional codec between typed Rust
//! records and the structural parts of a URL: ordered path segments plus a
//! query map.
//!
//! ## Overview
//!
//! One struct declaration describes a URL shape: which path segments are
//! fixed literals and which carry typed values, plus the query keys and
//! their defaults. From that single declaration typedurl derives both
//! directions, a decoder `(path components, query lookup) -> record` and
//! an encoder `record -> (path components, query map)`. A second encoding
//! strategy swaps concrete values for symbolic placeholders, producing
//! route templates like `/users/:id` from the same declaration.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`schema`]** - Field definitions, the per-record schema table, and
//!   the process-wide schema cache
//! - **[`component`]** - The [`UrlComponent`] conversion contract with
//!   primitive implementations and the `Option<T>` combinator
//! - **[`field`]** - Two-phase [`Field`] cells that separate declaring a
//!   field from binding its value
//! - **[`decoder`]** - Ordered path consumption and keyed query resolution
//! - **[`encoder`]** - Value and placeholder emission into [`UrlParts`]
//! - **[`record`]** - The [`UrlRecord`] trait tying both engines to a type
//! - **[`urls`]** - Whole-URL splitting and joining over the `url` crate
//! - **[`error`]** - The codec's error taxonomy
//!
//! ### Decoding Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Record as UrlRecord::decode
//!     participant Registry as schema_of::<T>
//!     participant Decoder as UrlDecoder
//!     participant Conv as UrlComponent
//!
//!     Caller->>Record: decode(path, query)
//!     Record->>Registry: cached schema lookup
//!     Registry-->>Record: Arc<Schema>
//!     Record->>Decoder: decode_fields (declaration order)
//!     Decoder->>Decoder: static_path: pop & compare literals
//!     Decoder->>Conv: dynamic_path: pop & parse
//!     Decoder->>Conv: query: lookup key & parse (or default)
//!     Decoder-->>Record: all cells Bound
//!     Record-->>Caller: Ok(record)
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use typedurl::{Field, UrlRecord};
//!
//! #[derive(Debug, UrlRecord)]
//! struct UserPosts {
//!     #[url(static_path)]
//!     users: Field<()>,
//!     #[url(dynamic_path)]
//!     id: Field<u32>,
//!     #[url(static_path)]
//!     posts: Field<()>,
//!     #[url(query(default = 1))]
//!     page: Field<u32>,
//! }
//!
//! // Decode "/users/42/posts?page=3".
//! let record = UserPosts::decode(&["users", "42", "posts"], |key| {
//!     (key == "page").then(|| "3".to_string())
//! })
//! .expect("decode");
//! assert_eq!(record.id.get().expect("bound"), &42);
//! assert_eq!(record.page.get().expect("bound"), &3);
//!
//! // Encode the record back into parts.
//! let parts = record.encode().expect("encode");
//! assert_eq!(parts.path, ["users", "42", "posts"]);
//!
//! // Templates render placeholders instead of values.
//! let template = UserPosts::template().expect("template");
//! assert_eq!(template.path, ["users", ":id", "posts"]);
//! ```
//!
//! ## Features
//!
//! - **Declaration-Driven**: One struct declares the whole URL shape;
//!   decode and encode can never drift apart
//! - **Typed**: Segment and query conversions go through [`UrlComponent`],
//!   with precision-preserving numeric round-trips
//! - **Templates**: The placeholder strategy renders `/users/:id` route
//!   shapes without needing bound values
//! - **Cached Schemas**: Each record type's schema is built once and shared
//!   across threads
//! - **URL Glue**: [`decode_url`](UrlRecord::decode_url) and
//!   [`encode_url`](UrlRecord::encode_url) keep percent-encoding at the
//!   URL boundary, so records always carry decoded text
//! - **Derive or Hand-Write**: `#[derive(UrlRecord)]` covers the common
//!   case; the trait is small enough to implement by hand when schemas
//!   come from somewhere else
//!
//! ## Failure Model
//!
//! Every decode and encode returns `Result`; a failed call reports the
//! first offending field through [`CodecError`] and binds nothing. Reading
//! an unbound [`Field`] is itself a `Result`, so partially constructed
//! records cannot leak values that were never there.

pub mod component;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod field;
pub mod record;
pub mod schema;
pub mod urls;

pub use component::UrlComponent;
pub use decoder::UrlDecoder;
pub use encoder::{EncodeStrategy, UrlEncoder, UrlParts};
pub use error::CodecError;
pub use field::Field;
pub use record::UrlRecord;
pub use schema::{schema_of, Definition, Schema};
pub use urls::{join_url, split_url, UrlCodingError};

pub use typedurl_macros::{UrlComponent, UrlRecord};
