//! The [`UrlRecord`] trait: what a type must provide to round-trip through
//! the codec, plus the high-level entry points built on top of it.
//!
//! `#[derive(UrlRecord)]` generates the four required items from field
//! attributes; hand-written impls are equally supported and go through the
//! same engines. The provided methods are the public API surface:
//! [`decode`](UrlRecord::decode), [`encode`](UrlRecord::encode),
//! [`encode_with`](UrlRecord::encode_with) and
//! [`template`](UrlRecord::template), plus [`decode_url`](UrlRecord::decode_url)
//! and [`encode_url`](UrlRecord::encode_url) for whole-URL glue.

use std::sync::Arc;
use url::Url;

use crate::decoder::UrlDecoder;
use crate::encoder::{EncodeStrategy, UrlEncoder, UrlParts};
use crate::error::CodecError;
use crate::schema::{schema_of, Definition, Schema};
use crate::urls::{self, UrlCodingError};

/// A record type that can be decoded from and encoded to URL parts.
pub trait UrlRecord: Sized + 'static {
    /// Field definitions in declaration order.
    ///
    /// Order is load-bearing: path consumption and emission follow it.
    fn definitions() -> Vec<(&'static str, Definition)>;

    /// An instance with every codec-managed field unbound.
    ///
    /// Used to build templates without requiring real values.
    fn unbound() -> Self;

    /// Drive the decoder over every field, in declaration order.
    fn decode_fields(decoder: &mut UrlDecoder) -> Result<Self, CodecError>;

    /// Drive the encoder over every field, in declaration order.
    fn encode_fields(&self, encoder: &mut UrlEncoder) -> Result<(), CodecError>;

    /// This type's cached schema.
    fn schema() -> Arc<Schema> {
        schema_of::<Self>()
    }

    /// Decode a record from ordered path components and a query lookup.
    ///
    /// `query` answers "the decoded value for this key, if present"; a
    /// `HashMap<String, String>` works as `|key| map.get(key).cloned()`.
    /// Trailing path components beyond what the schema consumes are
    /// ignored.
    fn decode(path: &[&str], query: impl Fn(&str) -> Option<String>) -> Result<Self, CodecError> {
        let components: Vec<String> = path.iter().map(|component| component.to_string()).collect();
        let mut decoder = UrlDecoder::new(Self::schema(), components, query);
        let record = Self::decode_fields(&mut decoder)?;
        decoder.finish();
        Ok(record)
    }

    /// Encode this record's concrete values into URL parts.
    fn encode(&self) -> Result<UrlParts, CodecError> {
        self.encode_with(EncodeStrategy::EmbedValue)
    }

    /// Encode under an explicit strategy.
    fn encode_with(&self, strategy: EncodeStrategy) -> Result<UrlParts, CodecError> {
        let mut encoder = UrlEncoder::new(Self::schema(), strategy);
        self.encode_fields(&mut encoder)?;
        Ok(encoder.finish())
    }

    /// The route template for this record: placeholders for every dynamic
    /// field, literals for static ones.
    ///
    /// No bound values are needed; an unbound instance drives the
    /// placeholder strategy.
    fn template() -> Result<UrlParts, CodecError> {
        Self::unbound().encode_with(EncodeStrategy::Placeholder)
    }

    /// Decode a record from a whole URL.
    ///
    /// Path segments and query values reach the record percent-decoded.
    /// Empty path segments are dropped before decoding and a key repeated
    /// in the query string resolves to its last occurrence.
    fn decode_url(url: &Url) -> Result<Self, UrlCodingError> {
        let (components, query) = urls::split_url(url)?;
        let refs: Vec<&str> = components.iter().map(String::as_str).collect();
        let record = Self::decode(&refs, |key| query.get(key).cloned())?;
        Ok(record)
    }

    /// Encode this record onto a base URL.
    ///
    /// The base's path and query are replaced by whatever this record
    /// emits; a side the record leaves empty keeps the base's.
    fn encode_url(&self, base: &Url) -> Result<Url, UrlCodingError> {
        let parts = self.encode()?;
        urls::join_url(base, &parts)
    }
}
