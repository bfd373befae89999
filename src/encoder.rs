//! Emission engine: records back into URL parts.
//!
//! A [`UrlEncoder`] walks the record's fields in declaration order and
//! accumulates an ordered path-component list plus a query map, under one of
//! two strategies: [`EmbedValue`](EncodeStrategy::EmbedValue) renders the
//! concrete bound values, while [`Placeholder`](EncodeStrategy::Placeholder)
//! renders symbolic placeholders, which is how route templates like
//! `/users/:id` are produced. Encoding never consults a path cursor; that
//! concept is decode-only.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::component::UrlComponent;
use crate::error::CodecError;
use crate::field::Field;
use crate::schema::{Definition, Schema};

/// How dynamic path and query fields are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EncodeStrategy {
    /// Embed the concrete bound values (falling back to query defaults).
    #[default]
    EmbedValue,
    /// Emit symbolic placeholders, ignoring bound state entirely.
    Placeholder,
}

/// A URL's structural representation: ordered path components plus an
/// unordered query map.
///
/// This is the codec's output boundary. Joining the components with `/`,
/// serializing the query and percent-encoding are all delegated to URL
/// assembly (see the `urls` module).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UrlParts {
    /// Path components in emission order.
    pub path: Vec<String>,
    /// Query parameters; later writes for a duplicate key overwrite
    /// earlier ones.
    pub query: HashMap<String, String>,
}

impl UrlParts {
    /// Query pairs sorted by key.
    ///
    /// The map itself is unordered; sorting makes assembled URLs and test
    /// assertions deterministic.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Encoding state for a single record.
pub struct UrlEncoder {
    schema: Arc<Schema>,
    strategy: EncodeStrategy,
    path: Vec<String>,
    query: HashMap<String, String>,
}

impl UrlEncoder {
    /// Create an encoder that accumulates parts under `strategy`.
    pub fn new(schema: Arc<Schema>, strategy: EncodeStrategy) -> Self {
        debug!(
            record = schema.type_name(),
            strategy = ?strategy,
            "encoding record"
        );
        UrlEncoder {
            schema,
            strategy,
            path: Vec::new(),
            query: HashMap::new(),
        }
    }

    /// Emit this field's literal segments.
    ///
    /// Static segments are structural, not data: they are emitted under
    /// every strategy and regardless of bound state.
    pub fn static_path(&mut self, field: &str) -> Result<(), CodecError> {
        let segments = match self.schema.require(field)? {
            Definition::StaticPath { segments } => segments.clone(),
            other => {
                return Err(CodecError::InvalidState(format!(
                    "field '{}' has a {} definition, static path expected",
                    field,
                    other.kind()
                )))
            }
        };
        match segments {
            Some(literals) => self.path.extend(literals),
            None => self.path.push(field.to_string()),
        }
        Ok(())
    }

    /// Emit one path segment for a typed field.
    ///
    /// Embedding requires the field to be bound
    /// ([`CodecError::NoValue`] otherwise); a render that suppresses
    /// appends nothing. The placeholder strategy appends the definition's
    /// placeholder or `:<field name>` without looking at the value.
    pub fn dynamic_path<T: UrlComponent>(
        &mut self,
        field: &str,
        value: &Field<T>,
    ) -> Result<(), CodecError> {
        let placeholder = match self.schema.require(field)? {
            Definition::DynamicPath { placeholder } => placeholder.clone(),
            other => {
                return Err(CodecError::InvalidState(format!(
                    "field '{}' has a {} definition, dynamic path expected",
                    field,
                    other.kind()
                )))
            }
        };
        match self.strategy {
            EncodeStrategy::EmbedValue => {
                let bound = value.value().ok_or_else(|| CodecError::NoValue {
                    key: field.to_string(),
                })?;
                if let Some(rendered) = bound.render() {
                    self.path.push(rendered);
                }
            }
            EncodeStrategy::Placeholder => {
                self.path
                    .push(placeholder.unwrap_or_else(|| format!(":{}", field)));
            }
        }
        Ok(())
    }

    /// Emit one query pair for a typed field.
    ///
    /// Embedding an unbound field recomputes the fallback exactly as
    /// decoding would (optional-shaped absent, else the default, else
    /// [`CodecError::NoValue`]) and then renders it under the same
    /// suppression rule as a bound value. The placeholder strategy always
    /// emits the key, ignoring bound state and default.
    pub fn query<T: UrlComponent>(
        &mut self,
        field: &str,
        value: &Field<T>,
        default: Option<T>,
    ) -> Result<(), CodecError> {
        let (key, placeholder) = match self.schema.require(field)? {
            Definition::Query { key, placeholder } => (
                key.clone().unwrap_or_else(|| field.to_string()),
                placeholder.clone(),
            ),
            other => {
                return Err(CodecError::InvalidState(format!(
                    "field '{}' has a {} definition, query expected",
                    field,
                    other.kind()
                )))
            }
        };
        match self.strategy {
            EncodeStrategy::EmbedValue => {
                let rendered = match value.value() {
                    Some(bound) => bound.render(),
                    None => {
                        let fallback =
                            T::missing()
                                .or(default)
                                .ok_or_else(|| CodecError::NoValue {
                                    key: key.clone(),
                                })?;
                        fallback.render()
                    }
                };
                if let Some(rendered) = rendered {
                    self.query.insert(key, rendered);
                }
            }
            EncodeStrategy::Placeholder => {
                let rendered = placeholder.unwrap_or_else(|| format!(":{}", field));
                self.query.insert(key, rendered);
            }
        }
        Ok(())
    }

    /// Finish encoding, yielding the accumulated parts.
    pub fn finish(self) -> UrlParts {
        debug!(
            record = self.schema.type_name(),
            path = self.path.len(),
            query = self.query.len(),
            strategy = ?self.strategy,
            "record encoded"
        );
        UrlParts {
            path: self.path,
            query: self.query,
        }
    }
}
