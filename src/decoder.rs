//! Ordered-consumption decoding engine.
//!
//! A [`UrlDecoder`] is built per decode call from a record's schema, the
//! URL's path components, and a query lookup function. Fields consume it in
//! declaration order: static and dynamic path fields pop components off a
//! monotonically advancing cursor, query fields resolve their key through
//! the lookup without ever touching the cursor. Declaration order is
//! load-bearing for path fields (swapping two dynamic fields changes which
//! segment binds to which field); query fields may sit anywhere.
//!
//! The decoder never enumerates query keys; it only asks for the ones the
//! schema names. Components left over after the last field are ignored.

use std::sync::Arc;
use tracing::{debug, trace};

use crate::component::UrlComponent;
use crate::error::CodecError;
use crate::field::Field;
use crate::schema::{Definition, Schema};

/// Decoding state for a single record.
///
/// Owns the path cursor; each decode call constructs an independent decoder,
/// so concurrent decodes against the same schema never share state.
pub struct UrlDecoder<'q> {
    schema: Arc<Schema>,
    components: Vec<String>,
    cursor: usize,
    query: Box<dyn Fn(&str) -> Option<String> + 'q>,
}

impl<'q> UrlDecoder<'q> {
    /// Create a decoder over `components` with a query lookup.
    ///
    /// The lookup is a pure function from key to value; absent keys return
    /// `None`. Typically it closes over a parsed URL's query map.
    pub fn new(
        schema: Arc<Schema>,
        components: Vec<String>,
        query: impl Fn(&str) -> Option<String> + 'q,
    ) -> Self {
        debug!(
            record = schema.type_name(),
            components = components.len(),
            "decoding record"
        );
        UrlDecoder {
            schema,
            components,
            cursor: 0,
            query: Box::new(query),
        }
    }

    /// Pop the next path component, advancing the cursor.
    fn next_component(&mut self) -> Option<&str> {
        if self.cursor < self.components.len() {
            let component = self.components[self.cursor].as_str();
            self.cursor += 1;
            Some(component)
        } else {
            None
        }
    }

    /// Consume this field's literal segments, validating URL shape.
    ///
    /// The expected list is the definition's literals, or the field's own
    /// name when none were given. Errors if the path runs out
    /// ([`CodecError::MissingStaticPath`]) or a popped component differs
    /// from the literal at that position
    /// ([`CodecError::StaticPathMismatch`]).
    pub fn static_path(&mut self, field: &str) -> Result<Field<()>, CodecError> {
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
        let expected = segments.unwrap_or_else(|| vec![field.to_string()]);
        for segment in &expected {
            let head = match self.next_component() {
                Some(component) => component,
                None => {
                    return Err(CodecError::MissingStaticPath {
                        expected: segment.clone(),
                    })
                }
            };
            if head != segment.as_str() {
                return Err(CodecError::StaticPathMismatch {
                    expected: segment.clone(),
                    actual: head.to_string(),
                });
            }
        }
        trace!(field, segments = expected.len(), "static path matched");
        Ok(Field::Bound(()))
    }

    /// Consume exactly one component and convert it into `T`.
    pub fn dynamic_path<T: UrlComponent>(&mut self, field: &str) -> Result<Field<T>, CodecError> {
        match self.schema.require(field)? {
            Definition::DynamicPath { .. } => {}
            other => {
                return Err(CodecError::InvalidState(format!(
                    "field '{}' has a {} definition, dynamic path expected",
                    field,
                    other.kind()
                )))
            }
        }
        let head = match self.next_component() {
            Some(component) => component.to_string(),
            None => {
                return Err(CodecError::MissingDynamicPath {
                    value_type: std::any::type_name::<T>(),
                    field: field.to_string(),
                })
            }
        };
        match T::parse(&head) {
            Some(value) => {
                trace!(field, segment = %head, "dynamic path bound");
                Ok(Field::Bound(value))
            }
            None => Err(CodecError::InvalidDynamicPathValue {
                raw: head,
                value_type: std::any::type_name::<T>(),
                field: field.to_string(),
            }),
        }
    }

    /// Resolve this field's query key and convert the value, if any.
    ///
    /// Does not touch the path cursor. An absent key binds the
    /// optional-shaped absent value when the type has one, else `default`,
    /// else fails with [`CodecError::NoValue`]. Optional-shaped wins over a
    /// configured default, so an `Option` field never silently picks up a
    /// default the URL did not ask for.
    pub fn query<T: UrlComponent>(
        &self,
        field: &str,
        default: Option<T>,
    ) -> Result<Field<T>, CodecError> {
        let key = match self.schema.require(field)? {
            Definition::Query { key, .. } => {
                key.clone().unwrap_or_else(|| field.to_string())
            }
            other => {
                return Err(CodecError::InvalidState(format!(
                    "field '{}' has a {} definition, query expected",
                    field,
                    other.kind()
                )))
            }
        };
        match (self.query)(&key) {
            Some(raw) => match T::parse(&raw) {
                Some(value) => {
                    trace!(field, key = %key, "query value bound");
                    Ok(Field::Bound(value))
                }
                None => Err(CodecError::InvalidQueryValue { raw, key }),
            },
            None => match T::missing().or(default) {
                Some(value) => {
                    trace!(field, key = %key, "query key absent, fallback bound");
                    Ok(Field::Bound(value))
                }
                None => Err(CodecError::NoValue { key }),
            },
        }
    }

    /// Log the decode outcome once every field has been processed.
    ///
    /// Trailing components are deliberately not an error; they show up in
    /// the `ignored` count.
    pub(crate) fn finish(&self) {
        debug!(
            record = self.schema.type_name(),
            consumed = self.cursor,
            ignored = self.components.len() - self.cursor,
            "record decoded"
        );
    }
}
