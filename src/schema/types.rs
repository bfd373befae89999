use serde::Serialize;
use std::collections::HashMap;

use crate::error::CodecError;

/// Declarative description of how one record field maps onto a URL.
///
/// A definition is derived once per record type and encodes structure only:
/// the field kind, its optional literal strings, and its optional
/// placeholder. Runtime values and query defaults never live here; defaults
/// are statically typed at the engine call sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Definition {
    /// A run of fixed literal path segments that validate URL shape.
    StaticPath {
        /// Expected literal segments; `None` means the field's own name is
        /// the single expected segment.
        segments: Option<Vec<String>>,
    },
    /// A single path segment consumed as a typed value.
    DynamicPath {
        /// Placeholder rendered by the placeholder strategy; `None` means
        /// `:<field name>`.
        placeholder: Option<String>,
    },
    /// A query parameter read by key, with default/optional fallback.
    Query {
        /// Custom query key; `None` means the field's own name.
        key: Option<String>,
        /// Placeholder rendered by the placeholder strategy; `None` means
        /// `:<field name>`.
        placeholder: Option<String>,
    },
}

impl Definition {
    /// Human-readable kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Definition::StaticPath { .. } => "static path",
            Definition::DynamicPath { .. } => "dynamic path",
            Definition::Query { .. } => "query",
        }
    }
}

/// Ordered field table for one record type.
///
/// Order equals declaration order in the record and governs path-segment
/// consumption and emission; query handling is addressed purely by key and
/// is order-independent. Field names are unique per record (the derive
/// guarantees this); should a hand-written implementation repeat a name,
/// lookups resolve to the last definition and the mismatch surfaces as
/// `InvalidState` when the engines touch the earlier field.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<(&'static str, Definition)>,
    #[serde(skip)]
    index: HashMap<&'static str, usize>,
}

impl Schema {
    /// Build a schema from a record's declaration-ordered field list.
    pub fn new(type_name: &'static str, fields: Vec<(&'static str, Definition)>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, (name, _))| (*name, position))
            .collect();
        Schema {
            type_name,
            fields,
            index,
        }
    }

    /// Name of the record type this schema was derived from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up one field's definition by field name.
    pub fn get(&self, field: &str) -> Option<&Definition> {
        self.index
            .get(field)
            .map(|position| &self.fields[*position].1)
    }

    /// Like [`get`](Schema::get), but a missing field is an
    /// [`InvalidState`](CodecError::InvalidState): the engines only ask for
    /// fields the record claims to declare, so absence means the record's
    /// field list and its definitions disagree.
    pub fn require(&self, field: &str) -> Result<&Definition, CodecError> {
        self.get(field).ok_or_else(|| {
            CodecError::InvalidState(format!(
                "no definition for field '{}' in schema for {}",
                field, self.type_name
            ))
        })
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Definition)> {
        self.fields.iter().map(|(name, definition)| (*name, definition))
    }

    /// Number of URL-relevant fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record declares no URL-relevant fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
