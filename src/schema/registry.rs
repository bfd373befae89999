use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::sync::Arc;

use super::Schema;
use crate::record::UrlRecord;

// Write-once per record type: the schema is built on first use and shared
// read-only afterwards, so concurrent decode/encode calls against the same
// type all see one immutable table.
static SCHEMAS: Lazy<DashMap<TypeId, Arc<Schema>>> = Lazy::new(DashMap::new);

/// The cached schema for a record type, building it on first access.
pub fn schema_of<T: UrlRecord>() -> Arc<Schema> {
    let entry = SCHEMAS.entry(TypeId::of::<T>()).or_insert_with(|| {
        let schema = Schema::new(std::any::type_name::<T>(), T::definitions());
        tracing::debug!(
            record = schema.type_name(),
            fields = schema.len(),
            "schema registered"
        );
        Arc::new(schema)
    });
    Arc::clone(entry.value())
}
