//! Database layer - patient store backends

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::MemoryPatientStore;
pub use store::PgPatientStore;
pub use traits::{PatientStore, UpdateOutcome};

/// Merge supplied update fields into an existing document.
///
/// Only the supplied keys change; everything else in the document is carried
/// through untouched.
pub(crate) fn merged_document(
    mut existing: serde_json::Value,
    fields: &serde_json::Map<String, serde_json::Value>,
) -> serde_json::Value {
    if let Some(object) = existing.as_object_mut() {
        for (key, value) in fields {
            object.insert(key.clone(), value.clone());
        }
    }
    existing
}
