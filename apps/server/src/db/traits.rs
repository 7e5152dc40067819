//! Core trait for patient record storage backends

use crate::{
    models::{Patient, PatientRecord, PatientUpdate},
    Result,
};
use async_trait::async_trait;

/// Outcome of a partial update.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// The record existed and the supplied fields were applied. Updating a
    /// field to its current value is still a successful update.
    Updated(Patient),
    /// The payload carried no fields; nothing was sent to the store.
    EmptyPayload,
    /// No record matched the identity, either at lookup time or at write
    /// time (a concurrent delete between the two resolves here).
    NotFound,
}

/// Storage operations for the single patient collection.
///
/// Any document-oriented backend (PostgreSQL JSONB, MongoDB, in-memory, etc.)
/// can implement this trait. The store owns identity assignment; callers
/// never supply ids on create.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// All records in store-defined order. No pagination or filtering.
    async fn list(&self) -> Result<Vec<Patient>>;

    /// Insert a complete record and return it annotated with the newly
    /// assigned identity. Duplicate content is not an error.
    async fn create(&self, record: PatientRecord) -> Result<Patient>;

    /// The record matching `id`, or `None`. Identity strings that do not
    /// match the store's identity format are treated as not-found, never as
    /// a fatal error.
    async fn get(&self, id: &str) -> Result<Option<Patient>>;

    /// Apply the supplied fields of `update` to the record matching `id`.
    /// Performs a lookup followed by a conditional write; the pair is not
    /// atomic with respect to concurrent deletes.
    async fn update(&self, id: &str, update: PatientUpdate) -> Result<UpdateOutcome>;

    /// Remove the record matching `id`; returns whether a record existed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
