//! In-memory patient store
//!
//! Backs the `memory` database backend. Used for local development and by
//! the integration tests; semantics mirror the PostgreSQL store, including
//! the lookup-then-write update shape.

use crate::{
    db::{merged_document, PatientStore, UpdateOutcome},
    models::{Patient, PatientRecord, PatientUpdate},
    Error, Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryPatientStore {
    // Vec keeps insertion order, which stands in for "store-defined order".
    records: Arc<RwLock<Vec<Patient>>>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn list(&self) -> Result<Vec<Patient>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, record: PatientRecord) -> Result<Patient> {
        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            record,
        };
        self.records.write().await.push(patient.clone());
        Ok(patient)
    }

    async fn get(&self, id: &str) -> Result<Option<Patient>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: &str, update: PatientUpdate) -> Result<UpdateOutcome> {
        let fields = update.to_fields();
        if fields.is_empty() {
            return Ok(UpdateOutcome::EmptyPayload);
        }

        let mut records = self.records.write().await;
        let Some(existing) = records.iter_mut().find(|p| p.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let doc = serde_json::to_value(&existing.record)
            .map_err(|e| Error::Internal(format!("Failed to encode patient document: {e}")))?;
        let merged = merged_document(doc, &fields);
        existing.record = serde_json::from_value(merged)
            .map_err(|e| Error::Internal(format!("Malformed merged document: {e}")))?;

        Ok(UpdateOutcome::Updated(existing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() < before)
    }
}
