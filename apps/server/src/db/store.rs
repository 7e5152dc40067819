//! PostgreSQL-backed patient store
//!
//! One collection, one table: each row holds the record as a JSONB document
//! with a server-generated UUID identity. Dates live inside the document as
//! ISO-8601 calendar-date strings and are rehydrated at the boundary.

use crate::{
    db::{merged_document, PatientStore, UpdateOutcome},
    models::{Patient, PatientRecord, PatientUpdate},
    Error, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPatientStore {
    pool: PgPool,
}

impl PgPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn hydrate(id: Uuid, doc: serde_json::Value) -> Result<Patient> {
        let record: PatientRecord = serde_json::from_value(doc)
            .map_err(|e| Error::Internal(format!("Malformed patient document {id}: {e}")))?;
        Ok(Patient {
            id: id.to_string(),
            record,
        })
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn list(&self) -> Result<Vec<Patient>> {
        let rows = sqlx::query("SELECT id, doc FROM patients")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                let doc: serde_json::Value = row.try_get("doc")?;
                Self::hydrate(id, doc)
            })
            .collect()
    }

    async fn create(&self, record: PatientRecord) -> Result<Patient> {
        let doc = serde_json::to_value(&record)
            .map_err(|e| Error::Internal(format!("Failed to encode patient document: {e}")))?;

        let row = sqlx::query("INSERT INTO patients (doc) VALUES ($1) RETURNING id")
            .bind(&doc)
            .fetch_one(&self.pool)
            .await?;
        let id: Uuid = row.try_get("id")?;

        Ok(Patient {
            id: id.to_string(),
            record,
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Patient>> {
        // Identity strings that are not UUIDs cannot match any row.
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = sqlx::query("SELECT doc FROM patients WHERE id = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Self::hydrate(uuid, doc).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn update(&self, id: &str, update: PatientUpdate) -> Result<UpdateOutcome> {
        let fields = update.to_fields();
        if fields.is_empty() {
            return Ok(UpdateOutcome::EmptyPayload);
        }

        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        // Round trip 1: lookup.
        let row = sqlx::query("SELECT doc FROM patients WHERE id = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(UpdateOutcome::NotFound);
        };
        let doc: serde_json::Value = row.try_get("doc")?;

        // Round trip 2: conditional write. A concurrent delete between the
        // two round trips leaves nothing to update and resolves as not-found.
        let merged = merged_document(doc, &fields);
        let row = sqlx::query("UPDATE patients SET doc = $2 WHERE id = $1 RETURNING doc")
            .bind(uuid)
            .bind(&merged)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(UpdateOutcome::Updated(Self::hydrate(uuid, doc)?))
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
