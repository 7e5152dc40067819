//! Patient record schema
//!
//! The wire representation of a complete record, the sparse update payload,
//! and the persisted document shape. Dates are `NaiveDate` at the service
//! boundary and ISO-8601 calendar-date strings inside the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A complete patient record as supplied by clients on create.
///
/// All fields are required; the identity is assigned by the store and is
/// never part of this payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PatientRecord {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub contact_number: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    pub visit_date: NaiveDate,
    pub doctor_name: String,
    pub diagnosis: String,
    pub prescription: String,
    pub appointment_date: NaiveDate,
    pub purpose: String,
    pub notes: String,
}

/// A persisted record: the store-assigned identity plus the record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

/// Sparse update payload; absent fields are dropped before application, so
/// an all-absent payload is a distinguishable no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PatientUpdate {
    /// The supplied fields as a JSON object, dates rendered as ISO-8601
    /// strings. Absent fields do not appear.
    pub fn to_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_fields().is_empty()
    }
}
