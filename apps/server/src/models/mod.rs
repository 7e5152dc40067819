//! Domain models - patient schema and response envelopes

pub mod envelope;
pub mod patient;

pub use envelope::{ErrorEnvelope, SuccessEnvelope};
pub use patient::{Patient, PatientRecord, PatientUpdate};
