//! Response envelopes for record endpoints
//!
//! Both shapes are returned with transport status 200; the `code` field is
//! informational and callers are expected to inspect the envelope.

use serde::{Deserialize, Serialize};

/// Success wrapper: `{ "data": [payload], "code": 200, "message": ... }`.
///
/// The payload is held in a one-element tuple so it serializes as a
/// single-element JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub data: (T,),
    pub code: u16,
    pub message: String,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data: (data,),
            code: 200,
            message: message.into(),
        }
    }

    pub fn into_data(self) -> T {
        self.data.0
    }
}

/// Error wrapper: `{ "error": ..., "code": ..., "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            message: message.into(),
        }
    }
}
