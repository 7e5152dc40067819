//! Image classification handler

use crate::{state::AppState, Error, Result};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

/// `POST /process_image` - accept a multipart image upload, persist it to a
/// transient location, and run it through the pretrained classifier.
///
/// Inference is CPU-bound and the ONNX session is synchronous, so the work
/// runs on a blocking thread.
pub async fn process_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let classifier = state
        .classifier
        .clone()
        .ok_or_else(|| Error::Inference("Classifier model is not loaded".to_string()))?;

    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::UnprocessableEntity(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::UnprocessableEntity(format!("Failed to read upload: {e}")))?;
            file_bytes = Some(bytes.to_vec());
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| Error::UnprocessableEntity("Missing 'file' field".to_string()))?;

    let label = tokio::task::spawn_blocking(move || -> Result<&'static str> {
        // Transient upload location; removed when the handle drops.
        let tmp = tempfile::NamedTempFile::new()
            .map_err(|e| Error::Internal(format!("Failed to create temp file: {e}")))?;
        std::fs::write(tmp.path(), &bytes)
            .map_err(|e| Error::Internal(format!("Failed to write upload: {e}")))?;

        classifier.classify_file(tmp.path())
    })
    .await
    .map_err(|e| Error::Internal(format!("Inference task failed: {e}")))??;

    Ok(Json(json!({
        "label": format!("This image represents: {label}"),
    })))
}
