//! Brain-scan image classification against a pretrained ONNX artifact
//!
//! The model is an opaque black box: a single-input NHWC `[1, S, S, 1]`
//! grayscale network whose four outputs map to fixed category labels.
//! Inference is synchronous; callers run it on a blocking thread.

use crate::{Error, Result};
use image::imageops::FilterType;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// Category labels in model output order. An out-of-range argmax falls back
/// to the last label, matching the model's training layout.
pub const LABELS: [&str; 4] = ["Glioma", "Meningioma", "No tumor", "Pituitary"];

/// Uses interior mutability (Mutex) because ort::Session::run requires
/// `&mut self` while the handler shares the classifier behind an Arc.
pub struct ImageClassifier {
    session: Mutex<Session>,
    image_size: u32,
}

impl ImageClassifier {
    /// Load the pretrained model from disk.
    pub fn load(model_path: &Path, image_size: u32) -> Result<Self> {
        if !model_path.exists() {
            return Err(Error::Inference(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| Error::Inference(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| Error::Inference(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| Error::Inference(format!("ONNX load failed: {e}")))?;

        tracing::info!(
            model = %model_path.display(),
            image_size,
            "Image classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            image_size,
        })
    }

    /// Classify the image stored at `path`, returning the predicted label.
    pub fn classify_file(&self, path: &Path) -> Result<&'static str> {
        let img = image::open(path).map_err(|e| Error::InvalidImage(e.to_string()))?;
        let input = prepare(&img, self.image_size);
        self.classify_tensor(input)
    }

    fn classify_tensor(&self, input: Array4<f32>) -> Result<&'static str> {
        let tensor = TensorRef::from_array_view(&input)
            .map_err(|e| Error::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Inference("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| Error::Inference(format!("ONNX inference failed: {e}")))?;

        let (_shape, probabilities) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference(format!("Output extraction: {e}")))?;

        Ok(predict(probabilities))
    }
}

/// Grayscale, scale pixel values to [0, 1], and resize to the model's square
/// input resolution. Output shape is NHWC `[1, size, size, 1]`.
fn prepare(img: &image::DynamicImage, size: u32) -> Array4<f32> {
    let gray = img.to_luma8();
    let resized = image::imageops::resize(&gray, size, size, FilterType::Triangle);

    Array4::from_shape_fn((1, size as usize, size as usize, 1), |(_, y, x, _)| {
        f32::from(resized.get_pixel(x as u32, y as u32)[0]) / 255.0
    })
}

/// Map the highest-probability output index to its category label.
fn predict(probabilities: &[f32]) -> &'static str {
    let argmax = probabilities
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(LABELS.len() - 1);

    LABELS.get(argmax).copied().unwrap_or(LABELS[LABELS.len() - 1])
}
