//! Service layer - upstream clients and inference

pub mod bmi;
pub mod classifier;

pub use bmi::BmiClient;
pub use classifier::ImageClassifier;
