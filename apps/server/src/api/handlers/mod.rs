//! Request handlers

pub mod bmi;
pub mod image;
pub mod patient;
pub mod token;
