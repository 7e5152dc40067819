//! CRUD integration tests for the patient record endpoints

#[allow(unused)]
#[path = "../support/mod.rs"]
mod support;

mod delete;
mod read;
mod update;
