//! Route definitions

pub mod patient;
