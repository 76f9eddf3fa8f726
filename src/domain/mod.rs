//! Core domain types: configuration models, run summary, raw-record accessors.
pub mod model;
pub mod record;
