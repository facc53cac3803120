//! Alert boundary: severities, alert payloads and the handler trait.

pub mod handler;
pub mod types;
