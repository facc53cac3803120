//! Sensor boundary types and the temperature source trait.
//!
//! This module contains the types shared between the monitor core and
//! whatever backend supplies temperature readings.

pub mod source;
pub mod types;
