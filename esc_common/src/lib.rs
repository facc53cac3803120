//! ESC Monitor Common Library
//!
//! Shared constants, configuration loading and the two collaborator
//! boundaries of the ESC temperature monitor.
//!
//! # Module Structure
//!
//! - [`consts`] - Default thresholds, cadences and limits
//! - [`config`] - `MonitorConfig` and the TOML loading trait
//! - [`sensor`] - Channels, samples and the `TemperatureSource` trait
//! - [`alert`] - Severities, alerts and the `AlertHandler` trait
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use esc_common::prelude::*;
//!
//! let config = MonitorConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.channels.count, DEFAULT_CHANNEL_COUNT);
//! ```

pub mod alert;
pub mod config;
pub mod consts;
pub mod prelude;
pub mod sensor;
