//! Registry of temperature source factories.
//!
//! Provides a `SourceRegistry` struct for registering and creating
//! temperature sources by name. Constructed at startup and passed by value;
//! there is no global registry.

use esc_common::config::SamplerConfig;
use esc_common::sensor::source::{SampleError, SourceFactory, TemperatureSource};
use std::collections::HashMap;

/// Registry of available temperature sources.
pub struct SourceRegistry {
    factories: HashMap<&'static str, SourceFactory>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with every built-in source registered.
    pub fn with_builtin_sources() -> Self {
        let mut registry = Self::new();
        crate::sources::register_builtin_sources(&mut registry);
        registry
    }

    /// Register a source factory.
    ///
    /// # Panics
    /// Panics if a source with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: SourceFactory) {
        if self.factories.contains_key(name) {
            panic!("Temperature source '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a source factory by name.
    pub fn get_factory(&self, name: &str) -> Option<SourceFactory> {
        self.factories.get(name).copied()
    }

    /// Create a source instance by name.
    ///
    /// # Errors
    /// Returns `SampleError::SourceNotFound` if no source with the given name is
    /// registered, or whatever the factory reports.
    pub fn create_source(
        &self,
        name: &str,
        config: &SamplerConfig,
    ) -> Result<Box<dyn TemperatureSource>, SampleError> {
        let factory = self
            .get_factory(name)
            .ok_or_else(|| SampleError::SourceNotFound(name.to_string()))?;
        factory(config)
    }

    /// List all registered source names, sorted.
    pub fn list_sources(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
