//! Location registry and key resolution.

use std::collections::BTreeMap;

use crate::config::LocationConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::Location;

/// An immutable map of location keys to locations.
///
/// Built once from configuration and handed to the engine, so tests can run
/// against alternate registries.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: BTreeMap<String, Location>,
}

impl LocationRegistry {
    /// Creates a registry from locations, keyed by their normalized key.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|location| (normalize_key(&location.key), location))
                .collect(),
        }
    }

    /// Builds the registry from the configured location entries.
    pub fn from_config(config: &BTreeMap<String, LocationConfig>) -> Self {
        Self::new(
            config
                .iter()
                .map(|(key, entry)| Location::from_config(key, entry)),
        )
    }

    /// Resolves a location key.
    ///
    /// The key is trimmed and lower-cased before lookup.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::extraction::LocationRegistry;
    /// use staff_report::models::Location;
    ///
    /// let registry = LocationRegistry::new([Location::new("kievskaya", "Моремания Киевская")]);
    /// let location = registry.resolve("  KievSkaya ").unwrap();
    /// assert_eq!(location.display_name, "Моремания Киевская");
    /// assert!(registry.resolve("arbat").is_err());
    /// ```
    pub fn resolve(&self, key: &str) -> ReportResult<&Location> {
        let key = normalize_key(key);
        self.locations
            .get(&key)
            .ok_or(ReportError::UnknownLocation { key })
    }

    /// Returns all locations ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Returns the number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if the registry has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
