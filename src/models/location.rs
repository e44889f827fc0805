//! Location model.

use serde::Serialize;

use crate::config::LocationConfig;
use crate::error::{ReportError, ReportResult};

/// A business location as known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Normalized location key (e.g. "kievskaya").
    pub key: String,
    /// Marker text of the location in the staff roster.
    pub display_name: String,
    #[serde(skip)]
    secret: Option<String>,
    #[serde(skip)]
    destination: Option<String>,
}

impl Location {
    /// Creates a location with no secret and no destination.
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            secret: None,
            destination: None,
        }
    }

    /// Sets the shared secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets the destination chat id.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Builds a location from its configuration entry, reading any
    /// environment variables it refers to.
    ///
    /// Blank values count as unset, both literal and from the environment.
    pub fn from_config(key: &str, config: &LocationConfig) -> Self {
        let literal = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        let from_env = |name: &Option<String>| {
            name.as_deref()
                .and_then(|var| std::env::var(var).ok())
                .filter(|value| !value.trim().is_empty())
        };

        Self {
            key: key.trim().to_lowercase(),
            display_name: config.display_name.clone(),
            secret: literal(&config.password).or_else(|| from_env(&config.password_env)),
            destination: literal(&config.chat_id).or_else(|| from_env(&config.chat_id_env)),
        }
    }

    /// Returns the destination chat id, if one is configured.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Checks a candidate password against the shared secret.
    ///
    /// A location without a configured secret rejects every candidate.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::models::Location;
    ///
    /// let location = Location::new("kievskaya", "Моремания Киевская").with_secret("s3cret");
    /// assert!(location.verify_password("s3cret").is_ok());
    /// assert!(location.verify_password("guess").is_err());
    /// ```
    pub fn verify_password(&self, candidate: &str) -> ReportResult<()> {
        match &self.secret {
            Some(secret) if secret == candidate => Ok(()),
            _ => Err(ReportError::Unauthorized {
                key: self.key.clone(),
            }),
        }
    }
}
