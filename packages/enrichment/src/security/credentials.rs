//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.
//! Credentials arrive through the environment; an unset or empty
//! variable counts as missing.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{EnrichmentError, Result};

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this at the point of use (e.g. an API request header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Read a required credential from the environment.
///
/// Fatal at startup: callers are expected to propagate this before any
/// run work begins.
pub fn require_env(var: &str) -> Result<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::new)
        .ok_or_else(|| EnrichmentError::MissingCredential {
            var: var.to_string(),
        })
}

/// Read an optional credential from the environment.
pub fn optional_env(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::new)
}
