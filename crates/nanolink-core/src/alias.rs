use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 64;

/// A validated short alias identifying a stored URL record.
///
/// Aliases are 1-64 characters long and contain only alphanumeric
/// characters, hyphens, or underscores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias(String);

impl Alias {
    /// Creates a new `Alias` after validating the input.
    pub fn new(alias: impl Into<String>) -> std::result::Result<Self, StoreError> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for aliases produced by trusted internal sources
    /// (the generators only emit characters from the valid alphabet).
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the alias, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(alias: &str) -> std::result::Result<(), StoreError> {
        if alias.len() < MIN_LENGTH || alias.len() > MAX_LENGTH {
            return Err(StoreError::InvalidInput(format!(
                "alias length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                alias.len()
            )));
        }

        if !alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::InvalidInput(format!(
                "alias must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                alias
            )));
        }

        Ok(())
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
