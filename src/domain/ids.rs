//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for staging identifiers.
//! Each type ensures type safety and provides validation for format compliance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Person identifier newtype wrapper
///
/// Represents the stable key of one child's case record in the staging
/// table. Opaque to this engine; assigned by the upstream loader and
/// carried through every read and write unchanged.
///
/// # Examples
///
/// ```
/// use hermes::domain::ids::PersonId;
/// use std::str::FromStr;
///
/// let person_id = PersonId::from_str("a1b2c3d4e5f60718293a4b5c6d7e8f90").unwrap();
/// assert_eq!(person_id.as_str(), "a1b2c3d4e5f60718293a4b5c6d7e8f90");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Creates a new PersonId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The person identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(PersonId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Person ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the person ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
