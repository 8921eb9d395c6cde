//! Validated identifier and name newtypes
//!
//! These newtypes ensure that values are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for business unit codes and location identifiers
const MAX_CODE_LENGTH: usize = 64;

/// Maximum length for product and store names (matches the `name` column width)
const MAX_NAME_LENGTH: usize = 40;

fn validated(label: &str, value: String, max_len: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{label} cannot be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{label} cannot exceed {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

macro_rules! validated_string {
    ($(#[$meta:meta])* $name:ident, $label:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a new validated ", $label, ".")]
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the value is empty after
            /// trimming or exceeds the length limit.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                validated($label, value.into(), $max).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_string!(
    /// Externally assigned, globally unique warehouse identifier (e.g. `MWH.001`).
    BusinessUnitCode,
    "Business unit code",
    MAX_CODE_LENGTH
);

validated_string!(
    /// Key of a location in the location directory (e.g. `AMSTERDAM-001`).
    LocationIdentifier,
    "Location identifier",
    MAX_CODE_LENGTH
);

validated_string!(ProductName, "Product name", MAX_NAME_LENGTH);

validated_string!(StoreName, "Store name", MAX_NAME_LENGTH);
