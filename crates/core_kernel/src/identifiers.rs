//! Strongly-typed identifiers for domain entities
//!
//! Claims and audit entries are identified by prefixed, zero-padded sequence
//! numbers (`CLM001`, `AL001`). Wrapping the sequence in a newtype keeps the
//! two identifier spaces from being mixed and gives every id a single
//! canonical textual form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when parsing an identifier from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Identifier {value:?} does not start with prefix {prefix}")]
    MissingPrefix { prefix: &'static str, value: String },

    #[error("Identifier {value:?} has an invalid sequence number")]
    InvalidSequence { value: String },

    #[error("Identifier must not be empty")]
    Empty,
}

macro_rules! define_sequence_id {
    ($name:ident, $prefix:literal, $width:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(u64);

        impl $name {
            /// Creates the identifier for a sequence number
            pub const fn from_sequence(sequence: u64) -> Self {
                Self(sequence)
            }

            /// Returns the underlying sequence number
            pub fn sequence(&self) -> u64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{:0width$}", $prefix, self.0, width = $width)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix($prefix)
                    .ok_or_else(|| IdentifierError::MissingPrefix {
                        prefix: $prefix,
                        value: s.to_string(),
                    })?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(IdentifierError::InvalidSequence { value: s.to_string() });
                }
                let sequence = digits
                    .parse::<u64>()
                    .map_err(|_| IdentifierError::InvalidSequence { value: s.to_string() })?;
                // Only the padded form is accepted: CLM01 and CLM0001 are not CLM001
                if format!("{:0width$}", sequence, width = $width) != digits {
                    return Err(IdentifierError::InvalidSequence { value: s.to_string() });
                }
                Ok(Self(sequence))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.to_string()
            }
        }
    };
}

define_sequence_id!(ClaimId, "CLM", 3);
define_sequence_id!(AuditEntryId, "AL", 3);

/// Identifier of a user in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u32);

impl UserId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| IdentifierError::InvalidSequence { value: s.to_string() })
    }
}

/// Identifier of a saved view (`sv1`, `sv2`, ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedViewId(String);

impl SavedViewId {
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self(id))
    }

    /// For built-in views whose ids are known at compile time
    pub fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SavedViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SavedViewId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}
