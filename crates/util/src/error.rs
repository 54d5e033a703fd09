//! Error handling for Nebula utilities
//!
//! Every fallible operation in this crate returns [`UtilError`]. None of the
//! variants are retryable: they either signal a caller bug (a missing or
//! invalid argument) or a policy decision (mutation through a read-only view).

use std::borrow::Cow;

use thiserror::Error;

/// Utility error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtilError {
    /// A required argument was absent or does not name a valid value.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: Cow<'static, str>,
        /// What was wrong with it.
        reason: Cow<'static, str>,
    },

    /// Lookup of a key the underlying mapping does not contain.
    #[error("The given key was not present in the read-only view")]
    KeyNotFound,

    /// Attempted mutation through a read-only view.
    #[error("Operation not supported on a read-only view: {operation}")]
    Unsupported {
        /// The rejected operation, e.g. `"insert"` or `"keys.clear"`.
        operation: &'static str,
    },

    /// The enum member exists but declares no string value.
    #[error("No string value declared for {type_name}::{member}")]
    NotFound {
        /// Name of the enum type.
        type_name: &'static str,
        /// Declared name of the member.
        member: &'static str,
    },
}

impl UtilError {
    /// Create an invalid argument error
    pub fn invalid_argument(
        name: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error for an absent value
    pub fn null_argument(name: impl Into<Cow<'static, str>>) -> Self {
        Self::invalid_argument(name, "value cannot be null")
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a missing key error
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound)
    }

    /// Check if this is a rejected mutation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is a missing string value
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::KeyNotFound => "KEY_NOT_FOUND",
            Self::Unsupported { .. } => "UNSUPPORTED",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }
}
