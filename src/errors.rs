//! Error types for mock definition resolution
//!
//! Every failure is a permanent classification failure: nothing is retried and
//! no partial table is ever returned. Classification and validation run before
//! any table is built, so a failed request leaves no observable state behind.
//!
//! # Error Codes
//!
//! - E060-E064: type classification and reference errors
//! - E070-E072: definition and naming errors

use thiserror::Error;

/// Stable code attached to each error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// More than one extensible type was requested
    pub const MULTIPLE_BASE_TYPES: ErrorCode = ErrorCode("E060");
    /// The extensible type forbids extension
    pub const SEALED_TYPE: ErrorCode = ErrorCode("E061");
    /// A requested type is unknown
    pub const INVALID_TYPE_REFERENCE: ErrorCode = ErrorCode("E062");
    /// Two different descriptors share one type name
    pub const CONFLICTING_TYPE: ErrorCode = ErrorCode("E063");
    /// An ad-hoc definition has a malformed key or value
    pub const INVALID_DEFINITION: ErrorCode = ErrorCode("E070");
    /// An explicit type name is not a legal identifier
    pub const INVALID_TYPE_NAME: ErrorCode = ErrorCode("E071");
    /// The definition was already finalized
    pub const FINALIZED: ErrorCode = ErrorCode("E072");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolution failures surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// More than one extensible source type
    #[error("Unable to extend '{second}': already extending '{first}'")]
    MultipleBaseTypes { first: String, second: String },

    /// The base type is sealed
    #[error("Unable to extend sealed type '{name}'")]
    SealedTypeExtension { name: String },

    /// A requested source type does not resolve to any known type
    #[error("Undefined type '{name}'")]
    InvalidTypeReference { name: String },

    /// Two different descriptors were supplied under the same name
    #[error("Conflicting definitions for type '{name}'")]
    ConflictingTypeDefinition { name: String },

    /// Malformed ad-hoc member definition
    #[error("Invalid definition '{key}': {reason}")]
    InvalidDefinition { key: String, reason: String },

    /// Explicit type name is not a legal identifier
    #[error("Invalid type name '{name}'")]
    InvalidTypeName { name: String },

    /// The definition can no longer be modified
    #[error("Unable to modify a finalized mock definition")]
    FinalizedDefinition,
}

impl ResolutionError {
    pub fn multiple_base_types(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::MultipleBaseTypes {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn sealed(name: impl Into<String>) -> Self {
        Self::SealedTypeExtension { name: name.into() }
    }

    pub fn invalid_type_reference(name: impl Into<String>) -> Self {
        Self::InvalidTypeReference { name: name.into() }
    }

    pub fn conflicting_type(name: impl Into<String>) -> Self {
        Self::ConflictingTypeDefinition { name: name.into() }
    }

    pub fn invalid_definition(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_type_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName { name: name.into() }
    }

    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MultipleBaseTypes { .. } => ErrorCode::MULTIPLE_BASE_TYPES,
            Self::SealedTypeExtension { .. } => ErrorCode::SEALED_TYPE,
            Self::InvalidTypeReference { .. } => ErrorCode::INVALID_TYPE_REFERENCE,
            Self::ConflictingTypeDefinition { .. } => ErrorCode::CONFLICTING_TYPE,
            Self::InvalidDefinition { .. } => ErrorCode::INVALID_DEFINITION,
            Self::InvalidTypeName { .. } => ErrorCode::INVALID_TYPE_NAME,
            Self::FinalizedDefinition => ErrorCode::FINALIZED,
        }
    }

    /// Errors caused by the requested type set rather than by member definitions
    pub fn is_classification_error(&self) -> bool {
        matches!(
            self,
            Self::MultipleBaseTypes { .. }
                | Self::SealedTypeExtension { .. }
                | Self::InvalidTypeReference { .. }
                | Self::ConflictingTypeDefinition { .. }
        )
    }
}

/// Result type alias using the resolution error type
pub type Result<T> = std::result::Result<T, ResolutionError>;
