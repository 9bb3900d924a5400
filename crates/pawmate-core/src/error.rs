//! Error types for the Pawmate core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every public operation in the workspace.
///
/// This provides typed, structured error variants so callers can react to
/// the failure class instead of parsing messages. No raw foreign error type
/// crosses a component boundary; conversions happen via `From` below.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PawmateError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// State machine precondition violated
    #[error("Invalid transition for {entity_type} '{id}': {detail}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        detail: String,
    },

    /// Actor is not allowed to perform the operation
    #[error("User '{user_id}' is not authorized to {action}")]
    Unauthorized { user_id: String, action: String },

    /// A non-terminal proposal already exists for the pair
    #[error("A walk proposal is already pending (match '{match_key}')")]
    DuplicateProposal { match_key: String },

    /// Wire document carried a message-kind tag outside the known range.
    /// This is a protocol violation (version skew), not user-correctable.
    #[error("Unknown message kind tag: {code}")]
    UnknownMessageKind { code: u32 },

    /// Remote store read/write/subscription failure
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Location or store access was revoked
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PawmateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(
        entity_type: impl Into<String>,
        id: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            entity_type: entity_type.into(),
            id: id.into(),
            detail: detail.into(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(user_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            user_id: user_id.into(),
            action: action.into(),
        }
    }

    /// Creates a DuplicateProposal error
    pub fn duplicate_proposal(match_key: impl Into<String>) -> Self {
        Self::DuplicateProposal {
            match_key: match_key.into(),
        }
    }

    /// Creates a RemoteUnavailable error
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a DuplicateProposal error
    pub fn is_duplicate_proposal(&self) -> bool {
        matches!(self, Self::DuplicateProposal { .. })
    }

    /// Check if this is an UnknownMessageKind error
    pub fn is_unknown_message_kind(&self) -> bool {
        matches!(self, Self::UnknownMessageKind { .. })
    }

    /// Check if this is a RemoteUnavailable error
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for PawmateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PawmateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for PawmateError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, PawmateError>`.
pub type Result<T> = std::result::Result<T, PawmateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = PawmateError::not_found("match", "m-1");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_transition());
        assert_eq!(err.to_string(), "Entity not found: match 'm-1'");
    }

    #[test]
    fn test_serialization_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err = PawmateError::from(json_err);
        assert!(matches!(err, PawmateError::Serialization { format, .. } if format == "JSON"));
    }
}
