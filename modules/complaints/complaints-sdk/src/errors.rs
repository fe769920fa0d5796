//! Public error types for the complaints module.
//!
//! These errors are safe to expose to other modules and end users. None of
//! them carries datastore detail.

use thiserror::Error;

/// Errors that can be returned by the `ComplaintsClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplaintsError {
    /// No valid session, or the session's role cannot perform the operation.
    #[error("Unauthorized")]
    Unauthorized,

    /// The verified identity maps to neither a resident nor a manager.
    #[error("User is not registered in the system")]
    NotRegistered,

    /// A required input field was empty.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The amenity type tag is not one of `Room`, `Washroom`, `Filter`.
    #[error("Invalid amenity type: '{value}'")]
    InvalidAmenityType { value: String },

    /// Input was present but rejected.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The caller's facility has no responsible manager.
    #[error("No manager is assigned to this facility")]
    NoManagerAssigned,

    /// Entity absent, or the caller does not own it.
    #[error("Not found: {id}")]
    NotFound { id: String },

    /// The complaint is not in the status the transition requires.
    #[error("Complaint {id} cannot be moved to {target}")]
    InvalidTransition { id: String, target: String },

    /// The datastore could not be reached. The only retryable error.
    #[error("Service temporarily unavailable")]
    StoreUnavailable,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl ComplaintsError {
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn invalid_amenity_type(value: impl Into<String>) -> Self {
        Self::InvalidAmenityType {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub fn invalid_transition(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self::InvalidTransition {
            id: id.into(),
            target: target.into(),
        }
    }

    /// Whether a caller may retry the same request later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable)
    }
}
