use complaints_sdk::{ComplaintStatus, ComplaintsError};
use hostel_security::SessionError;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("No resident or manager is registered with email '{email}'")]
    NotRegistered { email: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid amenity type: '{value}'")]
    InvalidAmenityType { value: String },

    #[error("Description too long: {len} characters (max: {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("No manager is assigned to facility {}", facility.as_deref().unwrap_or("<none>"))]
    NoManagerAssigned { facility: Option<String> },

    #[error("Not found: {id}")]
    NotFound { id: String },

    #[error("Complaint {id} is {from}, cannot move to {to}")]
    InvalidTransition {
        id: String,
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_registered(email: impl Into<String>) -> Self {
        Self::NotRegistered {
            email: email.into(),
        }
    }

    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    #[must_use]
    pub fn invalid_amenity_type(value: impl Into<String>) -> Self {
        Self::InvalidAmenityType {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn description_too_long(len: usize, max: usize) -> Self {
        Self::DescriptionTooLong { len, max }
    }

    #[must_use]
    pub fn no_manager_assigned(facility: Option<String>) -> Self {
        Self::NoManagerAssigned { facility }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub fn invalid_transition(
        id: impl Into<String>,
        from: ComplaintStatus,
        to: ComplaintStatus,
    ) -> Self {
        Self::InvalidTransition {
            id: id.into(),
            from,
            to,
        }
    }

    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<SessionError> for DomainError {
    fn from(e: SessionError) -> Self {
        Self::unauthorized(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for ComplaintsError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::Unauthorized { .. } => ComplaintsError::Unauthorized,
            DomainError::NotRegistered { .. } => ComplaintsError::NotRegistered,
            DomainError::MissingField { field } => ComplaintsError::missing_field(field),
            DomainError::InvalidAmenityType { value } => {
                ComplaintsError::invalid_amenity_type(value)
            }
            DomainError::DescriptionTooLong { len, max } => ComplaintsError::validation(format!(
                "Description too long: {len} characters (max: {max})"
            )),
            DomainError::NoManagerAssigned { .. } => ComplaintsError::NoManagerAssigned,
            DomainError::NotFound { id } => ComplaintsError::not_found(id),
            DomainError::InvalidTransition { id, to, .. } => {
                ComplaintsError::invalid_transition(id, to.as_str())
            }
            DomainError::StoreUnavailable { .. } => ComplaintsError::StoreUnavailable,
            DomainError::Internal { .. } => ComplaintsError::Internal,
        }
    }
}
