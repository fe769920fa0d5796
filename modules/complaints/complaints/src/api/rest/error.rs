use axum::extract::rejection::JsonRejection;
use http::StatusCode;

use crate::api::rest::problem::Problem;
use crate::domain::error::DomainError;

/// Map domain error to RFC9457 Problem
#[must_use]
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    // Extract trace ID from current tracing span if available
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    let problem = match e {
        DomainError::Unauthorized { .. } => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "This operation is not available for your session",
        )
        .with_code("complaints.unauthorized"),
        DomainError::NotRegistered { .. } => Problem::new(
            StatusCode::FORBIDDEN,
            "Not registered",
            "Your account is not registered as a resident or manager",
        )
        .with_code("complaints.not_registered"),
        DomainError::MissingField { .. }
        | DomainError::InvalidAmenityType { .. }
        | DomainError::DescriptionTooLong { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Invalid request", e.to_string())
                .with_code("complaints.validation")
        }
        DomainError::NoManagerAssigned { .. } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No manager assigned",
            "No manager is assigned to your facility; contact the hostel office",
        )
        .with_code("complaints.no_manager_assigned"),
        DomainError::NotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not found",
            format!("'{id}' was not found"),
        )
        .with_code("complaints.not_found"),
        DomainError::InvalidTransition { id, from, to } => Problem::new(
            StatusCode::CONFLICT,
            "Invalid transition",
            format!("Complaint {id} is {from} and cannot be marked {to}"),
        )
        .with_code("complaints.invalid_transition"),
        DomainError::StoreUnavailable { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Datastore unavailable");
            Problem::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable",
                "The service is temporarily unavailable, please retry",
            )
            .with_code("complaints.store_unavailable")
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = ?e, "Internal error occurred");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                "An internal error occurred",
            )
            .with_code("complaints.internal")
        }
    };

    problem.with_instance(instance).with_trace_id(trace_id)
}

/// Map a rejected JSON request body to a validation Problem. An oversized
/// body keeps its 413.
#[must_use]
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    tracing::debug!(error = %rejection, "request body rejected");
    let problem = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Problem::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload too large",
            "The request body exceeds the allowed size",
        )
        .with_code("complaints.payload_too_large")
    } else {
        Problem::new(StatusCode::BAD_REQUEST, "Invalid request", rejection.body_text())
            .with_code("complaints.validation")
    };
    problem.with_instance(instance)
}

/// Implement Into<Problem> for `DomainError` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
