//! Bearer authentication for the complaints API.
//!
//! The identity provider verifies the token and yields `{email, display_name}`;
//! the identity resolver turns that into a [`SessionContext`], which is stored
//! in the request extensions for handlers to extract.

use std::sync::Arc;

use authn_resolver_sdk::{AuthNResolverClient, AuthNResolverError};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, Method, StatusCode, header};

use crate::api::rest::error::domain_error_to_problem;
use crate::api::rest::problem::Problem;
use crate::module::ConcreteAppServices;

#[derive(Clone)]
pub struct AuthState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
    pub services: Arc<ConcreteAppServices>,
}

pub async fn authn_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let Some(token) = extract_bearer_token(req.headers()) else {
        return Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Missing or invalid Authorization header",
        )
        .with_instance(req.uri().path())
        .into_response();
    };

    let identity = match state.authn_client.authenticate(token).await {
        Ok(identity) => identity,
        Err(err) => return authn_error_to_response(&err, req.uri().path()),
    };

    match state
        .services
        .identity
        .open_session(&identity.email, &identity.display_name)
        .await
    {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => domain_error_to_problem(&err, req.uri().path()).into_response(),
    }
}

fn authn_error_to_response(err: &AuthNResolverError, instance: &str) -> Response {
    log_authn_error(err);
    let (status, title, detail) = match err {
        AuthNResolverError::Unauthorized(_) => (
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication failed",
        ),
        AuthNResolverError::ServiceUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
            "Authentication service unavailable",
        ),
        AuthNResolverError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authentication error",
        ),
    };
    Problem::new(status, title, detail)
        .with_instance(instance)
        .into_response()
}

fn log_authn_error(err: &AuthNResolverError) {
    match err {
        AuthNResolverError::Unauthorized(msg) => tracing::debug!("AuthN rejected: {msg}"),
        AuthNResolverError::ServiceUnavailable(msg) => {
            tracing::error!("AuthN service unavailable: {msg}");
        }
        AuthNResolverError::Internal(msg) => tracing::error!("AuthN internal error: {msg}"),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
        .filter(|t| !t.is_empty())
}

fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
