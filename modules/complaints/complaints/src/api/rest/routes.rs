use std::sync::Arc;

use authn_resolver_sdk::AuthNResolverClient;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router, middleware};
use utoipa::OpenApi;

use crate::api::rest::auth::{AuthState, authn_middleware};
use crate::api::rest::{dto, handlers, problem};
use crate::module::ConcreteAppServices;

pub const OPENAPI_PATH: &str = "/hostel/v1/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Hostel maintenance API", version = "1"),
    paths(
        handlers::get_session,
        handlers::file_complaint,
        handlers::list_my_complaints,
        handlers::confirm_resolution,
        handlers::list_managed_complaints,
        handlers::resolve_complaint,
        handlers::get_stats,
        handlers::health,
    ),
    components(schemas(
        dto::SessionDto,
        dto::CreateComplaintReq,
        dto::ComplaintDto,
        dto::ManagedComplaintDto,
        dto::StatsDto,
        dto::TransitionDto,
        dto::HealthDto,
        problem::Problem,
    )),
    tags(
        (name = "Session", description = "Caller identity"),
        (name = "Resident", description = "Filing and confirming complaints"),
        (name = "Manager", description = "Resolving complaints and statistics"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complaints router. Everything under `/hostel/v1` except the
/// `OpenAPI` document requires a bearer token.
#[must_use]
pub fn register_routes(
    services: Arc<ConcreteAppServices>,
    authn_client: Arc<dyn AuthNResolverClient>,
) -> Router {
    let auth_state = AuthState {
        authn_client,
        services: Arc::clone(&services),
    };

    let protected = Router::new()
        .route("/hostel/v1/session", get(handlers::get_session))
        .route(
            "/hostel/v1/resident/complaints",
            post(handlers::file_complaint).get(handlers::list_my_complaints),
        )
        .route(
            "/hostel/v1/resident/complaints/{id}/confirm",
            post(handlers::confirm_resolution),
        )
        .route(
            "/hostel/v1/manager/complaints",
            get(handlers::list_managed_complaints),
        )
        .route(
            "/hostel/v1/manager/complaints/{id}/resolve",
            put(handlers::resolve_complaint),
        )
        .route("/hostel/v1/manager/stats", get(handlers::get_stats))
        .route_layer(middleware::from_fn_with_state(auth_state, authn_middleware));

    let public = Router::new()
        .route("/health", get(handlers::health))
        .route(OPENAPI_PATH, get(openapi_json));

    protected.merge(public).layer(Extension(services))
}
