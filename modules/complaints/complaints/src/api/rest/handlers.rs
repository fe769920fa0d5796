use std::sync::Arc;

use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, Uri};
use axum::{Extension, Json};
use complaints_sdk::ComplaintStatus;
use hostel_security::SessionContext;
use tracing::field::Empty;

use crate::api::rest::dto::{
    ComplaintDto, CreateComplaintReq, HealthDto, ManagedComplaintDto, SessionDto, StatsDto,
    TransitionDto,
};
use crate::api::rest::error::{domain_error_to_problem, json_rejection_to_problem};
use crate::api::rest::problem::Problem;
use crate::module::ConcreteAppServices;

pub type ApiResult<T> = Result<T, Problem>;

// ==================== Session ====================

/// Who am I: role, principal id, facility, email and display name.
#[utoipa::path(
    get,
    path = "/hostel/v1/session",
    tag = "Session",
    responses(
        (status = 200, description = "Session resolved", body = SessionDto),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 403, description = "Identity not registered", body = Problem),
    )
)]
#[tracing::instrument(skip(ctx), fields(subject = %ctx.subject_id()))]
pub async fn get_session(Extension(ctx): Extension<SessionContext>) -> Json<SessionDto> {
    Json(SessionDto::from(&ctx))
}

// ==================== Resident ====================

/// File a complaint for the caller's facility.
#[utoipa::path(
    post,
    path = "/hostel/v1/resident/complaints",
    tag = "Resident",
    request_body = CreateComplaintReq,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintDto),
        (status = 400, description = "Malformed body, missing field or unknown amenity type", body = Problem),
        (status = 401, description = "Not a resident session", body = Problem),
        (status = 404, description = "Amenity not found", body = Problem),
        (status = 422, description = "No manager assigned to the facility", body = Problem),
        (status = 503, description = "Datastore unavailable", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx, body), fields(subject = %ctx.subject_id(), complaint_id = Empty))]
pub async fn file_complaint(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    uri: Uri,
    body: Result<Json<CreateComplaintReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ComplaintDto>)> {
    let Json(req) = body.map_err(|rejection| json_rejection_to_problem(&rejection, uri.path()))?;
    let created = svc
        .complaints
        .file_complaint(&ctx, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    tracing::Span::current().record("complaint_id", created.id.as_str());
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Complaints filed by the caller, newest first.
#[utoipa::path(
    get,
    path = "/hostel/v1/resident/complaints",
    tag = "Resident",
    responses(
        (status = 200, description = "Caller's complaints", body = [ComplaintDto]),
        (status = 401, description = "Not a resident session", body = Problem),
        (status = 503, description = "Datastore unavailable", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx), fields(subject = %ctx.subject_id()))]
pub async fn list_my_complaints(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    uri: Uri,
) -> ApiResult<Json<Vec<ComplaintDto>>> {
    let complaints = svc
        .complaints
        .list_my_complaints(&ctx)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(complaints.into_iter().map(Into::into).collect()))
}

/// Confirm that a resolved complaint is fixed.
#[utoipa::path(
    post,
    path = "/hostel/v1/resident/complaints/{id}/confirm",
    tag = "Resident",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint confirmed", body = TransitionDto),
        (status = 401, description = "Not a resident session", body = Problem),
        (status = 404, description = "No such complaint filed by the caller", body = Problem),
        (status = 409, description = "Complaint is not resolved", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx), fields(subject = %ctx.subject_id()))]
pub async fn confirm_resolution(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<TransitionDto>> {
    svc.complaints
        .confirm_resolution(&ctx, &id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(TransitionDto {
        id,
        status: ComplaintStatus::Confirmed.to_string(),
    }))
}

// ==================== Manager ====================

/// Complaints routed to the caller, newest first, with filer details.
#[utoipa::path(
    get,
    path = "/hostel/v1/manager/complaints",
    tag = "Manager",
    responses(
        (status = 200, description = "Routed complaints", body = [ManagedComplaintDto]),
        (status = 401, description = "Not a manager session", body = Problem),
        (status = 503, description = "Datastore unavailable", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx), fields(subject = %ctx.subject_id()))]
pub async fn list_managed_complaints(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    uri: Uri,
) -> ApiResult<Json<Vec<ManagedComplaintDto>>> {
    let complaints = svc
        .complaints
        .list_managed_complaints(&ctx)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(complaints.into_iter().map(Into::into).collect()))
}

/// Mark a pending complaint resolved.
#[utoipa::path(
    put,
    path = "/hostel/v1/manager/complaints/{id}/resolve",
    tag = "Manager",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint resolved", body = TransitionDto),
        (status = 401, description = "Not a manager session", body = Problem),
        (status = 404, description = "No such complaint routed to the caller", body = Problem),
        (status = 409, description = "Complaint is not pending", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx), fields(subject = %ctx.subject_id()))]
pub async fn resolve_complaint(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<TransitionDto>> {
    svc.complaints
        .resolve_complaint(&ctx, &id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(TransitionDto {
        id,
        status: ComplaintStatus::Resolved.to_string(),
    }))
}

/// Per-status counts for the caller's complaints.
#[utoipa::path(
    get,
    path = "/hostel/v1/manager/stats",
    tag = "Manager",
    responses(
        (status = 200, description = "Counts by status", body = StatsDto),
        (status = 401, description = "Not a manager session", body = Problem),
        (status = 503, description = "Datastore unavailable", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, ctx), fields(subject = %ctx.subject_id()))]
pub async fn get_stats(
    Extension(ctx): Extension<SessionContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    uri: Uri,
) -> ApiResult<Json<StatsDto>> {
    let stats = svc
        .stats
        .get_stats(&ctx)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(stats.into()))
}

// ==================== Public ====================

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthDto))
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
