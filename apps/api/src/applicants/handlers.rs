use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::applicants::payload::{ApplicantPayload, StatusPayload};
use crate::auth::permissions::{authorize, Resource};
use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::applicant::Applicant;
use crate::state::AppState;
use crate::validation::json_body;

/// Path ids that are not UUIDs resolve to nothing.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// GET /applicant/
///
/// axum also routes HEAD here, so the evaluator sees the request's own verb.
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    caller: Caller,
    method: Method,
) -> Result<Json<Vec<Applicant>>, AppError> {
    authorize(&caller, Resource::Applicant, &method)?;
    let applicants = state.store.list_applicants().await?;
    Ok(Json(applicants))
}

/// POST /applicant/
pub async fn handle_create_applicant(
    State(state): State<AppState>,
    caller: Caller,
    body: Result<Json<ApplicantPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Applicant>), AppError> {
    let identity = authorize(&caller, Resource::Applicant, &Method::POST)?;
    let new = json_body(body)?.validate()?;

    let applicant = state.store.insert_applicant(new).await?;
    tracing::info!(
        "Applicant {} ({}) created by {}",
        applicant.id,
        applicant.full_name(),
        identity.username
    );
    Ok((StatusCode::CREATED, Json(applicant)))
}

/// GET /applicant/:id/
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    caller: Caller,
    method: Method,
    Path(id): Path<String>,
) -> Result<Json<Applicant>, AppError> {
    authorize(&caller, Resource::Applicant, &method)?;
    let id = parse_id(&id)?;

    let applicant = state
        .store
        .fetch_applicant(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(applicant))
}

/// PUT /applicant/:id/
///
/// Existence is checked before the body, so an unknown id with a bad status
/// still reports not-found.
pub async fn handle_update_applicant_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Result<Json<StatusPayload>, JsonRejection>,
) -> Result<Json<Applicant>, AppError> {
    authorize(&caller, Resource::Applicant, &Method::PUT)?;
    let id = parse_id(&id)?;

    if state.store.fetch_applicant(id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let status = json_body(body)?.validate()?;
    let applicant = state
        .store
        .update_applicant_status(id, status)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(applicant))
}

/// DELETE /applicant/:id/
pub async fn handle_delete_applicant(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    authorize(&caller, Resource::Applicant, &Method::DELETE)?;
    let id = parse_id(&id)?;

    if !state.store.delete_applicant(id).await? {
        return Err(AppError::NotFound);
    }
    Ok(Json(json!({ "res": "Object deleted!" })))
}

/// Any verb not routed on the applicant endpoints. The evaluator denies these,
/// so callers see 403 rather than 405.
pub async fn handle_applicant_method_fallback(
    caller: Caller,
    method: Method,
) -> Result<StatusCode, AppError> {
    authorize(&caller, Resource::Applicant, &method).map(|_| StatusCode::METHOD_NOT_ALLOWED)
}
