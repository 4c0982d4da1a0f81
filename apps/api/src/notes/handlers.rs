use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::auth::permissions::{authorize, Resource};
use crate::auth::Caller;
use crate::errors::{missing_applicant_message, AppError, FieldErrors};
use crate::models::note::Note;
use crate::notes::payload::NotePayload;
use crate::state::AppState;

/// GET /applicant/:id/note/
///
/// Filtering by an owner that does not exist, or by an id that is not a
/// UUID, yields an empty list.
pub async fn handle_list_notes(
    State(state): State<AppState>,
    caller: Caller,
    method: Method,
    Path(id): Path<String>,
) -> Result<Json<Vec<Note>>, AppError> {
    authorize(&caller, Resource::Note, &method)?;

    let Ok(applicant_id) = Uuid::parse_str(&id) else {
        return Ok(Json(Vec::new()));
    };
    let notes = state.store.list_notes(applicant_id).await?;
    Ok(Json(notes))
}

/// POST /applicant/:id/note/
///
/// Owner and body problems are reported together in one set of field errors.
pub async fn handle_create_note(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Result<Json<NotePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    authorize(&caller, Resource::Note, &Method::POST)?;
    let mut errors = FieldErrors::new();

    let applicant_id = match Uuid::parse_str(&id) {
        Ok(applicant_id) => Some(applicant_id),
        Err(_) => {
            errors.add("applicant", format!("\"{id}\" is not a valid UUID."));
            None
        }
    };
    if let Some(applicant_id) = applicant_id {
        if state.store.fetch_applicant(applicant_id).await?.is_none() {
            errors.add("applicant", missing_applicant_message(applicant_id));
        }
    }

    let new = match body {
        Ok(Json(payload)) => payload.validate_into(&mut errors),
        Err(rejection) => {
            errors.add("non_field_errors", rejection.body_text());
            None
        }
    };

    match (applicant_id, new) {
        (Some(applicant_id), Some(new)) if errors.is_empty() => {
            // the owner can still vanish before the insert; the store reports it
            let note = state.store.insert_note(applicant_id, new).await?;
            Ok((StatusCode::CREATED, Json(note)))
        }
        _ => Err(AppError::Validation(errors)),
    }
}

/// Any verb not routed on the note endpoint.
pub async fn handle_note_method_fallback(
    caller: Caller,
    method: Method,
) -> Result<StatusCode, AppError> {
    authorize(&caller, Resource::Note, &method).map(|_| StatusCode::METHOD_NOT_ALLOWED)
}
