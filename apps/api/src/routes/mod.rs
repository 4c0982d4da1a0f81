pub mod health;

use axum::{routing::get, Router};

use crate::applicants::handlers as applicants;
use crate::notes::handlers as notes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/applicant/",
            get(applicants::handle_list_applicants)
                .post(applicants::handle_create_applicant)
                .fallback(applicants::handle_applicant_method_fallback),
        )
        .route(
            "/applicant/:id/",
            get(applicants::handle_get_applicant)
                .put(applicants::handle_update_applicant_status)
                .delete(applicants::handle_delete_applicant)
                .fallback(applicants::handle_applicant_method_fallback),
        )
        .route(
            "/applicant/:id/note/",
            get(notes::handle_list_notes)
                .post(notes::handle_create_note)
                .fallback(notes::handle_note_method_fallback),
        )
        .with_state(state)
}
