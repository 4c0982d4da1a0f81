//! Persistence seam for applicants and their notes.
//!
//! Handlers only see `Arc<dyn Store>`. Production wires in [`PgStore`]; the
//! router tests use the in-memory implementation. Uniqueness and ownership
//! rules are enforced by the backend and reported as [`StoreError`] variants.

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::applicant::{Applicant, ApplicantStatus, NewApplicant};
use crate::models::note::{NewNote, Note};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an applicant with this email already exists")]
    DuplicateEmail,

    #[error("applicant {0} does not exist")]
    MissingApplicant(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] anyhow::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// All applicants, oldest first.
    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError>;

    /// Inserts with a fresh id and `PENDING` status.
    async fn insert_applicant(&self, new: NewApplicant) -> Result<Applicant, StoreError>;

    async fn fetch_applicant(&self, id: Uuid) -> Result<Option<Applicant>, StoreError>;

    /// Returns `None` when the applicant does not exist.
    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
    ) -> Result<Option<Applicant>, StoreError>;

    /// Removes the applicant and every note it owns. Returns `false` when
    /// nothing was deleted.
    async fn delete_applicant(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Notes owned by `applicant_id`, oldest first. Unknown owners yield an
    /// empty list.
    async fn list_notes(&self, applicant_id: Uuid) -> Result<Vec<Note>, StoreError>;

    async fn insert_note(&self, applicant_id: Uuid, new: NewNote) -> Result<Note, StoreError>;
}
