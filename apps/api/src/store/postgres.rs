use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::applicant::{Applicant, ApplicantRow, ApplicantStatus, NewApplicant};
use crate::models::note::{NewNote, Note};

const APPLICANT_COLUMNS: &str = "id, first_name, last_name, email, phone_number, address, \
     zip_code, state, status, created_at";

/// `Store` backed by the PostgreSQL schema in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps constraint violations onto the store's domain errors.
fn classify(err: sqlx::Error, applicant_id: Option<Uuid>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
        if db_err.is_foreign_key_violation() {
            if let Some(id) = applicant_id {
                return StoreError::MissingApplicant(id);
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError> {
        let rows: Vec<ApplicantRow> = sqlx::query_as(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Applicant::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn insert_applicant(&self, new: NewApplicant) -> Result<Applicant, StoreError> {
        let row: ApplicantRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO applicants
                (id, first_name, last_name, email, phone_number, address, zip_code, state, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {APPLICANT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .bind(&new.address)
        .bind(&new.zip_code)
        .bind(&new.state)
        .bind(ApplicantStatus::default().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, None))?;

        info!("Inserted applicant {}", row.id);
        Ok(Applicant::try_from(row)?)
    }

    async fn fetch_applicant(&self, id: Uuid) -> Result<Option<Applicant>, StoreError> {
        let row: Option<ApplicantRow> = sqlx::query_as(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Applicant::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
    ) -> Result<Option<Applicant>, StoreError> {
        let row: Option<ApplicantRow> = sqlx::query_as(&format!(
            "UPDATE applicants SET status = $2 WHERE id = $1 RETURNING {APPLICANT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            info!("Applicant {id} status set to {status}");
        }
        row.map(Applicant::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn delete_applicant(&self, id: Uuid) -> Result<bool, StoreError> {
        // notes.applicant_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM applicants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted applicant {id} and its notes");
        }
        Ok(deleted)
    }

    async fn list_notes(&self, applicant_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, applicant_id, title, content, created_at
            FROM notes
            WHERE applicant_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn insert_note(&self, applicant_id: Uuid, new: NewNote) -> Result<Note, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, applicant_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, applicant_id, title, content, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(applicant_id)
        .bind(&new.title)
        .bind(&new.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, Some(applicant_id)))?;

        info!("Inserted note {} for applicant {applicant_id}", note.id);
        Ok(note)
    }
}
