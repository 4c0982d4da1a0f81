use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Hiring decision for an applicant. New records start out `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicantStatus {
    pub const ALL: [ApplicantStatus; 3] = [
        ApplicantStatus::Pending,
        ApplicantStatus::Approved,
        ApplicantStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "PENDING",
            ApplicantStatus::Approved => "APPROVED",
            ApplicantStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicantStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("\"{s}\" is not a valid choice."))
    }
}

/// An applicant as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applicant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub zip_code: String,
    pub state: String,
    pub status: ApplicantStatus,
    pub created_at: DateTime<Utc>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Row shape of the `applicants` table. `status` is stored as text and
/// constrained by a CHECK in the migration.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub zip_code: String,
    pub state: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApplicantRow> for Applicant {
    type Error = anyhow::Error;

    fn try_from(row: ApplicantRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ApplicantStatus>()
            .map_err(|e| anyhow::anyhow!("applicant {} has corrupt status: {e}", row.id))?;

        Ok(Applicant {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            address: row.address,
            zip_code: row.zip_code,
            state: row.state,
            status,
            created_at: row.created_at,
        })
    }
}

/// Validated input for inserting an applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub zip_code: String,
    pub state: String,
}
