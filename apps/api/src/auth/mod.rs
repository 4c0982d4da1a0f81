//! Caller identity and capability checks.
//!
//! Credentials are owned by the identity store; this service only reads them.
//! Every handler takes a [`Caller`] and asks [`permissions::authorize`]
//! before touching the request body or the store.

pub mod identity;
pub mod permissions;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Named permission grant checked per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewApplicant,
    CreateApplicant,
    UpdateApplicant,
    DeleteApplicant,
    ViewNote,
    CreateNote,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::ViewApplicant,
        Capability::CreateApplicant,
        Capability::UpdateApplicant,
        Capability::DeleteApplicant,
        Capability::ViewNote,
        Capability::CreateNote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewApplicant => "view_applicant",
            Capability::CreateApplicant => "create_applicant",
            Capability::UpdateApplicant => "update_applicant",
            Capability::DeleteApplicant => "delete_applicant",
            Capability::ViewNote => "view_note",
            Capability::CreateNote => "create_note",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown capability '{s}'"))
    }
}

/// An authenticated user together with the capabilities granted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub capabilities: HashSet<Capability>,
}

impl Identity {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// The resolved caller of a request. `None` means anonymous: no header, a
/// malformed header, or a token the identity store does not know.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

/// Extracts the key from `Authorization: Token <key>` or `Bearer <key>`.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    let known_scheme =
        scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    (known_scheme && !key.is_empty()).then_some(key)
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Ok(Caller(None));
        };

        let identity = state.identities.resolve(token).await?;
        if identity.is_none() {
            tracing::debug!("Rejected unknown API token");
        }
        Ok(Caller(identity))
    }
}
