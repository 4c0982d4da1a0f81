use std::sync::Arc;

use crate::auth::identity::IdentityProvider;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Applicant and note persistence. Postgres in production.
    pub store: Arc<dyn Store>,
    /// Token lookup for the `Caller` extractor.
    pub identities: Arc<dyn IdentityProvider>,
}
