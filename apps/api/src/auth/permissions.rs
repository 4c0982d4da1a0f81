use axum::http::Method;

use super::{Caller, Capability, Identity};
use crate::errors::AppError;

/// Resource kinds guarded by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Applicant,
    /// Notes, always addressed through their owning applicant.
    Note,
}

/// Capability required for `method` on `resource`, or `None` when the verb is
/// never allowed.
pub fn required_capability(resource: Resource, method: &Method) -> Option<Capability> {
    match (resource, method.as_str()) {
        (Resource::Applicant, "GET") => Some(Capability::ViewApplicant),
        (Resource::Applicant, "POST") => Some(Capability::CreateApplicant),
        (Resource::Applicant, "PUT") => Some(Capability::UpdateApplicant),
        (Resource::Applicant, "DELETE") => Some(Capability::DeleteApplicant),
        (Resource::Note, "GET") => Some(Capability::ViewNote),
        (Resource::Note, "POST") => Some(Capability::CreateNote),
        _ => None,
    }
}

pub fn has_permission(identity: Option<&Identity>, resource: Resource, method: &Method) -> bool {
    match (identity, required_capability(resource, method)) {
        (Some(identity), Some(capability)) => identity.has(capability),
        _ => false,
    }
}

/// Allows the request or fails with the matching 403 error.
pub fn authorize<'a>(
    caller: &'a Caller,
    resource: Resource,
    method: &Method,
) -> Result<&'a Identity, AppError> {
    let identity = caller.identity().ok_or(AppError::Unauthenticated)?;
    if !has_permission(Some(identity), resource, method) {
        tracing::info!(
            "Denied {method} on {resource:?} for user {} ({})",
            identity.username,
            identity.user_id
        );
        return Err(AppError::Forbidden);
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn identity_with(capabilities: &[Capability]) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "test_user".to_string(),
            capabilities: capabilities.iter().copied().collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn test_applicant_verbs_map_to_capabilities() {
        let cases = [
            (Method::GET, Capability::ViewApplicant),
            (Method::POST, Capability::CreateApplicant),
            (Method::PUT, Capability::UpdateApplicant),
            (Method::DELETE, Capability::DeleteApplicant),
        ];
        for (method, capability) in cases {
            assert_eq!(
                required_capability(Resource::Applicant, &method),
                Some(capability)
            );
        }
        assert_eq!(required_capability(Resource::Applicant, &Method::PATCH), None);
        assert_eq!(required_capability(Resource::Applicant, &Method::HEAD), None);
    }

    #[test]
    fn test_note_only_allows_get_and_post() {
        assert_eq!(
            required_capability(Resource::Note, &Method::GET),
            Some(Capability::ViewNote)
        );
        assert_eq!(
            required_capability(Resource::Note, &Method::POST),
            Some(Capability::CreateNote)
        );
        assert_eq!(required_capability(Resource::Note, &Method::PUT), None);
        assert_eq!(required_capability(Resource::Note, &Method::DELETE), None);
    }

    #[test]
    fn test_unrelated_capabilities_do_not_grant_access() {
        let identity = identity_with(&[
            Capability::CreateApplicant,
            Capability::UpdateApplicant,
            Capability::DeleteApplicant,
            Capability::ViewNote,
        ]);
        assert!(!has_permission(
            Some(&identity),
            Resource::Applicant,
            &Method::GET
        ));
        assert!(has_permission(Some(&identity), Resource::Note, &Method::GET));
    }

    #[test]
    fn test_anonymous_caller_is_unauthenticated() {
        let caller = Caller(None);
        assert!(matches!(
            authorize(&caller, Resource::Applicant, &Method::GET),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_authorize_checks_specific_capability() {
        let caller = Caller(Some(identity_with(&[Capability::ViewApplicant])));
        assert!(authorize(&caller, Resource::Applicant, &Method::GET).is_ok());
        assert!(matches!(
            authorize(&caller, Resource::Applicant, &Method::DELETE),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            authorize(&caller, Resource::Applicant, &Method::PATCH),
            Err(AppError::Forbidden)
        ));
    }
}
