use serde::Deserialize;

use crate::errors::FieldErrors;
use crate::models::note::NewNote;
use crate::validation::{present, required_text, Field};

/// Body of `POST /applicant/{id}/note/`. The owner always comes from the path.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotePayload {
    #[serde(deserialize_with = "present")]
    pub title: Field<String>,
    #[serde(deserialize_with = "present")]
    pub content: Field<String>,
}

impl NotePayload {
    /// Records failures in `errors`, which may already hold owner errors.
    pub fn validate_into(self, errors: &mut FieldErrors) -> Option<NewNote> {
        let title = required_text(errors, "title", self.title, Some(64));
        let content = required_text(errors, "content", self.content, None);
        Some(NewNote {
            title: title?,
            content: content?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_is_bounded() {
        let payload: NotePayload = serde_json::from_value(json!({
            "title": "x".repeat(65),
            "content": "Owes Jet money."
        }))
        .unwrap();

        let mut fields = FieldErrors::new();
        assert!(payload.validate_into(&mut fields).is_none());
        assert!(fields.get("title").is_some());
        assert!(fields.get("content").is_none());
    }

    #[test]
    fn test_applicant_key_in_body_is_ignored() {
        let payload: NotePayload = serde_json::from_value(json!({
            "applicant": "00000000-0000-0000-0000-000000000000",
            "title": "Interview",
            "content": "Arrived late, left early."
        }))
        .unwrap();

        let mut fields = FieldErrors::new();
        let note = payload.validate_into(&mut fields).unwrap();
        assert_eq!(note.title, "Interview");
        assert!(fields.is_empty());
    }
}
