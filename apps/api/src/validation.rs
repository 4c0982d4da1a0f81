//! Field-level checks shared by the request payloads.
//!
//! Payload structs deserialize every field as a [`Field`] so a missing key
//! or a `null` is reported per field instead of failing the whole body. Text
//! is trimmed before it is checked and stored.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Deserializer};

use crate::errors::{AppError, FieldErrors};

pub const REQUIRED: &str = "This field is required.";
pub const NULL: &str = "This field may not be null.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Body field: `None` when the key is absent, `Some(None)` when it is `null`.
/// Declare with `#[serde(default, deserialize_with = "present")]`.
pub type Field<T> = Option<Option<T>>;

/// Marks a key as present so `null` stays distinguishable from absent.
pub fn present<'de, D, T>(deserializer: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwraps a JSON body, turning syntax or shape errors into a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        AppError::Validation(FieldErrors::single(
            "non_field_errors",
            rejection.body_text(),
        ))
    })
}

/// Checks a required, non-blank text field of at most `max_len` characters.
/// Records failures in `errors` and returns the trimmed value when valid.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Field<String>,
    max_len: Option<usize>,
) -> Option<String> {
    let value = match value {
        None => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(None) => {
            errors.add(field, NULL);
            return None;
        }
        Some(Some(value)) => value,
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        return None;
    }

    if let Some(max_len) = max_len {
        if trimmed.chars().count() > max_len {
            errors.add(
                field,
                format!("Ensure this field has no more than {max_len} characters."),
            );
            return None;
        }
    }

    Some(trimmed.to_string())
}

/// Pragmatic address check: a local part, one `@`, and a dotted domain of
/// alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.contains('@') || local.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
