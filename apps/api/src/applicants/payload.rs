use serde::Deserialize;

use crate::errors::{AppError, FieldErrors};
use crate::models::applicant::{ApplicantStatus, NewApplicant};
use crate::validation::{
    is_valid_email, present, required_text, Field, INVALID_EMAIL, NULL, REQUIRED,
};

/// Body of `POST /applicant/`. Unknown keys such as `id` or `status` are
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantPayload {
    #[serde(deserialize_with = "present")]
    pub first_name: Field<String>,
    #[serde(deserialize_with = "present")]
    pub last_name: Field<String>,
    #[serde(deserialize_with = "present")]
    pub email: Field<String>,
    #[serde(deserialize_with = "present")]
    pub phone_number: Field<String>,
    #[serde(deserialize_with = "present")]
    pub address: Field<String>,
    #[serde(deserialize_with = "present")]
    pub zip_code: Field<String>,
    #[serde(deserialize_with = "present")]
    pub state: Field<String>,
}

impl ApplicantPayload {
    pub fn validate(self) -> Result<NewApplicant, AppError> {
        let mut errors = FieldErrors::new();

        let first_name = required_text(&mut errors, "first_name", self.first_name, Some(256));
        let last_name = required_text(&mut errors, "last_name", self.last_name, Some(256));
        let email = required_text(&mut errors, "email", self.email, Some(256))
            .filter(|email| {
                let valid = is_valid_email(email);
                if !valid {
                    errors.add("email", INVALID_EMAIL);
                }
                valid
            });
        let phone_number = required_text(&mut errors, "phone_number", self.phone_number, Some(20));
        let address = required_text(&mut errors, "address", self.address, Some(256));
        let zip_code = required_text(&mut errors, "zip_code", self.zip_code, Some(20));
        let state = required_text(&mut errors, "state", self.state, Some(50));

        match (
            first_name,
            last_name,
            email,
            phone_number,
            address,
            zip_code,
            state,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone_number),
                Some(address),
                Some(zip_code),
                Some(state),
            ) if errors.is_empty() => Ok(NewApplicant {
                first_name,
                last_name,
                email,
                phone_number,
                address,
                zip_code,
                state,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Body of `PUT /applicant/{id}/`. Only `status` is mutable.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    #[serde(deserialize_with = "present")]
    pub status: Field<String>,
}

impl StatusPayload {
    pub fn validate(self) -> Result<ApplicantStatus, AppError> {
        let status = match self.status {
            None => return Err(AppError::Validation(FieldErrors::single("status", REQUIRED))),
            Some(None) => return Err(AppError::Validation(FieldErrors::single("status", NULL))),
            Some(Some(status)) => status,
        };
        status
            .parse::<ApplicantStatus>()
            .map_err(|message| AppError::Validation(FieldErrors::single("status", message)))
    }
}
