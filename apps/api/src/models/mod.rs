pub mod applicant;
pub mod note;
