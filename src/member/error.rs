use crate::database::error::DatabaseError;
use thiserror::Error;

/// Errors raised by member commands and queries. HTTP classification is by
/// variant, never by matching on the message text.
#[derive(Debug, Error, PartialEq)]
pub enum MemberError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid membership type")]
    InvalidMembershipType,
    #[error("Invalid payment status")]
    InvalidPaymentStatus,
    #[error("Invalid {0} date")]
    InvalidDate(&'static str),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Member not found")]
    NotFound,
    #[error("Failed to upload image")]
    AssetUploadFailed,
    #[error("An error has occurred with the database.")]
    Database(DatabaseError),
}

impl From<DatabaseError> for MemberError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::DuplicateEmail => MemberError::DuplicateEmail,
            DatabaseError::MemberNotFound => MemberError::NotFound,
            other => MemberError::Database(other),
        }
    }
}
