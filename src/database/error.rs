use crate::database::error::DatabaseError::UnderlyingDatabase;
use diesel::result::DatabaseErrorKind;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The --database-url argument is missing.")]
    MissingDatabaseUrl,
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("A member with the same email address already exists.")]
    DuplicateEmail,
    #[error("No member matches the given id.")]
    MemberNotFound,
    #[error("A stored value can't be read back.")]
    InvalidStoredValue(String),
    #[error("An error occurred within the database.")]
    UnderlyingDatabase(String),
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => DatabaseError::MemberNotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DatabaseError::DuplicateEmail
            }
            other => UnderlyingDatabase(other.to_string()),
        }
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        DatabaseError::InvalidStoredValue(value.to_string())
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}
