use crate::assets::error::AssetError;
use crate::database::error::DatabaseError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
    #[error("An error has occurred with the asset store.")]
    Assets(#[from] AssetError),
}
