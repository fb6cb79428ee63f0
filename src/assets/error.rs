use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AssetError {
    #[error("The assets folder can't be created.")]
    CantCreateAssetsFolder,
    #[error("The asset can't be written.")]
    UploadFailed,
    #[error("The asset can't be deleted.")]
    DeleteFailed,
}
