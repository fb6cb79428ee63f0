use crate::assets::AssetStore;
use crate::assets::error::AssetError;
use crate::assets::error::AssetError::{CantCreateAssetsFolder, DeleteFailed, UploadFailed};
use crate::tools::env_args::retrieve_arg_value;
use crate::tools::log_error_and_return;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ASSETS_FOLDER_ARG: &str = "--assets-folder";
const DEFAULT_ASSETS_FOLDER: &str = "uploads";

/// References returned by the local store are paths under this mount, where
/// the stored files are served statically.
const PUBLIC_PREFIX: &str = "/uploads/";

/// Asset store writing photos to a local folder. Files get a fresh uuid
/// name; only the extension of the submitted file survives.
pub struct LocalAssetStore {
    folder: PathBuf,
}

impl LocalAssetStore {
    pub fn from_env_args() -> Result<Self, AssetError> {
        let folder =
            retrieve_arg_value(ASSETS_FOLDER_ARG).unwrap_or(DEFAULT_ASSETS_FOLDER.to_owned());

        Self::new(folder)
    }

    pub fn new(folder: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let folder = folder.into();
        fs::create_dir_all(&folder).map_err(log_error_and_return(CantCreateAssetsFolder))?;

        Ok(Self { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl AssetStore for LocalAssetStore {
    fn upload(&self, bytes: &[u8], original_name: &str) -> Result<String, AssetError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or("bin");
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        fs::write(self.folder.join(&file_name), bytes)
            .map_err(log_error_and_return(UploadFailed))?;

        Ok(format!("{PUBLIC_PREFIX}{file_name}"))
    }

    fn delete(&self, reference: &str) -> Result<(), AssetError> {
        let reference = reference.strip_prefix(PUBLIC_PREFIX).unwrap_or(reference);
        // References are single uuid-named files; anything that resolves
        // outside the folder is rejected.
        let file_name = Path::new(reference).file_name().ok_or(DeleteFailed)?;

        fs::remove_file(self.folder.join(file_name)).map_err(log_error_and_return(DeleteFailed))
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::AssetStore;
    use crate::assets::error::AssetError;
    use crate::assets::local::LocalAssetStore;
    use crate::tools::test::tests::temp_dir;

    #[test]
    fn should_upload_and_delete_roundtrip() {
        let store = LocalAssetStore::new(temp_dir().join("uploads")).unwrap();

        let reference = store.upload(b"picture bytes", "jon.png").unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".png"));
        let stored = store
            .folder()
            .join(reference.strip_prefix("/uploads/").unwrap());
        assert_eq!(b"picture bytes".to_vec(), std::fs::read(&stored).unwrap());

        store.delete(&reference).unwrap();
        assert!(!stored.exists());
    }

    #[test]
    fn should_default_to_bin_extension_when_name_has_none() {
        let store = LocalAssetStore::new(temp_dir().join("uploads")).unwrap();

        let reference = store.upload(b"bytes", "photo").unwrap();

        assert!(reference.ends_with(".bin"));
    }

    #[test]
    fn should_fail_to_delete_unknown_reference() {
        let store = LocalAssetStore::new(temp_dir().join("uploads")).unwrap();

        let result = store.delete("/uploads/unknown.png");

        assert_eq!(Err(AssetError::DeleteFailed), result);
    }
}
