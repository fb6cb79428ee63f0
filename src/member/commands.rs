use crate::assets::AssetStore;
use crate::database::DbPool;
use crate::database::dao;
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::member::error::MemberError;
use crate::member::validate::validate;
use crate::member::{MemberInput, PhotoUpload};
use crate::tools::log_error_and_return;
use dto::member::Member;
use log::warn;

/// Create a member. The photo is uploaded first so that an upload failure
/// aborts the whole command before anything is persisted; if the insert
/// itself fails afterwards, the freshly stored asset is released again.
pub fn create_member(
    pool: &DbPool,
    assets: &dyn AssetStore,
    input: MemberInput,
    photo: Option<PhotoUpload>,
) -> Result<Member, MemberError> {
    let fields = validate(&input)?;
    let photo_ref = upload_photo(assets, photo)?;

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(MemberError::Database(ConnectionFailed)))?;
    match dao::member::insert(&mut connection, &fields, photo_ref.as_deref()) {
        Ok(member) => Ok(member),
        Err(error) => {
            if let Some(reference) = &photo_ref {
                release_photo(assets, reference);
            }
            Err(error.into())
        }
    }
}

/// Replace an existing member with the submitted fields. A new photo
/// replaces the stored asset: the old reference is released best-effort
/// before the new upload. Without a new photo the existing reference is
/// kept.
pub fn update_member(
    pool: &DbPool,
    assets: &dyn AssetStore,
    id: i32,
    input: MemberInput,
    photo: Option<PhotoUpload>,
) -> Result<Member, MemberError> {
    let fields = validate(&input)?;

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(MemberError::Database(ConnectionFailed)))?;
    let existing = dao::member::find_by_id(&mut connection, id)?.ok_or(MemberError::NotFound)?;

    let photo_ref = match photo {
        Some(upload) => {
            if let Some(previous) = existing.photo() {
                release_photo(assets, previous);
            }
            Some(upload_required(assets, &upload)?)
        }
        None => existing.photo().clone(),
    };

    Ok(dao::member::update(
        &mut connection,
        id,
        &fields,
        photo_ref.as_deref(),
    )?)
}

/// Delete a member row, then release its photo asset. Asset-store failures
/// never roll the row deletion back.
pub fn delete_member(pool: &DbPool, assets: &dyn AssetStore, id: i32) -> Result<(), MemberError> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(MemberError::Database(ConnectionFailed)))?;
    let photo_ref = dao::member::delete(&mut connection, id)?;

    if let Some(reference) = &photo_ref {
        release_photo(assets, reference);
    }

    Ok(())
}

fn upload_photo(
    assets: &dyn AssetStore,
    photo: Option<PhotoUpload>,
) -> Result<Option<String>, MemberError> {
    match photo {
        Some(upload) => Ok(Some(upload_required(assets, &upload)?)),
        None => Ok(None),
    }
}

fn upload_required(assets: &dyn AssetStore, upload: &PhotoUpload) -> Result<String, MemberError> {
    assets
        .upload(&upload.bytes, &upload.original_name)
        .map_err(log_error_and_return(MemberError::AssetUploadFailed))
}

fn release_photo(assets: &dyn AssetStore, reference: &str) {
    if let Err(error) = assets.delete(reference) {
        warn!("Couldn't release photo asset [reference: {reference}]\n{error:#?}");
    }
}
