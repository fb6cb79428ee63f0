use crate::assets::AssetStore;
use crate::database::DbPool;
use crate::member::error::MemberError;
use crate::member::{MemberInput, PhotoUpload, commands, queries};
use crate::notification::whatsapp;
use crate::notification::whatsapp::ReminderKind;
use crate::tools::log_message_and_return;
use crate::web::api::{ApiError, bad_request, error_response};
use chrono::Utc;
use dto::member::Member;
use dto::payment_status::PaymentStatus;
use rocket::State;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::status::Created;
use rocket::serde::json::{Json, Value, json};
use std::str::FromStr;
use uuid::Uuid;

/// A member submission, as multipart form data. All fields are resent on
/// update; the photo is optional on both create and update. Text fields are
/// optional at the form level so that omissions surface as validation
/// errors rather than unprocessable forms.
#[derive(FromForm)]
pub struct MemberForm<'f> {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    #[field(name = "membershipType")]
    membership_type: Option<String>,
    #[field(name = "startDate")]
    start_date: Option<String>,
    #[field(name = "endDate")]
    end_date: Option<String>,
    #[field(name = "paymentStatus")]
    payment_status: Option<String>,
    photo: Option<TempFile<'f>>,
}

impl MemberForm<'_> {
    fn input(&self) -> MemberInput {
        MemberInput {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            membership_type: self.membership_type.clone().unwrap_or_default(),
            start_date: self.start_date.clone().unwrap_or_default(),
            end_date: self.end_date.clone().unwrap_or_default(),
            payment_status: self.payment_status.clone().unwrap_or_default(),
        }
    }
}

#[get("/members?<search>&<status>")]
pub async fn list_members(
    pool: &State<DbPool>,
    search: Option<String>,
    status: Option<String>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let status = parse_status_filter(status.as_deref())?;
    let members = queries::list_members(
        pool.inner(),
        search.as_deref(),
        status,
        Utc::now().date_naive(),
    )
    .map_err(error_response)?;

    Ok(Json(members))
}

#[get("/members/<id>")]
pub async fn get_member(pool: &State<DbPool>, id: i32) -> Result<Json<Member>, ApiError> {
    let member =
        queries::get_member(pool.inner(), id, Utc::now().date_naive()).map_err(error_response)?;

    Ok(Json(member))
}

#[post("/members", data = "<form>")]
pub async fn create_member(
    pool: &State<DbPool>,
    assets: &State<Box<dyn AssetStore>>,
    mut form: Form<MemberForm<'_>>,
) -> Result<Created<Json<Member>>, ApiError> {
    let input = form.input();
    let photo = read_photo(form.photo.as_mut())
        .await
        .map_err(log_message_and_return(
            "Couldn't read the submitted photo",
            error_response(MemberError::AssetUploadFailed),
        ))?;

    let member = commands::create_member(pool.inner(), assets.inner().as_ref(), input, photo)
        .map_err(error_response)?;
    let location = format!("/api/members/{}", member.id());

    Ok(Created::new(location).body(Json(member)))
}

#[put("/members/<id>", data = "<form>")]
pub async fn update_member(
    pool: &State<DbPool>,
    assets: &State<Box<dyn AssetStore>>,
    id: i32,
    mut form: Form<MemberForm<'_>>,
) -> Result<Json<Member>, ApiError> {
    let input = form.input();
    let photo = read_photo(form.photo.as_mut())
        .await
        .map_err(log_message_and_return(
            "Couldn't read the submitted photo",
            error_response(MemberError::AssetUploadFailed),
        ))?;

    let member = commands::update_member(pool.inner(), assets.inner().as_ref(), id, input, photo)
        .map_err(error_response)?;

    Ok(Json(member))
}

#[delete("/members/<id>")]
pub async fn delete_member(
    pool: &State<DbPool>,
    assets: &State<Box<dyn AssetStore>>,
    id: i32,
) -> Result<Json<Value>, ApiError> {
    commands::delete_member(pool.inner(), assets.inner().as_ref(), id).map_err(error_response)?;

    Ok(Json(json!({"message": "Member deleted successfully"})))
}

/// Compose a messaging deep link reminding the member to renew or to pay.
/// Without an explicit kind, unpaid members get the payment reminder and
/// paid ones the renewal reminder.
#[get("/members/<id>/reminder-link?<kind>")]
pub async fn reminder_link(
    pool: &State<DbPool>,
    id: i32,
    kind: Option<String>,
) -> Result<Json<Value>, ApiError> {
    let today = Utc::now().date_naive();
    let member = queries::get_member(pool.inner(), id, today).map_err(error_response)?;

    let kind = match kind.as_deref() {
        None => default_reminder_kind(&member),
        Some(value) => {
            ReminderKind::from_str(value).map_err(|_| bad_request("Invalid reminder kind"))?
        }
    };
    if kind == ReminderKind::Expiring && !whatsapp::renewal_reminder_due(*member.end_date(), today)
    {
        return Err(bad_request("Member is not due for renewal"));
    }

    Ok(Json(
        json!({"link": whatsapp::reminder_link(&member, kind, today)}),
    ))
}

fn default_reminder_kind(member: &Member) -> ReminderKind {
    match member.payment_status() {
        PaymentStatus::Unpaid => ReminderKind::Unpaid,
        PaymentStatus::Paid => ReminderKind::Expiring,
    }
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<PaymentStatus>, ApiError> {
    match status {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => PaymentStatus::from_str(value)
            .map(Some)
            .map_err(|_| error_response(MemberError::InvalidPaymentStatus)),
    }
}

/// Pull the submitted photo bytes out of the temp file, if one was sent.
/// Empty file fields count as "no photo".
async fn read_photo(file: Option<&mut TempFile<'_>>) -> std::io::Result<Option<PhotoUpload>> {
    let Some(file) = file else {
        return Ok(None);
    };
    if file.len() == 0 {
        return Ok(None);
    }

    let staging = std::env::temp_dir().join(Uuid::new_v4().to_string());
    file.copy_to(&staging).await?;
    let bytes = rocket::tokio::fs::read(&staging).await?;
    let _ = rocket::tokio::fs::remove_file(&staging).await;

    Ok(Some(PhotoUpload {
        bytes,
        original_name: photo_file_name(file),
    }))
}

/// Rebuild a safe file name from the sanitized stem and the content type.
fn photo_file_name(file: &TempFile<'_>) -> String {
    let stem = file.name().unwrap_or("photo");
    match file.content_type().and_then(|content_type| content_type.extension()) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem.to_owned(),
    }
}
