use crate::member::error::MemberError;
use log::error;
use rocket::Route;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::Serialize;

pub(crate) mod dashboard_controller;
pub(crate) mod members_controller;
pub(crate) mod membership_controller;

/// Client-facing error body. Specific for client faults, generic for server
/// faults; internal detail never leaves the process.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    error: String,
}

pub(crate) type ApiError = Custom<Json<ErrorBody>>;

pub(crate) fn api_routes() -> Vec<Route> {
    routes![
        members_controller::list_members,
        members_controller::get_member,
        members_controller::create_member,
        members_controller::update_member,
        members_controller::delete_member,
        members_controller::reminder_link,
        membership_controller::preview,
        dashboard_controller::stats,
        dashboard_controller::expiring_members,
        dashboard_controller::auto_expire,
    ]
}

/// Map a member error onto its HTTP status. Classification is by variant,
/// never by the message text.
pub(crate) fn error_response(error: MemberError) -> ApiError {
    match &error {
        MemberError::NotFound => respond(Status::NotFound, &error.to_string()),
        MemberError::Database(_) => {
            error!("{error:#?}");
            respond(Status::InternalServerError, "Internal server error")
        }
        _ => respond(Status::BadRequest, &error.to_string()),
    }
}

pub(crate) fn bad_request(message: &str) -> ApiError {
    respond(Status::BadRequest, message)
}

fn respond(status: Status, message: &str) -> ApiError {
    Custom(
        status,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
}
