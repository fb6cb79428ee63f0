use crate::database::DbPool;
use crate::member::queries;
use crate::membership::sweep::sweep_once;
use crate::web::api::{ApiError, error_response};
use chrono::Utc;
use dto::member::Member;
use dto::member_stats::MemberStats;
use rocket::State;
use rocket::serde::json::{Json, Value, json};

#[get("/dashboard/stats")]
pub async fn stats(pool: &State<DbPool>) -> Result<Json<MemberStats>, ApiError> {
    let stats =
        queries::aggregate_stats(pool.inner(), Utc::now().date_naive()).map_err(error_response)?;

    Ok(Json(stats))
}

#[get("/dashboard/expiring")]
pub async fn expiring_members(pool: &State<DbPool>) -> Result<Json<Vec<Member>>, ApiError> {
    let members = queries::expiring_members(pool.inner(), Utc::now().date_naive())
        .map_err(error_response)?;

    Ok(Json(members))
}

/// Manual trigger of the expiry sweep. Like every sweep it is best-effort
/// and reports the demoted identities.
#[post("/auto-expire")]
pub async fn auto_expire(pool: &State<DbPool>) -> Json<Value> {
    let expired_members = sweep_once(pool.inner(), Utc::now().date_naive());

    Json(json!({
        "success": true,
        "message": format!("Auto-expired {} members", expired_members.len()),
        "expiredMembers": expired_members,
    }))
}
