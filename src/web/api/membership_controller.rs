use crate::member::error::MemberError;
use crate::membership::rules;
use crate::web::api::{ApiError, error_response};
use chrono::{NaiveDate, Utc};
use dto::membership_type::MembershipType;
use rocket::serde::json::{Json, Value, json};
use std::str::FromStr;

#[derive(FromForm)]
pub struct PreviewQuery {
    #[field(name = "startDate")]
    start_date: String,
    #[field(name = "membershipType")]
    membership_type: String,
}

/// Derivation preview: the end date, payment status and days remaining a
/// submission with these values is expected to carry. Clients call this
/// instead of re-implementing the derivation, so previews can never drift
/// from what persistence considers valid.
#[get("/membership/preview?<query..>")]
pub async fn preview(query: PreviewQuery) -> Result<Json<Value>, ApiError> {
    let start_date = NaiveDate::from_str(query.start_date.trim())
        .map_err(|_| error_response(MemberError::InvalidDate("start")))?;
    let membership_type = MembershipType::from_str(query.membership_type.trim())
        .map_err(|_| error_response(MemberError::InvalidMembershipType))?;

    let today = Utc::now().date_naive();
    let end_date = rules::end_date_for(start_date, membership_type);

    Ok(Json(json!({
        "endDate": end_date,
        "paymentStatus": rules::payment_status_on(Some(end_date), today),
        "daysRemaining": rules::days_remaining(Some(end_date), today),
    })))
}

#[cfg(test)]
mod tests {
    mod preview {
        use crate::database::DbPool;
        use crate::database::with_temp_database;
        use crate::web::api::tests::test_rocket;
        use rocket::http::Status;
        use rocket::local::asynchronous::Client;
        use rocket::serde::json::Value;
        use rocket::tokio::runtime::Runtime;

        #[test]
        fn success() {
            async fn test(pool: DbPool) {
                let client = Client::tracked(test_rocket(pool)).await.unwrap();

                let response = client
                    .get("/api/membership/preview?startDate=2024-01-15&membershipType=monthly")
                    .dispatch()
                    .await;

                assert_eq!(Status::Ok, response.status());
                let body = response.into_json::<Value>().await.unwrap();
                assert_eq!("2024-02-15", body["endDate"]);
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn success_clamps_month_overflow() {
            async fn test(pool: DbPool) {
                let client = Client::tracked(test_rocket(pool)).await.unwrap();

                let response = client
                    .get("/api/membership/preview?startDate=2024-01-31&membershipType=monthly")
                    .dispatch()
                    .await;

                let body = response.into_json::<Value>().await.unwrap();
                assert_eq!("2024-02-29", body["endDate"]);
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn fail_when_membership_type_is_unknown() {
            async fn test(pool: DbPool) {
                let client = Client::tracked(test_rocket(pool)).await.unwrap();

                let response = client
                    .get("/api/membership/preview?startDate=2024-01-15&membershipType=weekly")
                    .dispatch()
                    .await;

                assert_eq!(Status::BadRequest, response.status());
                let error = response.into_json::<Value>().await.unwrap();
                assert_eq!("Invalid membership type", error["error"]);
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn fail_when_start_date_is_malformed() {
            async fn test(pool: DbPool) {
                let client = Client::tracked(test_rocket(pool)).await.unwrap();

                let response = client
                    .get("/api/membership/preview?startDate=15%2F01%2F2024&membershipType=monthly")
                    .dispatch()
                    .await;

                assert_eq!(Status::BadRequest, response.status());
            }
            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
