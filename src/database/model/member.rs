use crate::database::error::DatabaseError;
use chrono::NaiveDate;
use diesel::prelude::*;
use dto::member::Member;
use dto::membership_type::MembershipType;
use dto::payment_status::PaymentStatus;
use std::str::FromStr;

/// A member row as stored. Dates and enums are TEXT in SQLite and are
/// parsed back into their typed form when leaving the database layer.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::member)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MemberRow {
    id: i32,
    name: String,
    email: String,
    phone: String,
    membership_type: String,
    start_date: String,
    end_date: String,
    payment_status: String,
    photo: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = DatabaseError;

    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        let membership_type = MembershipType::from_str(&value.membership_type)
            .map_err(DatabaseError::InvalidStoredValue)?;
        let payment_status = PaymentStatus::from_str(&value.payment_status)
            .map_err(DatabaseError::InvalidStoredValue)?;
        let start_date = NaiveDate::from_str(&value.start_date)?;
        let end_date = NaiveDate::from_str(&value.end_date)?;

        Ok(Member::new(
            value.id,
            value.name,
            value.email,
            value.phone,
            membership_type,
            start_date,
            end_date,
            payment_status,
            value.photo,
            value.created_at,
            value.updated_at,
        ))
    }
}
