use super::Result;
use crate::database::model::member::MemberRow;
use crate::member::ValidatedMember;
use crate::membership::rules::EXPIRING_SOON_WINDOW_DAYS;
use chrono::{Days, NaiveDate, Utc};
use diesel::prelude::*;
use dto::expired_member::ExpiredMember;
use dto::member::Member;
use dto::payment_status::PaymentStatus;

/// Insert a new member. The store assigns the id and both timestamps.
/// Fails with [DatabaseError::DuplicateEmail] when the email is taken.
pub fn insert(
    connection: &mut SqliteConnection,
    fields: &ValidatedMember,
    photo_ref: Option<&str>,
) -> Result<Member> {
    use crate::database::schema::member::dsl::*;

    let row = diesel::insert_into(member)
        .values((
            name.eq(fields.name()),
            email.eq(fields.email()),
            phone.eq(fields.phone()),
            membership_type.eq(fields.membership_type().as_str()),
            start_date.eq(fields.start_date().to_string()),
            end_date.eq(fields.end_date().to_string()),
            payment_status.eq(fields.payment_status().as_str()),
            photo.eq(photo_ref),
        ))
        .returning(MemberRow::as_returning())
        .get_result::<MemberRow>(connection)?;

    Ok(Member::try_from(row)?)
}

/// Replace every client-supplied field of an existing member. Not a merge:
/// callers resend the full record.
pub fn update(
    connection: &mut SqliteConnection,
    member_id: i32,
    fields: &ValidatedMember,
    photo_ref: Option<&str>,
) -> Result<Member> {
    use crate::database::schema::member::dsl::*;

    let row = diesel::update(member.find(member_id))
        .set((
            name.eq(fields.name()),
            email.eq(fields.email()),
            phone.eq(fields.phone()),
            membership_type.eq(fields.membership_type().as_str()),
            start_date.eq(fields.start_date().to_string()),
            end_date.eq(fields.end_date().to_string()),
            payment_status.eq(fields.payment_status().as_str()),
            photo.eq(photo_ref),
            updated_at.eq(current_timestamp()),
        ))
        .returning(MemberRow::as_returning())
        .get_result::<MemberRow>(connection)?;

    Ok(Member::try_from(row)?)
}

/// Delete a member and return its prior photo reference, if any, so the
/// caller can release the asset.
pub fn delete(connection: &mut SqliteConnection, member_id: i32) -> Result<Option<String>> {
    use crate::database::schema::member::dsl::*;

    let photo_ref = diesel::delete(member.find(member_id))
        .returning(photo)
        .get_result::<Option<String>>(connection)?;

    Ok(photo_ref)
}

pub fn find_by_id(connection: &mut SqliteConnection, member_id: i32) -> Result<Option<Member>> {
    use crate::database::schema::member::dsl::*;

    let row = member
        .find(member_id)
        .select(MemberRow::as_select())
        .first::<MemberRow>(connection)
        .optional()?;

    Ok(row.map(Member::try_from).transpose()?)
}

/// List members, most recently created first. The search term is a
/// contains match over name or email; LIKE is case-insensitive in SQLite.
pub fn list(
    connection: &mut SqliteConnection,
    search: Option<&str>,
    status: Option<PaymentStatus>,
) -> Result<Vec<Member>> {
    use crate::database::schema::member::dsl::*;

    let mut query = member.select(MemberRow::as_select()).into_boxed();

    if let Some(search) = search.map(str::trim).filter(|search| !search.is_empty()) {
        let pattern = format!("%{search}%");
        query = query.filter(name.like(pattern.clone()).or(email.like(pattern)));
    }
    if let Some(status) = status {
        query = query.filter(payment_status.eq(status.as_str()));
    }

    let rows = query
        .order((created_at.desc(), id.desc()))
        .load::<MemberRow>(connection)?;

    collect_members(rows)
}

/// Demote every paid record whose end date has passed. A single conditional
/// UPDATE: safe under concurrent sweeps and a no-op once a record has been
/// demoted. Returns the identities of the demoted members.
pub fn demote_expired_paid(
    connection: &mut SqliteConnection,
    today: NaiveDate,
) -> Result<Vec<ExpiredMember>> {
    use crate::database::schema::member::dsl::*;

    // ISO-8601 dates compare lexicographically, so the TEXT comparison is a
    // day-granular date comparison.
    let rows = diesel::update(
        member.filter(
            payment_status
                .eq(PaymentStatus::Paid.as_str())
                .and(end_date.lt(today.to_string())),
        ),
    )
    .set((
        payment_status.eq(PaymentStatus::Unpaid.as_str()),
        updated_at.eq(current_timestamp()),
    ))
    .returning((id, name, email))
    .get_results::<(i32, String, String)>(connection)?;

    Ok(rows
        .into_iter()
        .map(|(member_id, member_name, member_email)| {
            ExpiredMember::new(member_id, member_name, member_email)
        })
        .collect())
}

pub fn count_all(connection: &mut SqliteConnection) -> Result<i64> {
    use crate::database::schema::member::dsl::*;

    Ok(member.count().get_result(connection)?)
}

pub fn count_by_status(
    connection: &mut SqliteConnection,
    status: PaymentStatus,
) -> Result<i64> {
    use crate::database::schema::member::dsl::*;

    Ok(member
        .filter(payment_status.eq(status.as_str()))
        .count()
        .get_result(connection)?)
}

pub fn count_expiring(connection: &mut SqliteConnection, today: NaiveDate) -> Result<i64> {
    use crate::database::schema::member::dsl::*;

    let (lower, upper) = expiring_window(today);
    Ok(member
        .filter(end_date.ge(lower).and(end_date.le(upper)))
        .count()
        .get_result(connection)?)
}

/// Members due within the expiring-soon window, soonest first.
pub fn list_expiring(connection: &mut SqliteConnection, today: NaiveDate) -> Result<Vec<Member>> {
    use crate::database::schema::member::dsl::*;

    let (lower, upper) = expiring_window(today);
    let rows = member
        .filter(end_date.ge(lower).and(end_date.le(upper)))
        .order(end_date.asc())
        .select(MemberRow::as_select())
        .load::<MemberRow>(connection)?;

    collect_members(rows)
}

/// Inclusive [today, today + window] bounds as ISO strings.
fn expiring_window(today: NaiveDate) -> (String, String) {
    let upper = today + Days::new(EXPIRING_SOON_WINDOW_DAYS);

    (today.to_string(), upper.to_string())
}

/// Timestamps share the format of SQLite's CURRENT_TIMESTAMP default.
fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn collect_members(rows: Vec<MemberRow>) -> Result<Vec<Member>> {
    let mut members = Vec::new();
    for row in rows {
        members.push(Member::try_from(row)?);
    }

    Ok(members)
}
