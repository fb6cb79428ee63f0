use crate::database::dao;
use crate::database::{DbConnection, DbPool};
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::member::error::MemberError;
use crate::membership::sweep::sweep_once;
use crate::tools::log_error_and_return;
use chrono::NaiveDate;
use dto::member::Member;
use dto::member_stats::MemberStats;
use dto::payment_status::PaymentStatus;

// Every read reconciles first: the sweep runs before the query so no client
// ever observes a paid record whose end date has already passed.

pub fn list_members(
    pool: &DbPool,
    search: Option<&str>,
    status: Option<PaymentStatus>,
    today: NaiveDate,
) -> Result<Vec<Member>, MemberError> {
    sweep_once(pool, today);

    let mut connection = connection(pool)?;
    Ok(dao::member::list(&mut connection, search, status)?)
}

pub fn get_member(pool: &DbPool, id: i32, today: NaiveDate) -> Result<Member, MemberError> {
    sweep_once(pool, today);

    let mut connection = connection(pool)?;
    dao::member::find_by_id(&mut connection, id)?.ok_or(MemberError::NotFound)
}

/// Four independent counts; expiring members still count as active, the
/// categories are not a partition.
pub fn aggregate_stats(pool: &DbPool, today: NaiveDate) -> Result<MemberStats, MemberError> {
    sweep_once(pool, today);

    let mut connection = connection(pool)?;
    let total_members = dao::member::count_all(&mut connection)?;
    let active_members = dao::member::count_by_status(&mut connection, PaymentStatus::Paid)?;
    let unpaid_members = dao::member::count_by_status(&mut connection, PaymentStatus::Unpaid)?;
    let expiring_members = dao::member::count_expiring(&mut connection, today)?;

    Ok(MemberStats::new(
        total_members,
        active_members,
        unpaid_members,
        expiring_members,
    ))
}

pub fn expiring_members(pool: &DbPool, today: NaiveDate) -> Result<Vec<Member>, MemberError> {
    sweep_once(pool, today);

    let mut connection = connection(pool)?;
    Ok(dao::member::list_expiring(&mut connection, today)?)
}

fn connection(pool: &DbPool) -> Result<DbConnection, MemberError> {
    pool.get()
        .map_err(log_error_and_return(MemberError::Database(ConnectionFailed)))
}

#[cfg(test)]
mod tests {
    use crate::database::dao::member::tests::{fields, jon_doe, jonette_snow, today};
    use crate::database::dao::member::insert;
    use crate::database::with_temp_database;
    use crate::member::error::MemberError;
    use crate::member::queries::{aggregate_stats, expiring_members, get_member, list_members};
    use chrono::Days;
    use dto::member_stats::MemberStats;
    use dto::payment_status::PaymentStatus;

    #[test]
    fn list_members_reconciles_before_reading() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            // Stored as paid although its end date has passed.
            insert(&mut connection, &jon_doe(), None).unwrap();
            drop(connection);

            let unpaid =
                list_members(&pool, None, Some(PaymentStatus::Unpaid), today()).unwrap();

            assert_eq!(1, unpaid.len());
            assert!(unpaid.iter().all(|member| *member.end_date() < today()));
            let paid = list_members(&pool, None, Some(PaymentStatus::Paid), today()).unwrap();
            assert!(paid.is_empty());
        })
    }

    #[test]
    fn get_member_reconciles_before_reading() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            let stale = insert(&mut connection, &jon_doe(), None).unwrap();
            drop(connection);

            let member = get_member(&pool, *stale.id(), today()).unwrap();

            assert_eq!(&PaymentStatus::Unpaid, member.payment_status());
        })
    }

    #[test]
    fn get_member_fails_when_unknown() {
        with_temp_database(|pool| {
            let result = get_member(&pool, 42, today());

            assert_eq!(Err(MemberError::NotFound), result);
        })
    }

    #[test]
    fn aggregate_stats_counts_overlap() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            // Demoted by the sweep before counting.
            insert(&mut connection, &jon_doe(), None).unwrap();
            // Paid, far in the future.
            insert(&mut connection, &jonette_snow(), None).unwrap();
            // Paid and expiring within the window: counted active AND expiring.
            let expiring = fields(
                "Jim Soon",
                "jim.soon@email.com",
                today() + Days::new(5),
                PaymentStatus::Paid,
            );
            insert(&mut connection, &expiring, None).unwrap();
            drop(connection);

            let stats = aggregate_stats(&pool, today()).unwrap();

            assert_eq!(MemberStats::new(3, 2, 1, 1), stats);
        })
    }

    #[test]
    fn expiring_members_returns_members_due_within_the_window() {
        with_temp_database(|pool| {
            let mut connection = pool.get().unwrap();
            let expiring = fields(
                "Jim Soon",
                "jim.soon@email.com",
                today() + Days::new(5),
                PaymentStatus::Paid,
            );
            insert(&mut connection, &expiring, None).unwrap();
            insert(&mut connection, &jonette_snow(), None).unwrap();
            drop(connection);

            let members = expiring_members(&pool, today()).unwrap();

            assert_eq!(1, members.len());
            assert_eq!("jim.soon@email.com", members[0].email());
        })
    }
}
