use chrono::{Months, NaiveDate};
use dto::membership_type::MembershipType;
use dto::payment_status::PaymentStatus;

/// Members whose end date falls within this many days show up as "expiring
/// soon" on the dashboard. Distinct from the renewal-reminder window used
/// for quick messages, which is a different business rule.
pub const EXPIRING_SOON_WINDOW_DAYS: u64 = 7;

/// End date derived from the start date and the plan period. Month
/// arithmetic clamps to the length of the target month (2024-01-31 plus one
/// month is 2024-02-29) and saturates at the calendar upper bound.
pub fn end_date_for(start_date: NaiveDate, membership_type: MembershipType) -> NaiveDate {
    let months = match membership_type {
        MembershipType::Monthly => 1,
        MembershipType::Quarterly => 3,
        MembershipType::Yearly => 12,
    };

    start_date
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// A membership is paid up while its end date hasn't passed, compared at
/// day granularity. A missing end date counts as unpaid.
pub fn payment_status_on(end_date: Option<NaiveDate>, today: NaiveDate) -> PaymentStatus {
    match end_date {
        Some(end_date) if end_date >= today => PaymentStatus::Paid,
        _ => PaymentStatus::Unpaid,
    }
}

/// Whole days left before expiry, never negative.
pub fn days_remaining(end_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    end_date
        .map(|end_date| (end_date - today).num_days().max(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[parameterized(
        start = {
            (2024, 1, 15), (2024, 1, 15), (2024, 1, 15),
            (2024, 1, 31), (2023, 1, 31), (2023, 11, 30), (2024, 2, 29),
        },
        membership_type = {
            MembershipType::Monthly, MembershipType::Quarterly, MembershipType::Yearly,
            MembershipType::Monthly, MembershipType::Monthly, MembershipType::Quarterly, MembershipType::Yearly,
        },
        expected_end = {
            (2024, 2, 15), (2024, 4, 15), (2025, 1, 15),
            (2024, 2, 29), (2023, 2, 28), (2024, 2, 29), (2025, 2, 28),
        }
    )]
    fn should_derive_end_date(
        start: (i32, u32, u32),
        membership_type: MembershipType,
        expected_end: (i32, u32, u32),
    ) {
        let (y, m, d) = start;
        let (ey, em, ed) = expected_end;

        let result = end_date_for(date(y, m, d), membership_type);

        assert_eq!(date(ey, em, ed), result);
    }

    #[parameterized(
        end_date = {
            Some((2024, 2, 16)), Some((2024, 2, 15)), Some((2024, 2, 14)), None,
        },
        expected_status = {
            PaymentStatus::Paid, PaymentStatus::Paid, PaymentStatus::Unpaid, PaymentStatus::Unpaid,
        }
    )]
    fn should_derive_payment_status(
        end_date: Option<(i32, u32, u32)>,
        expected_status: PaymentStatus,
    ) {
        let today = date(2024, 2, 15);
        let end_date = end_date.map(|(y, m, d)| date(y, m, d));

        assert_eq!(expected_status, payment_status_on(end_date, today));
    }

    #[parameterized(
        end_date = {
            Some((2024, 2, 20)), Some((2024, 2, 16)), Some((2024, 2, 15)), Some((2024, 2, 1)), None,
        },
        expected_days = {4, 1, 0, 0, 0}
    )]
    fn should_compute_days_remaining_floored_at_zero(
        end_date: Option<(i32, u32, u32)>,
        expected_days: i64,
    ) {
        let today = date(2024, 2, 16);
        let end_date = end_date.map(|(y, m, d)| date(y, m, d));

        assert_eq!(expected_days, days_remaining(end_date, today));
    }
}
