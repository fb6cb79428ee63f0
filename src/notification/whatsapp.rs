use crate::membership::rules::days_remaining;
use chrono::NaiveDate;
use dto::member::Member;
use std::str::FromStr;

/// Members within this many days of expiry can be sent a renewal reminder.
/// Deliberately wider than the dashboard's expiring-soon window: reminding
/// starts a month out, the dashboard only flags the final week.
pub const RENEWAL_REMINDER_WINDOW_DAYS: i64 = 30;

/// Numbers submitted without a country code default to this one.
const DEFAULT_COUNTRY_CODE: &str = "91";
const LOCAL_NUMBER_LENGTH: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReminderKind {
    Expiring,
    Unpaid,
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expiring" => Ok(ReminderKind::Expiring),
            "unpaid" => Ok(ReminderKind::Unpaid),
            _ => Err(format!("Unknown reminder kind: {s}")),
        }
    }
}

/// Whether the member is close enough to expiry for a renewal reminder.
pub fn renewal_reminder_due(end_date: NaiveDate, today: NaiveDate) -> bool {
    days_remaining(Some(end_date), today) <= RENEWAL_REMINDER_WINDOW_DAYS
}

/// Compose a wa.me deep link carrying the reminder message. Composition
/// only: nothing is sent and delivery is not tracked.
pub fn reminder_link(member: &Member, kind: ReminderKind, today: NaiveDate) -> String {
    let message = match kind {
        ReminderKind::Expiring => expiring_message(member, today),
        ReminderKind::Unpaid => unpaid_message(member),
    };

    format!(
        "https://wa.me/{}?text={}",
        normalized_phone(member.phone()),
        urlencoding::encode(&message)
    )
}

/// Keep the digits only; local numbers get the default country code.
fn normalized_phone(phone: &str) -> String {
    let digits = phone
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();

    if digits.len() == LOCAL_NUMBER_LENGTH && !digits.starts_with(DEFAULT_COUNTRY_CODE) {
        format!("{DEFAULT_COUNTRY_CODE}{digits}")
    } else {
        digits
    }
}

fn expiring_message(member: &Member, today: NaiveDate) -> String {
    let days = days_remaining(Some(*member.end_date()), today);

    format!(
        "Hi {}! Your gym membership is expiring soon.\n\n\
         Days remaining: {days}\n\
         Expiry date: {}\n\
         Membership type: {}\n\n\
         Please renew your membership to continue enjoying our services.",
        member.name(),
        member.end_date(),
        member.membership_type(),
    )
}

fn unpaid_message(member: &Member) -> String {
    format!(
        "Hi {}! Your gym membership payment is pending.\n\n\
         Membership type: {}\n\
         End date: {}\n\
         Status: Payment due\n\n\
         Please complete your payment to continue using our facilities.",
        member.name(),
        member.membership_type(),
        member.end_date(),
    )
}
