use crate::member::error::MemberError;
use crate::member::{MemberInput, ValidatedMember};
use chrono::NaiveDate;
use dto::membership_type::MembershipType;
use dto::payment_status::PaymentStatus;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Rough mailbox shape: something, an @, a domain with a dot. Deliverability
/// is not checked here.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Check and normalize a raw member submission. Text fields are trimmed,
/// enums and dates are parsed into their typed form.
pub fn validate(input: &MemberInput) -> Result<ValidatedMember, MemberError> {
    let name = required_text(&input.name, "Name")?;
    let email = required_text(&input.email, "Email")?;
    if !EMAIL_SHAPE.is_match(&email) {
        return Err(MemberError::InvalidEmail);
    }
    let phone = required_text(&input.phone, "Phone")?;
    let membership_type = MembershipType::from_str(input.membership_type.trim())
        .map_err(|_| MemberError::InvalidMembershipType)?;
    let payment_status = PaymentStatus::from_str(input.payment_status.trim())
        .map_err(|_| MemberError::InvalidPaymentStatus)?;
    let start_date = required_date(&input.start_date, "Start date", "start")?;
    let end_date = required_date(&input.end_date, "End date", "end")?;

    Ok(ValidatedMember::new(
        name,
        email,
        phone,
        membership_type,
        start_date,
        end_date,
        payment_status,
    ))
}

fn required_text(value: &str, field: &'static str) -> Result<String, MemberError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MemberError::MissingField(field));
    }

    Ok(value.to_owned())
}

fn required_date(
    value: &str,
    field: &'static str,
    which: &'static str,
) -> Result<NaiveDate, MemberError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MemberError::MissingField(field));
    }

    NaiveDate::from_str(value).map_err(|_| MemberError::InvalidDate(which))
}
