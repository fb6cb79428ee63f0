use chrono::NaiveDate;
use derive_getters::Getters;
use dto::membership_type::MembershipType;
use dto::payment_status::PaymentStatus;

pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod queries;
pub(crate) mod validate;

/// Raw member fields exactly as submitted by a client form.
#[derive(Debug, Default, Clone)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub membership_type: String,
    pub start_date: String,
    pub end_date: String,
    pub payment_status: String,
}

/// A photo payload carried alongside a create or update command. The bytes
/// are handed to the asset store; only the returned reference is persisted.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

/// Member fields once validated, ready for persistence.
#[derive(Debug, Getters, Clone, PartialEq, Eq)]
pub struct ValidatedMember {
    name: String,
    email: String,
    phone: String,
    membership_type: MembershipType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_status: PaymentStatus,
}

impl ValidatedMember {
    pub(crate) fn new(
        name: String,
        email: String,
        phone: String,
        membership_type: MembershipType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        payment_status: PaymentStatus,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            membership_type,
            start_date,
            end_date,
            payment_status,
        }
    }
}
