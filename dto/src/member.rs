use crate::membership_type::MembershipType;
use crate::payment_status::PaymentStatus;
use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A gym member record as exposed to clients. Field names are serialized in
/// camelCase; the photo field holds the opaque asset reference, not bytes.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    id: i32,
    name: String,
    email: String,
    phone: String,
    membership_type: MembershipType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_status: PaymentStatus,
    photo: Option<String>,
    created_at: String,
    updated_at: String,
}

impl Member {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        name: String,
        email: String,
        phone: String,
        membership_type: MembershipType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        payment_status: PaymentStatus,
        photo: Option<String>,
        created_at: String,
        updated_at: String,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            membership_type,
            start_date,
            end_date,
            payment_status,
            photo,
            created_at,
            updated_at,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use chrono::Months;

    impl Member {
        pub fn new_test(end_date: NaiveDate) -> Self {
            Member {
                id: 1,
                name: "Jon Doe".to_string(),
                email: "jon.doe@email.com".to_string(),
                phone: "9876543210".to_string(),
                membership_type: MembershipType::Monthly,
                start_date: end_date.checked_sub_months(Months::new(1)).unwrap(),
                end_date,
                payment_status: PaymentStatus::Paid,
                photo: None,
                created_at: "2025-01-01 00:00:00".to_string(),
                updated_at: "2025-01-01 00:00:00".to_string(),
            }
        }
    }

    #[test]
    fn should_serialize_with_client_field_names() {
        let member = Member::new_test(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        let json = serde_json::to_value(&member).unwrap();

        assert_eq!("monthly", json["membershipType"]);
        assert_eq!("2025-01-01", json["startDate"]);
        assert_eq!("2025-02-01", json["endDate"]);
        assert_eq!("paid", json["paymentStatus"]);
        assert!(json["photo"].is_null());
    }
}
