use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Dashboard aggregate counts. The counts are not mutually exclusive:
/// expiring members still count as active until their end date passes.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    total_members: i64,
    active_members: i64,
    unpaid_members: i64,
    expiring_members: i64,
}

impl MemberStats {
    pub fn new(
        total_members: i64,
        active_members: i64,
        unpaid_members: i64,
        expiring_members: i64,
    ) -> Self {
        Self {
            total_members,
            active_members,
            unpaid_members,
            expiring_members,
        }
    }
}
