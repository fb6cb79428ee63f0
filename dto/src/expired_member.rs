use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Identity of a member whose stale "paid" record was demoted by the expiry
/// sweep.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ExpiredMember {
    id: i32,
    name: String,
    email: String,
}

impl ExpiredMember {
    pub fn new(id: i32, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}
