pub mod expired_member;
pub mod member;
pub mod member_stats;
pub mod membership_type;
pub mod payment_status;
