use crate::database::dao;
use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::ConnectionFailed;
use crate::database::DbPool;
use crate::tools::log_error_and_return;
use chrono::NaiveDate;
use dto::expired_member::ExpiredMember;
use log::{info, warn};
use std::time::Duration;

/// Cadence of the timer-driven sweep. Reads trigger their own sweep, so the
/// timer only bounds how stale an idle system can get.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Demote every stale paid record and return the demoted identities.
/// Best-effort: a failing sweep logs and yields an empty set so the read it
/// guards proceeds on possibly-stale data instead of failing.
pub fn sweep_once(pool: &DbPool, today: NaiveDate) -> Vec<ExpiredMember> {
    match demote_expired_members(pool, today) {
        Ok(expired_members) => {
            if !expired_members.is_empty() {
                let names = expired_members
                    .iter()
                    .map(|member| member.name().as_str())
                    .collect::<Vec<_>>();
                info!("Auto-expired {} members: {names:?}", expired_members.len());
            }
            expired_members
        }
        Err(error) => {
            warn!("Expiry sweep failed, statuses may be stale.\n{error:#?}");
            Vec::new()
        }
    }
}

fn demote_expired_members(
    pool: &DbPool,
    today: NaiveDate,
) -> Result<Vec<ExpiredMember>, DatabaseError> {
    let mut connection = pool.get().map_err(log_error_and_return(ConnectionFailed))?;

    dao::member::demote_expired_paid(&mut connection, today)
}
