//! # Daily Counter
//!
//! Accepted check-ins since the last midnight in the reference zone.
//!
//! The rollover task is not a fixed tick: after every reset it recomputes the delay
//! to the following midnight from the clock, so it stays aligned across DST shifts
//! and timer drift.
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use roster::time::until_next_midnight;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct DailyCounter {
    count: AtomicU64,
}

impl DailyCounter {
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Returns the new count.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the count before the reset.
    pub fn reset(&self) -> u64 {
        self.count.swap(0, Ordering::SeqCst)
    }
}

/// Resets `counter` at every midnight in `zone` until the handle is aborted.
pub fn spawn_midnight_rollover<C>(counter: Arc<DailyCounter>, zone: Tz, clock: C) -> JoinHandle<()>
where
    C: Fn() -> DateTime<Utc> + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let wait = until_next_midnight(clock(), zone);
            debug!("Next daily count rollover in {}s", wait.as_secs());

            sleep(wait).await;

            let previous = counter.reset();
            info!("Midnight rollover, daily check-in count {previous} reset to 0");
        }
    })
}
