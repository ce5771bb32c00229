use crate::services::notifier::MatchNotifier;
use crate::services::store::{MatchStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Periodic reminder for matches left unconfirmed too long
///
/// Each sweep covers the matches that crossed the `confirm_within` deadline
/// since the previous sweep, so a match is reminded once. The first sweep
/// looks back one `interval`. Only reads matches; confirmation state is
/// never changed here.
pub struct ReminderSweep {
    matches: Arc<dyn MatchStore>,
    notifier: MatchNotifier,
    confirm_within: Duration,
    interval: Duration,
    swept_until: Mutex<Option<DateTime<Utc>>>,
}

/// Summary of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub stale_matches: usize,
    pub reminders_sent: usize,
}

impl ReminderSweep {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        notifier: MatchNotifier,
        confirm_within: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            matches,
            notifier,
            confirm_within,
            interval,
            swept_until: Mutex::new(None),
        }
    }

    /// Remind the pending parties of matches whose deadline passed since the last sweep
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<SweepReport, StoreError> {
        let mut swept_until = self.swept_until.lock().await;

        let cutoff = now - self.confirm_within;
        let from = swept_until.unwrap_or(cutoff - self.interval);
        if from >= cutoff {
            return Ok(SweepReport::default());
        }

        let stale = self.matches.list_unfinalized_between(from, cutoff).await?;
        *swept_until = Some(cutoff);

        let mut report = SweepReport {
            stale_matches: stale.len(),
            reminders_sent: 0,
        };

        for record in &stale {
            match self.notifier.remind_pending(record).await {
                Ok(sent) => report.reminders_sent += sent,
                Err(e) => tracing::warn!("Failed to remind parties of match {}: {}", record.id, e),
            }
        }

        if report.stale_matches > 0 {
            tracing::info!(
                "Reminder sweep: {} unconfirmed matches, {} reminders sent",
                report.stale_matches,
                report.reminders_sent
            );
        }

        Ok(report)
    }

    /// Run forever, one sweep per `interval`
    pub async fn run(self) {
        let period = match self.interval.to_std() {
            Ok(period) if !period.is_zero() => period,
            _ => {
                tracing::error!("Reminder interval must be positive, sweep not started");
                return;
            }
        };

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once(Utc::now()).await {
                tracing::error!("Reminder sweep failed: {}", e);
            }
        }
    }
}
