//! Weekly report scheduling.
//!
//! Each configured job fires once a week at a fixed local time, expressed in
//! a fixed UTC offset. Jobs run on the blocking thread pool and never
//! overlap with themselves.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Utc, Weekday};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{ScheduleConfig, ScheduledJob};
use crate::engine::{ReportEngine, ReportOutcome};
use crate::error::{ReportError, ReportResult};
use crate::summary::{Trigger, render_summary};

/// A fixed weekday and time of day in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTrigger {
    weekday: Weekday,
    time: NaiveTime,
    offset: FixedOffset,
}

impl WeeklyTrigger {
    /// Builds a trigger from a configured job.
    ///
    /// # Returns
    ///
    /// `InvalidSchedule` if the day of week, hour, minute or offset is out
    /// of range.
    pub fn from_job(job: &ScheduledJob, utc_offset_hours: i32) -> ReportResult<Self> {
        let invalid = |message: String| ReportError::InvalidSchedule {
            location: job.location.clone(),
            message,
        };

        let weekday: Weekday = job
            .day_of_week
            .trim()
            .parse()
            .map_err(|_| invalid(format!("unknown day of week '{}'", job.day_of_week)))?;
        let time = NaiveTime::from_hms_opt(job.hour, job.minute, 0)
            .ok_or_else(|| invalid(format!("invalid time {}:{:02}", job.hour, job.minute)))?;
        let offset = FixedOffset::east_opt(utc_offset_hours * 3600)
            .ok_or_else(|| invalid(format!("invalid UTC offset {}", utc_offset_hours)))?;

        Ok(Self {
            weekday,
            time,
            offset,
        })
    }

    /// Returns the first fire instant strictly after `now`.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::config::ScheduledJob;
    /// use staff_report::schedule::WeeklyTrigger;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let job = ScheduledJob {
    ///     location: "kievskaya".to_string(),
    ///     day_of_week: "fri".to_string(),
    ///     hour: 14,
    ///     minute: 24,
    /// };
    /// let trigger = WeeklyTrigger::from_job(&job, 3).unwrap();
    ///
    /// // Monday 2026-03-02 09:00 UTC -> Friday 2026-03-06 14:24 +03:00
    /// let next = trigger.next_after(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
    /// assert_eq!(next.to_rfc3339(), "2026-03-06T14:24:00+03:00");
    /// ```
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let local = now.with_timezone(&self.offset);
        let days_ahead = (self.weekday.num_days_from_monday() as i64
            - local.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);

        let mut candidate = self.at_local(local.date_naive().and_time(self.time))
            + Duration::days(days_ahead);
        if candidate <= now {
            candidate += Duration::days(7);
        }
        candidate
    }

    fn at_local(&self, naive: chrono::NaiveDateTime) -> DateTime<FixedOffset> {
        let utc = naive - Duration::seconds(self.offset.local_minus_utc() as i64);
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }
}

/// A validated weekly job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReport {
    /// Location key to report on.
    pub location: String,
    /// When the job fires.
    pub trigger: WeeklyTrigger,
}

/// Validates the configured jobs against the engine's registry.
pub fn build_jobs(
    config: &ScheduleConfig,
    engine: &ReportEngine,
) -> ReportResult<Vec<ScheduledReport>> {
    config
        .jobs
        .iter()
        .map(|job| -> ReportResult<ScheduledReport> {
            let location = engine
                .location(&job.location)
                .map_err(|_| ReportError::InvalidSchedule {
                    location: job.location.clone(),
                    message: "location is not in the registry".to_string(),
                })?;
            Ok(ScheduledReport {
                location: location.key.clone(),
                trigger: WeeklyTrigger::from_job(job, config.utc_offset_hours)?,
            })
        })
        .collect()
}

/// Spawns one task per job; each task loops forever.
pub fn spawn_scheduler(
    engine: Arc<ReportEngine>,
    jobs: Vec<ScheduledReport>,
) -> Vec<JoinHandle<()>> {
    jobs.into_iter()
        .map(|job| tokio::spawn(run_job(Arc::clone(&engine), job)))
        .collect()
}

async fn run_job(engine: Arc<ReportEngine>, job: ScheduledReport) {
    loop {
        let next = job.trigger.next_after(Utc::now());
        let wait = (next.with_timezone(&Utc) - Utc::now())
            .to_std()
            .unwrap_or_default();
        info!(location = %job.location, next_run = %next, "Scheduled report waiting");

        tokio::time::sleep(wait).await;
        run_scheduled_once(Arc::clone(&engine), &job.location).await;
    }
}

/// A finished scheduled report, ready to hand to the chat destination.
#[derive(Debug, Clone)]
pub struct ScheduledDelivery {
    /// Destination chat id of the location, if configured.
    pub destination: Option<String>,
    /// Summary text for the message.
    pub summary: String,
    /// The written report.
    pub outcome: ReportOutcome,
}

/// Runs one scheduled report and logs the outcome.
///
/// Returns `None` when the run failed; the failure is logged and the job
/// keeps its schedule.
pub async fn run_scheduled_once(
    engine: Arc<ReportEngine>,
    key: &str,
) -> Option<ScheduledDelivery> {
    let task_engine = Arc::clone(&engine);
    let task_key = key.to_string();
    let result = tokio::task::spawn_blocking(move || task_engine.run(&task_key)).await;

    match result {
        Ok(Ok(outcome)) => {
            let destination = engine
                .location(key)
                .ok()
                .and_then(|location| location.destination().map(str::to_string));
            let summary =
                render_summary(&outcome, Trigger::Scheduled, chrono::Local::now().naive_local());
            info!(
                location = %key,
                path = %outcome.path.display(),
                rows = outcome.rows.len(),
                destination = destination.as_deref().unwrap_or("-"),
                "Scheduled report ready\n{}",
                summary
            );
            Some(ScheduledDelivery {
                destination,
                summary,
                outcome,
            })
        }
        Ok(Err(err)) => {
            error!(location = %key, error = %err, "Scheduled report failed");
            None
        }
        Err(join_error) => {
            error!(location = %key, error = %join_error, "Scheduled report task panicked");
            None
        }
    }
}
