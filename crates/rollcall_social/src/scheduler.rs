//! Cron-driven role-mention announcements.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use chrono::{DateTime, FixedOffset, Utc};
use cron::Schedule;
use parking_lot::Mutex;
use rollcall_core::{ChannelId, Destination, DestinationKind, ReactionHost, RoleId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// One `[[announcements]]` entry.
///
/// Exactly one of `cron` (five- or six-field expression) or `daily`
/// (`HH:MM`) must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementConfig {
    /// Weekly or arbitrary cron expression.
    #[serde(default)]
    pub cron: Option<String>,
    /// Daily wall-clock time, `HH:MM`.
    #[serde(default)]
    pub daily: Option<String>,
    /// Channel to post to.
    pub channel_id: u64,
    /// Role to mention, if any.
    #[serde(default)]
    pub role_id: Option<u64>,
    /// Message text.
    pub message: String,
}

const WEEKDAYS: [&str; 8] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Map numeric day-of-week tokens (0 or 7 = Sunday) onto names.
fn name_weekdays(field: &str) -> String {
    field
        .split(',')
        .map(|part| {
            let (range, step) = match part.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (part, None),
            };
            let named = range
                .split('-')
                .map(|token| match token.parse::<usize>() {
                    Ok(day) if day < WEEKDAYS.len() => WEEKDAYS[day].to_string(),
                    _ => token.to_string(),
                })
                .collect::<Vec<_>>()
                .join("-");
            match step {
                Some(step) => format!("{named}/{step}"),
                None => named,
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a cron expression.
///
/// Five-field expressions (`min hour dom month dow`, day 0 = Sunday) get a
/// zero seconds field. Six- and seven-field expressions are passed through.
///
/// # Examples
///
/// ```
/// use rollcall_social::parse_cron;
///
/// assert!(parse_cron("0 9 * * 1").is_ok());
/// assert!(parse_cron("0 0 9 * * MON").is_ok());
/// assert!(parse_cron("every monday").is_err());
/// ```
pub fn parse_cron(expression: &str) -> DiscordResult<Schedule> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    let normalized = match fields.as_slice() {
        [minute, hour, dom, month, dow] => {
            format!("0 {minute} {hour} {dom} {month} {}", name_weekdays(dow))
        }
        _ => fields.join(" "),
    };
    Schedule::from_str(&normalized).map_err(|e| {
        DiscordError::new(DiscordErrorKind::InvalidSchedule(format!(
            "{expression}: {e}"
        )))
    })
}

/// Cron expression for a daily `HH:MM` time.
///
/// # Examples
///
/// ```
/// use rollcall_social::daily_expression;
///
/// assert_eq!(daily_expression("09:05").unwrap(), "0 5 9 * * *");
/// assert!(daily_expression("25:00").is_err());
/// ```
pub fn daily_expression(time: &str) -> DiscordResult<String> {
    let invalid = || DiscordError::new(DiscordErrorKind::InvalidSchedule(time.to_string()));
    let (hours, minutes) = time.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(format!("0 {minutes} {hours} * * *"))
}

/// Announcement text with an optional leading role mention.
pub fn announcement_text(role: Option<RoleId>, message: &str) -> String {
    match role {
        Some(role) => format!("<@&{role}> {message}"),
        None => message.to_string(),
    }
}

/// Next firing time of `schedule` after `after`, in `offset`.
pub fn next_fire(
    schedule: &Schedule,
    offset: &FixedOffset,
    after: &DateTime<Utc>,
) -> Option<DateTime<FixedOffset>> {
    schedule.after(&after.with_timezone(offset)).next()
}

/// Posts scheduled announcements through a [`ReactionHost`].
///
/// Each job is a tokio task that sleeps until its next firing time.
pub struct AnnouncementScheduler<H> {
    host: Arc<H>,
    offset: FixedOffset,
    jobs: Mutex<Vec<JoinHandle<()>>>,
}

impl<H> AnnouncementScheduler<H>
where
    H: ReactionHost + 'static,
{
    /// Scheduler evaluating cron expressions in `offset`.
    pub fn new(host: Arc<H>, offset: FixedOffset) -> Self {
        Self {
            host,
            offset,
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// Number of running jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.lock().len()
    }

    /// Schedule every configured announcement. Invalid entries are logged
    /// and skipped.
    pub fn schedule_all(&self, announcements: &[AnnouncementConfig]) {
        if announcements.is_empty() {
            info!("Announcement scheduler idle, no announcements configured");
        }
        for entry in announcements {
            let channel = ChannelId(entry.channel_id);
            let role = entry.role_id.filter(|id| *id != 0).map(RoleId);
            let scheduled = match (&entry.cron, &entry.daily) {
                (Some(expression), None) => {
                    self.schedule_weekly(expression, channel, role, &entry.message)
                }
                (None, Some(time)) => self.schedule_daily(time, channel, role, &entry.message),
                _ => Err(DiscordError::new(DiscordErrorKind::InvalidSchedule(
                    "set exactly one of cron or daily".to_string(),
                ))),
            };
            if let Err(e) = scheduled {
                warn!(channel_id = %channel, error = %e, "Skipping announcement");
            }
        }
    }

    /// Post `message` to `channel` whenever `expression` fires.
    #[instrument(skip(self, message))]
    pub fn schedule_weekly(
        &self,
        expression: &str,
        channel: ChannelId,
        role: Option<RoleId>,
        message: &str,
    ) -> DiscordResult<()> {
        let schedule = parse_cron(expression)?;
        let text = announcement_text(role, message);
        let host = Arc::clone(&self.host);
        let offset = self.offset;

        let handle = tokio::spawn(async move {
            while let Some(next) = next_fire(&schedule, &offset, &Utc::now()) {
                let wait = (next.with_timezone(&Utc) - Utc::now())
                    .to_std()
                    .unwrap_or_default();
                tokio::time::sleep(wait).await;
                post_announcement(host.as_ref(), channel, &text).await;
            }
        });

        self.jobs.lock().push(handle);
        info!(cron = expression, "Announcement scheduled");
        Ok(())
    }

    /// Post `message` to `channel` every day at `time` (`HH:MM`).
    pub fn schedule_daily(
        &self,
        time: &str,
        channel: ChannelId,
        role: Option<RoleId>,
        message: &str,
    ) -> DiscordResult<()> {
        let expression = daily_expression(time)?;
        self.schedule_weekly(&expression, channel, role, message)
    }

    /// Abort every job.
    pub fn stop_all(&self) {
        let jobs: Vec<_> = self.jobs.lock().drain(..).collect();
        let count = jobs.len();
        for job in jobs {
            job.abort();
        }
        info!(count, "All announcements stopped");
    }
}

async fn post_announcement<H: ReactionHost + ?Sized>(host: &H, channel: ChannelId, text: &str) {
    match host.destination(channel, DestinationKind::AnyText).await {
        Ok(Destination::Sendable(target)) => match host.send_text(target, text).await {
            Ok(()) => info!(channel_id = %channel, "Scheduled announcement sent"),
            Err(e) => error!(channel_id = %channel, error = %e, "Failed to send announcement"),
        },
        Ok(Destination::NotSendable) => {
            error!(channel_id = %channel, "Announcement channel does not accept messages")
        }
        Err(e) => error!(channel_id = %channel, error = %e, "Announcement channel unavailable"),
    }
}

impl<H> Drop for AnnouncementScheduler<H> {
    fn drop(&mut self) {
        for job in self.jobs.get_mut().drain(..) {
            job.abort();
        }
    }
}
