use crate::{
    date,
    shared::entity::{Entity, ID},
};
use chrono::prelude::*;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

pub const DEFAULT_REMINDER_DAYS_BEFORE: u32 = 1;
pub const DEFAULT_REMINDER_TIME: &str = "09:00";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
/// Upper bound of `days_before`, one year ahead of the renewal
pub const MAX_REMINDER_DAYS_BEFORE: u32 = 365;
/// How far past a trigger instant a sweep may still fire it.
/// Matches the minutely tick of the dispatcher.
pub const CATCH_WINDOW_SECS: i64 = 60;

/// Display state of a `Reminder`, always derived from `enabled` and `snooze_until`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Scheduled,
    Snoozed,
    Disabled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Snoozed => "snoozed",
            Self::Disabled => "disabled",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderScheduleError {
    #[error("Invalid timezone: `{0}`")]
    InvalidTimezone(String),
    #[error("Invalid reminder time: `{0}`, expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid days before renewal: {0}, at most 365 is supported")]
    InvalidDaysBefore(u32),
    #[error("The reminder trigger date is out of range")]
    OutOfRange,
    #[error("The reminder is disabled")]
    Disabled,
}

/// A `Reminder` tells the owner of a `Subscription` by email that the
/// `Subscription` is about to renew. There is exactly one per `Subscription`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub subscription_id: ID,
    pub user_id: ID,
    /// Number of calendar days before the renewal date the reminder fires
    pub days_before: u32,
    /// Local wall clock time on the form `HH:MM`, `None` means 09:00
    pub time: Option<String>,
    /// IANA timezone the `days_before` and `time` are interpreted in
    pub timezone: String,
    /// When set this instant replaces the computed trigger instant once
    pub snooze_until: Option<DateTime<Utc>>,
    pub snooze_count: u32,
    /// Used to avoid sending more than one reminder per UTC day
    pub last_sent: Option<DateTime<Utc>>,
    pub enabled: bool,
}

/// Partial update of the user facing settings of a `Reminder`
#[derive(Debug, Clone, Default)]
pub struct ReminderSettingsUpdate {
    pub days_before: Option<u32>,
    pub time: Option<String>,
    pub timezone: Option<String>,
    pub enabled: Option<bool>,
}

impl Reminder {
    pub fn new(subscription_id: ID, user_id: ID, days_before: u32, timezone: &str) -> Self {
        Self {
            id: Default::default(),
            subscription_id,
            user_id,
            days_before,
            time: Some(DEFAULT_REMINDER_TIME.into()),
            timezone: timezone.into(),
            snooze_until: None,
            snooze_count: 0,
            last_sent: None,
            enabled: true,
        }
    }

    pub fn status(&self) -> ReminderStatus {
        if !self.enabled {
            ReminderStatus::Disabled
        } else if self.snooze_until.is_some() {
            ReminderStatus::Snoozed
        } else {
            ReminderStatus::Scheduled
        }
    }

    /// Applies the given settings. Nothing is changed if any of them is invalid.
    pub fn update_settings(
        &mut self,
        update: ReminderSettingsUpdate,
    ) -> Result<(), ReminderScheduleError> {
        if let Some(days_before) = update.days_before {
            validate_days_before(days_before)?;
        }
        if let Some(time) = &update.time {
            if date::parse_time_of_day(time).is_none() {
                return Err(ReminderScheduleError::InvalidTime(time.clone()));
            }
        }
        if let Some(timezone) = &update.timezone {
            if date::parse_timezone(timezone).is_none() {
                return Err(ReminderScheduleError::InvalidTimezone(timezone.clone()));
            }
        }

        if let Some(days_before) = update.days_before {
            self.days_before = days_before;
        }
        if let Some(time) = update.time {
            self.time = Some(time.trim().to_string());
        }
        if let Some(timezone) = update.timezone {
            self.timezone = timezone;
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        self.snooze_until = None;
        self.snooze_count = 0;

        Ok(())
    }

    pub fn snooze(&mut self, until: DateTime<Utc>) -> Result<(), ReminderScheduleError> {
        if !self.enabled {
            return Err(ReminderScheduleError::Disabled);
        }
        self.snooze_until = Some(until);
        self.snooze_count += 1;
        Ok(())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.snooze_until = None;
        self.snooze_count = 0;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.snooze_until = None;
    }

    /// Makes the reminder eligible again after its `Subscription` moved on to a new cycle
    pub fn reset_for_new_cycle(&mut self) {
        self.last_sent = None;
        self.snooze_until = None;
        self.snooze_count = 0;
    }

    pub fn mark_sent(&mut self, at: DateTime<Utc>) {
        self.last_sent = Some(at);
    }

    /// A snoozed reminder is only attempted once, whatever the outcome of the send
    pub fn complete_snooze(&mut self, at: DateTime<Utc>) {
        self.last_sent = Some(at);
        self.snooze_until = None;
    }

    pub fn sent_same_day_as(&self, now: &DateTime<Utc>) -> bool {
        match &self.last_sent {
            Some(last_sent) => date::is_same_utc_day(last_sent, now),
            None => false,
        }
    }

    /// Computes the instant this reminder should fire for a `Subscription`
    /// renewing at `renewal_date`.
    ///
    /// The renewal date is moved into the reminder timezone, `days_before`
    /// calendar days are subtracted there and the wall clock is set to the
    /// reminder time.
    pub fn trigger_at(
        &self,
        renewal_date: &DateTime<Utc>,
    ) -> Result<DateTime<Utc>, ReminderScheduleError> {
        let tz = date::parse_timezone(&self.timezone)
            .ok_or_else(|| ReminderScheduleError::InvalidTimezone(self.timezone.clone()))?;
        let (hour, minute) = match &self.time {
            Some(time) => date::parse_time_of_day(time)
                .ok_or_else(|| ReminderScheduleError::InvalidTime(time.clone()))?,
            None => (9, 0),
        };

        let renewal_local_date = renewal_date.with_timezone(&tz).naive_local().date();
        let target = renewal_local_date
            .checked_sub_signed(Duration::days(self.days_before as i64))
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or(ReminderScheduleError::OutOfRange)?;

        date::resolve_local(&tz, &target)
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(ReminderScheduleError::OutOfRange)
    }
}

pub fn validate_days_before(days_before: u32) -> Result<(), ReminderScheduleError> {
    if days_before > MAX_REMINDER_DAYS_BEFORE {
        return Err(ReminderScheduleError::InvalidDaysBefore(days_before));
    }
    Ok(())
}

/// Whether `now` has reached `target` but not gone past it by a full catch window
pub fn is_within_catch_window(target: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
    let diff_millis = (*target - *now).num_milliseconds();
    diff_millis <= 0 && diff_millis > -CATCH_WINDOW_SECS * 1000
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
