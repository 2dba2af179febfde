pub mod date;
mod reminder;
mod shared;
mod subscription;
mod user;

pub use reminder::{
    is_within_catch_window, validate_days_before, Reminder, ReminderScheduleError,
    ReminderSettingsUpdate, ReminderStatus, CATCH_WINDOW_SECS, DEFAULT_REMINDER_DAYS_BEFORE,
    DEFAULT_REMINDER_TIME, DEFAULT_TIMEZONE, MAX_REMINDER_DAYS_BEFORE,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::{
    RenewalRecord, Subscription, DEFAULT_CURRENCY, DEFAULT_RENEWAL_CYCLE_DAYS,
};
pub use user::User;
