pub mod disable_reminder;
pub mod enable_reminder;
pub mod get_reminder;
pub mod get_reminders;
pub mod send_due_reminders;
pub mod snooze_reminder;
pub mod update_reminder;
