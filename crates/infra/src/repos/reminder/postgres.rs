use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use subtrack_domain::{Reminder, ID};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    subscription_uid: Uuid,
    user_uid: Uuid,
    days_before: i32,
    reminder_time: Option<String>,
    timezone: String,
    snooze_until: Option<DateTime<Utc>>,
    snooze_count: i32,
    last_sent: Option<DateTime<Utc>>,
    enabled: bool,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Reminder {
            id: raw.reminder_uid.into(),
            subscription_id: raw.subscription_uid.into(),
            user_id: raw.user_uid.into(),
            days_before: raw.days_before.max(0) as u32,
            time: raw.reminder_time,
            timezone: raw.timezone,
            snooze_until: raw.snooze_until,
            snooze_count: raw.snooze_count.max(0) as u32,
            last_sent: raw.last_sent,
            enabled: raw.enabled,
        }
    }
}

const SELECT_REMINDERS: &str = r#"
    SELECT reminder_uid, subscription_uid, user_uid, days_before, reminder_time,
    timezone, snooze_until, snooze_count, last_sent, enabled
    FROM reminders
"#;

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, subscription_uid, user_uid, days_before, reminder_time,
            timezone, snooze_until, snooze_count, last_sent, status, enabled)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.subscription_id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.days_before as i32)
        .bind(&reminder.time)
        .bind(&reminder.timezone)
        .bind(reminder.snooze_until)
        .bind(reminder.snooze_count as i32)
        .bind(reminder.last_sent)
        .bind(reminder.status().as_str())
        .bind(reminder.enabled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET days_before = $2,
            reminder_time = $3,
            timezone = $4,
            snooze_until = $5,
            snooze_count = $6,
            last_sent = $7,
            status = $8,
            enabled = $9
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.days_before as i32)
        .bind(&reminder.time)
        .bind(&reminder.timezone)
        .bind(reminder.snooze_until)
        .bind(reminder.snooze_count as i32)
        .bind(reminder.last_sent)
        .bind(reminder.status().as_str())
        .bind(reminder.enabled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_enabled(&self) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> =
            sqlx::query_as(&format!("{} WHERE enabled = true", SELECT_REMINDERS))
                .fetch_all(&self.pool)
                .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_subscription(&self, subscription_id: &ID, user_id: &ID) -> Option<Reminder> {
        let res: Result<Option<ReminderRaw>, _> = sqlx::query_as(&format!(
            "{} WHERE subscription_uid = $1 AND user_uid = $2",
            SELECT_REMINDERS
        ))
        .bind(subscription_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(reminder) => reminder.map(|r| r.into()),
            Err(e) => {
                error!(
                    "Unable to find reminder for subscription: {}. Err: {:?}",
                    subscription_id, e
                );
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        let res: Result<Vec<ReminderRaw>, _> =
            sqlx::query_as(&format!("{} WHERE user_uid = $1", SELECT_REMINDERS))
                .bind(user_id.inner_ref())
                .fetch_all(&self.pool)
                .await;

        match res {
            Ok(reminders) => reminders.into_iter().map(|r| r.into()).collect(),
            Err(e) => {
                error!(
                    "Unable to find reminders for user: {}. Err: {:?}",
                    user_id, e
                );
                vec![]
            }
        }
    }

    async fn delete_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
