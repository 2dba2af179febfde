use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use subtrack_domain::{Reminder, ID};
use subtrack_infra::SubtrackContext;

/// Fires the reminder once at `until` instead of its computed trigger instant
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
    pub until: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// There is no enabled reminder for the subscription
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_subscription(&self.subscription_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))?;

        reminder
            .snooze(self.until)
            .map_err(|_| UseCaseError::NotFound(self.subscription_id.clone()))?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{test_utils::setup, usecase::execute};
    use chrono::Duration;
    use subtrack_domain::ReminderStatus;

    #[actix_web::main]
    #[test]
    async fn snoozes_enabled_reminder() {
        let test = setup(Utc::now()).await;
        let subscription_id = ID::default();
        let reminder = Reminder::new(subscription_id.clone(), test.user.id.clone(), 1, "UTC");
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let until = Utc::now() + Duration::hours(1);
        for expected_count in 1..=2 {
            let res = execute(
                SnoozeReminderUseCase {
                    user_id: test.user.id.clone(),
                    subscription_id: subscription_id.clone(),
                    until,
                },
                &test.ctx,
            )
            .await
            .unwrap();
            assert_eq!(res.snooze_until, Some(until));
            assert_eq!(res.snooze_count, expected_count);
            assert_eq!(res.status(), ReminderStatus::Snoozed);
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_disabled_reminder() {
        let test = setup(Utc::now()).await;
        let subscription_id = ID::default();
        let mut reminder = Reminder::new(subscription_id.clone(), test.user.id.clone(), 1, "UTC");
        reminder.disable();
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let res = execute(
            SnoozeReminderUseCase {
                user_id: test.user.id.clone(),
                subscription_id: subscription_id.clone(),
                until: Utc::now(),
            },
            &test.ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(subscription_id));
    }
}
