use crate::shared::usecase::UseCase;
use subtrack_domain::{Reminder, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug)]
pub struct DisableReminderUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DisableReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "DisableReminder";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_subscription(&self.subscription_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))?;

        reminder.disable();
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
    use crate::reminder::{
        enable_reminder::EnableReminderUseCase, get_reminder::GetReminderUseCase,
    };
    use crate::shared::{test_utils::setup, usecase::execute};
    use chrono::{Duration, Utc};
    use subtrack_domain::ReminderStatus;

    #[actix_web::main]
    #[test]
    async fn disables_and_enables_reminder() {
        let test = setup(Utc::now()).await;
        let subscription_id = ID::default();
        let mut reminder = Reminder::new(subscription_id.clone(), test.user.id.clone(), 1, "UTC");
        reminder.snooze(Utc::now() + Duration::minutes(30)).unwrap();
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let disabled = execute(
            DisableReminderUseCase {
                user_id: test.user.id.clone(),
                subscription_id: subscription_id.clone(),
            },
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(disabled.status(), ReminderStatus::Disabled);
        assert_eq!(disabled.snooze_until, None);
        assert!(test
            .ctx
            .repos
            .reminders
            .find_enabled()
            .await
            .unwrap()
            .is_empty());

        execute(
            EnableReminderUseCase {
                user_id: test.user.id.clone(),
                subscription_id: subscription_id.clone(),
            },
            &test.ctx,
        )
        .await
        .unwrap();
        let enabled = execute(
            GetReminderUseCase {
                user_id: test.user.id.clone(),
                subscription_id,
            },
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(enabled.status(), ReminderStatus::Scheduled);
        assert_eq!(enabled.snooze_count, 0);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_reminder_of_other_user() {
        let test = setup(Utc::now()).await;
        let subscription_id = ID::default();
        let reminder = Reminder::new(subscription_id.clone(), test.user.id.clone(), 1, "UTC");
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let res = execute(
            DisableReminderUseCase {
                user_id: ID::default(),
                subscription_id: subscription_id.clone(),
            },
            &test.ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(subscription_id));
    }
}
