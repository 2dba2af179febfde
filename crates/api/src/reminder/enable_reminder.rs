use crate::shared::usecase::UseCase;
use subtrack_domain::{Reminder, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug)]
pub struct EnableReminderUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for EnableReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "EnableReminder";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_subscription(&self.subscription_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))?;

        reminder.enable();
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
