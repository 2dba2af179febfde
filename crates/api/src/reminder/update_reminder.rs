use crate::shared::usecase::UseCase;
use subtrack_domain::{Reminder, ReminderScheduleError, ReminderSettingsUpdate, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
    pub update: ReminderSettingsUpdate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidSettings(ReminderScheduleError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = ctx
            .repos
            .reminders
            .find_by_subscription(&self.subscription_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))?;

        reminder
            .update_settings(std::mem::take(&mut self.update))
            .map_err(UseCaseError::InvalidSettings)?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
