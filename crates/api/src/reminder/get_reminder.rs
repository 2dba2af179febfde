use crate::shared::usecase::UseCase;
use subtrack_domain::{Reminder, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .find_by_subscription(&self.subscription_id, &self.user_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone()))
    }
}
