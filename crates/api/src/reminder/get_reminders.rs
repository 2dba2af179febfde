use crate::shared::usecase::UseCase;
use subtrack_domain::{Reminder, ID};
use subtrack_infra::SubtrackContext;

/// Every `Reminder` of a `User`, disabled ones included
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.repos.reminders.find_by_user(&self.user_id).await)
    }
}
