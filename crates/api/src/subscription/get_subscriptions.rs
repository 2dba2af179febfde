use crate::shared::usecase::UseCase;
use subtrack_domain::{Subscription, ID};
use subtrack_infra::SubtrackContext;

/// Subscriptions of a `User`, soonest renewal first
#[derive(Debug)]
pub struct GetSubscriptionsUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubscriptionsUseCase {
    type Response = Vec<Subscription>;

    type Errors = UseCaseError;

    const NAME: &'static str = "GetSubscriptions";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.repos.subscriptions.find_by_user(&self.user_id).await)
    }
}
