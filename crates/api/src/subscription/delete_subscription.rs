use super::subscribers::DeleteReminderOnSubscriptionDeleted;
use crate::shared::usecase::{Subscriber, UseCase};
use subtrack_domain::{Subscription, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug)]
pub struct DeleteSubscriptionUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSubscriptionUseCase {
    type Response = Subscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "DeleteSubscription";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(sub) if sub.user_id == self.user_id => ctx
                .repos
                .subscriptions
                .delete(&sub.id)
                .await
                .ok_or_else(|| UseCaseError::NotFound(self.subscription_id.clone())),
            _ => Err(UseCaseError::NotFound(self.subscription_id.clone())),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DeleteReminderOnSubscriptionDeleted)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{test_utils::setup, usecase::execute};
    use crate::subscription::create_subscription::CreateSubscriptionUseCase;
    use chrono::Utc;

    #[actix_web::main]
    #[test]
    async fn deletes_subscription_and_its_reminder() {
        let test = setup(Utc::now()).await;
        let sub = execute(
            CreateSubscriptionUseCase {
                user_id: test.user.id.clone(),
                name: "Spotify".into(),
                price: 119.0,
                renewal_date: Utc::now(),
                ..Default::default()
            },
            &test.ctx,
        )
        .await
        .unwrap()
        .subscription;

        // Only the owner may delete it
        let res = execute(
            DeleteSubscriptionUseCase {
                user_id: ID::default(),
                subscription_id: sub.id.clone(),
            },
            &test.ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(sub.id.clone()));

        let deleted = execute(
            DeleteSubscriptionUseCase {
                user_id: test.user.id.clone(),
                subscription_id: sub.id.clone(),
            },
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(deleted.id, sub.id);
        assert!(test.ctx.repos.subscriptions.find(&sub.id).await.is_none());
        assert!(test
            .ctx
            .repos
            .reminders
            .find_by_subscription(&sub.id, &test.user.id)
            .await
            .is_none());
    }
}
