use super::subscribers::ResetReminderOnSubscriptionRenewed;
use crate::shared::usecase::{Subscriber, UseCase};
use subtrack_domain::{Subscription, ID};
use subtrack_infra::SubtrackContext;

/// Moves a `Subscription` on to its next renewal cycle
#[derive(Debug)]
pub struct RenewSubscriptionUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RenewSubscriptionUseCase {
    type Response = Subscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "RenewSubscription";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut sub = match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(sub) if sub.user_id == self.user_id => sub,
            _ => return Err(UseCaseError::NotFound(self.subscription_id.clone())),
        };

        sub.renew();
        ctx.repos
            .subscriptions
            .save(&sub)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(sub)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ResetReminderOnSubscriptionRenewed)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{test_utils::setup, usecase::execute};
    use crate::subscription::create_subscription::CreateSubscriptionUseCase;
    use chrono::{TimeZone, Utc};

    #[actix_web::main]
    #[test]
    async fn renews_and_resets_reminder() {
        let renewal_date = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let test = setup(Utc::now()).await;
        let sub = execute(
            CreateSubscriptionUseCase {
                user_id: test.user.id.clone(),
                name: "Netflix".into(),
                price: 649.0,
                renewal_date,
                ..Default::default()
            },
            &test.ctx,
        )
        .await
        .unwrap()
        .subscription;

        let mut reminder = test
            .ctx
            .repos
            .reminders
            .find_by_subscription(&sub.id, &test.user.id)
            .await
            .unwrap();
        reminder.mark_sent(Utc.with_ymd_and_hms(2025, 3, 9, 3, 30, 10).unwrap());
        reminder
            .snooze(Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap())
            .unwrap();
        test.ctx.repos.reminders.save(&reminder).await.unwrap();

        let renewed = execute(
            RenewSubscriptionUseCase {
                user_id: test.user.id.clone(),
                subscription_id: sub.id.clone(),
            },
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(
            renewed.renewal_date,
            Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap()
        );
        assert_eq!(renewed.renewal_history.len(), 1);
        assert_eq!(renewed.renewal_history[0].date, renewal_date);

        let reminder = test
            .ctx
            .repos
            .reminders
            .find_by_subscription(&sub.id, &test.user.id)
            .await
            .unwrap();
        assert_eq!(reminder.last_sent, None);
        assert_eq!(reminder.snooze_until, None);
        assert_eq!(reminder.snooze_count, 0);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_subscription() {
        let test = setup(Utc::now()).await;
        let subscription_id = ID::default();
        let res = execute(
            RenewSubscriptionUseCase {
                user_id: test.user.id.clone(),
                subscription_id: subscription_id.clone(),
            },
            &test.ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(subscription_id));
    }
}
