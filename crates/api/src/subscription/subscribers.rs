use super::{
    create_subscription::{CreateSubscriptionUseCase, CreatedSubscription},
    delete_subscription::DeleteSubscriptionUseCase,
    renew_subscription::RenewSubscriptionUseCase,
    update_subscription::{UpdateSubscriptionUseCase, UpdatedSubscription},
};
use crate::shared::usecase::Subscriber;
use subtrack_domain::{date::parse_timezone, Reminder, Subscription};
use subtrack_infra::SubtrackContext;
use tracing::error;

pub struct CreateReminderOnSubscriptionCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateSubscriptionUseCase> for CreateReminderOnSubscriptionCreated {
    async fn notify(&self, e: &CreatedSubscription, ctx: &SubtrackContext) {
        let sub = &e.subscription;
        let timezone = ctx
            .repos
            .users
            .find(&sub.user_id)
            .await
            .and_then(|user| user.timezone)
            .filter(|tz| parse_timezone(tz).is_some())
            .unwrap_or_else(|| ctx.config.default_timezone.clone());

        let reminder = Reminder::new(
            sub.id.clone(),
            sub.user_id.clone(),
            e.reminder_days_before,
            &timezone,
        );
        // The subscription is kept even if its reminder could not be stored
        if let Err(err) = ctx.repos.reminders.insert(&reminder).await {
            error!(
                "Unable to create reminder for subscription: {}. Err: {:?}",
                sub.id, err
            );
        }
    }
}

pub struct DeleteReminderOnSubscriptionDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteSubscriptionUseCase> for DeleteReminderOnSubscriptionDeleted {
    async fn notify(&self, e: &Subscription, ctx: &SubtrackContext) {
        if let Err(err) = ctx.repos.reminders.delete_by_subscription(&e.id).await {
            error!(
                "Unable to delete reminder of subscription: {}. Err: {:?}",
                e.id, err
            );
        }
    }
}

async fn reset_reminder(sub: &Subscription, ctx: &SubtrackContext) {
    let mut reminder = match ctx
        .repos
        .reminders
        .find_by_subscription(&sub.id, &sub.user_id)
        .await
    {
        Some(reminder) => reminder,
        None => return,
    };

    reminder.reset_for_new_cycle();
    if let Err(err) = ctx.repos.reminders.save(&reminder).await {
        error!(
            "Unable to reset reminder of subscription: {}. Err: {:?}",
            sub.id, err
        );
    }
}

pub struct ResetReminderOnSubscriptionRenewed;

#[async_trait::async_trait(?Send)]
impl Subscriber<RenewSubscriptionUseCase> for ResetReminderOnSubscriptionRenewed {
    async fn notify(&self, e: &Subscription, ctx: &SubtrackContext) {
        reset_reminder(e, ctx).await;
    }
}

pub struct ResetReminderOnSubscriptionRescheduled;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateSubscriptionUseCase> for ResetReminderOnSubscriptionRescheduled {
    async fn notify(&self, e: &UpdatedSubscription, ctx: &SubtrackContext) {
        if e.rescheduled {
            reset_reminder(&e.subscription, ctx).await;
        }
    }
}
