use super::subscribers::CreateReminderOnSubscriptionCreated;
use crate::shared::usecase::{Subscriber, UseCase};
use chrono::{DateTime, Utc};
use subtrack_domain::{validate_days_before, Subscription, DEFAULT_REMINDER_DAYS_BEFORE, ID};
use subtrack_infra::SubtrackContext;

#[derive(Debug, Default)]
pub struct CreateSubscriptionUseCase {
    pub user_id: ID,
    pub name: String,
    pub price: f64,
    pub currency: Option<String>,
    pub issued_date: Option<DateTime<Utc>>,
    pub renewal_date: DateTime<Utc>,
    pub renewal_cycle_days: Option<u32>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub auto_debit: bool,
    pub note: Option<String>,
    /// Days before renewal the default `Reminder` fires
    pub reminder_days_before: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CreatedSubscription {
    pub subscription: Subscription,
    pub reminder_days_before: u32,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidName,
    InvalidPrice(f64),
    InvalidReminderDaysBefore(u32),
    UserNotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSubscriptionUseCase {
    type Response = CreatedSubscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "CreateSubscription";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(UseCaseError::InvalidPrice(self.price));
        }
        let reminder_days_before = self
            .reminder_days_before
            .unwrap_or(DEFAULT_REMINDER_DAYS_BEFORE);
        if validate_days_before(reminder_days_before).is_err() {
            return Err(UseCaseError::InvalidReminderDaysBefore(
                reminder_days_before,
            ));
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound(self.user_id.clone()));
        }

        let mut subscription = Subscription::new(
            self.user_id.clone(),
            self.name.trim(),
            self.price,
            self.renewal_date,
        );
        subscription.issued_date = self.issued_date;
        subscription.auto_debit = self.auto_debit;
        if let Some(currency) = self.currency.take() {
            subscription.currency = currency;
        }
        if let Some(days) = self.renewal_cycle_days {
            subscription.renewal_cycle_days = days;
        }
        if let Some(category) = self.category.take() {
            subscription.category = category;
        }
        if let Some(payment_method) = self.payment_method.take() {
            subscription.payment_method = payment_method;
        }
        if let Some(note) = self.note.take() {
            subscription.note = note;
        }

        ctx.repos
            .subscriptions
            .insert(&subscription)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(CreatedSubscription {
            subscription,
            reminder_days_before,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CreateReminderOnSubscriptionCreated)]
    }
}
