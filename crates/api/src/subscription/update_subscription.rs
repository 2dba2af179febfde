use super::subscribers::ResetReminderOnSubscriptionRescheduled;
use crate::shared::usecase::{Subscriber, UseCase};
use chrono::{DateTime, Utc};
use subtrack_domain::{Subscription, ID};
use subtrack_infra::SubtrackContext;

/// Partial update of a `Subscription`. Fields left as `None` are kept.
#[derive(Debug, Default)]
pub struct UpdateSubscriptionUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub issued_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub renewal_cycle_days: Option<u32>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub auto_debit: Option<bool>,
    pub note: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdatedSubscription {
    pub subscription: Subscription,
    /// Whether the renewal date or the renewal cycle changed
    pub rescheduled: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidName,
    InvalidPrice(f64),
    InvalidRenewalCycle(u32),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSubscriptionUseCase {
    type Response = UpdatedSubscription;

    type Errors = UseCaseError;

    const NAME: &'static str = "UpdateSubscription";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let mut sub = match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(sub) if sub.user_id == self.user_id => sub,
            _ => return Err(UseCaseError::NotFound(self.subscription_id.clone())),
        };

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(UseCaseError::InvalidName);
            }
            sub.name = name.trim().into();
        }
        if let Some(price) = self.price {
            if price.is_nan() || price <= 0.0 {
                return Err(UseCaseError::InvalidPrice(price));
            }
            sub.price = price;
        }

        let mut rescheduled = false;
        if let Some(days) = self.renewal_cycle_days {
            if days == 0 {
                return Err(UseCaseError::InvalidRenewalCycle(days));
            }
            rescheduled |= sub.renewal_cycle_days != days;
            sub.renewal_cycle_days = days;
        }
        if let Some(renewal_date) = self.renewal_date {
            rescheduled |= sub.renewal_date != renewal_date;
            sub.renewal_date = renewal_date;
        }

        if let Some(currency) = self.currency.take() {
            sub.currency = currency;
        }
        if self.issued_date.is_some() {
            sub.issued_date = self.issued_date;
        }
        if let Some(category) = self.category.take() {
            sub.category = category;
        }
        if let Some(payment_method) = self.payment_method.take() {
            sub.payment_method = payment_method;
        }
        if let Some(auto_debit) = self.auto_debit {
            sub.auto_debit = auto_debit;
        }
        if let Some(note) = self.note.take() {
            sub.note = note;
        }
        if let Some(active) = self.active {
            sub.active = active;
        }

        ctx.repos
            .subscriptions
            .save(&sub)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UpdatedSubscription {
            subscription: sub,
            rescheduled,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ResetReminderOnSubscriptionRescheduled)]
    }
}
