use crate::shared::entity::{Entity, ID};
use chrono::prelude::*;
use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RENEWAL_CYCLE_DAYS: u32 = 30;
pub const DEFAULT_CURRENCY: &str = "INR";

/// A recurring payment the `User` wants to keep track of
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub issued_date: Option<DateTime<Utc>>,
    /// Start of the UTC day the `Subscription` renews
    pub renewal_date: DateTime<Utc>,
    pub renewal_cycle_days: u32,
    pub category: String,
    pub payment_method: String,
    pub auto_debit: bool,
    pub note: String,
    pub renewal_history: Vec<RenewalRecord>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalRecord {
    pub date: DateTime<Utc>,
    pub amount: f64,
}

impl Subscription {
    pub fn new(user_id: ID, name: &str, price: f64, renewal_date: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name: name.into(),
            price,
            currency: DEFAULT_CURRENCY.into(),
            issued_date: None,
            renewal_date,
            renewal_cycle_days: DEFAULT_RENEWAL_CYCLE_DAYS,
            category: "General".into(),
            payment_method: "None".into(),
            auto_debit: false,
            note: String::new(),
            renewal_history: Vec::new(),
            active: true,
        }
    }

    /// Human friendly name of the renewal cycle
    pub fn frequency_label(&self) -> String {
        match self.renewal_cycle_days {
            6..=9 => "Weekly".into(),
            27..=32 => "Monthly".into(),
            83..=96 => "Quarterly".into(),
            350..=380 => "Yearly".into(),
            days => format!("Custom ({} days)", days),
        }
    }

    /// Moves the `Subscription` on to its next cycle and records the payment
    /// of the cycle that just ended
    pub fn renew(&mut self) {
        let current = self.renewal_date;
        self.renewal_history.push(RenewalRecord {
            date: current,
            amount: self.price,
        });
        self.renewal_date = current + Duration::days(self.renewal_cycle_days as i64);
    }
}

impl Entity for Subscription {
    fn id(&self) -> &ID {
        &self.id
    }
}
