use super::ISubscriptionRepo;
use crate::repos::shared::inmemory_repo::*;
use subtrack_domain::{Subscription, ID};

pub struct InMemorySubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        insert(subscription, &self.subscriptions);
        Ok(())
    }

    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()> {
        save(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        find(subscription_id, &self.subscriptions)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Subscription> {
        let mut subscriptions = find_by(&self.subscriptions, |s| s.user_id == *user_id);
        subscriptions.sort_by_key(|s| s.renewal_date);
        subscriptions
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        delete(subscription_id, &self.subscriptions)
    }
}
