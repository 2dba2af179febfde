mod inmemory;
mod postgres;

pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;
use subtrack_domain::{Subscription, ID};

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn find(&self, subscription_id: &ID) -> Option<Subscription>;
    /// The `Subscription`s of a `User`, the next one to renew first
    async fn find_by_user(&self, user_id: &ID) -> Vec<Subscription>;
    async fn delete(&self, subscription_id: &ID) -> Option<Subscription>;
}

#[cfg(test)]
mod tests {
    use crate::repos::Repos;
    use chrono::{TimeZone, Utc};
    use subtrack_domain::{Subscription, ID};

    #[tokio::test]
    async fn finds_user_subscriptions_by_renewal_date() {
        let repos = Repos::create_inmemory();
        let user_id = ID::default();

        let later = Subscription::new(
            user_id.clone(),
            "Prime",
            1499.0,
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        );
        let sooner = Subscription::new(
            user_id.clone(),
            "Netflix",
            649.0,
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
        );
        let other_user = Subscription::new(
            ID::default(),
            "Hotstar",
            299.0,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        );
        for sub in &[&later, &sooner, &other_user] {
            repos.subscriptions.insert(sub).await.unwrap();
        }

        let res = repos.subscriptions.find_by_user(&user_id).await;
        assert_eq!(res, vec![sooner.clone(), later.clone()]);
    }

    #[tokio::test]
    async fn saves_and_deletes_subscription() {
        let repos = Repos::create_inmemory();
        let mut sub = Subscription::new(
            ID::default(),
            "Spotify",
            119.0,
            Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap(),
        );
        repos.subscriptions.insert(&sub).await.unwrap();

        sub.renew();
        repos.subscriptions.save(&sub).await.unwrap();
        assert_eq!(repos.subscriptions.find(&sub.id).await, Some(sub.clone()));

        assert_eq!(repos.subscriptions.delete(&sub.id).await, Some(sub.clone()));
        assert!(repos.subscriptions.find(&sub.id).await.is_none());
    }
}
