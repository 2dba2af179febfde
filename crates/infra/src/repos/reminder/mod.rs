mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use subtrack_domain::{Reminder, ID};

use crate::repos::shared::repo::DeleteResult;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Persists the full record
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find_enabled(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_subscription(&self, subscription_id: &ID, user_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    async fn delete_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::repos::Repos;
    use subtrack_domain::{Reminder, ID};

    #[tokio::test]
    async fn finds_only_enabled_reminders() {
        let repos = Repos::create_inmemory();
        let user_id = ID::default();

        let enabled = Reminder::new(ID::default(), user_id.clone(), 1, "Asia/Kolkata");
        let mut disabled = Reminder::new(ID::default(), user_id.clone(), 1, "Asia/Kolkata");
        disabled.disable();
        repos.reminders.insert(&enabled).await.unwrap();
        repos.reminders.insert(&disabled).await.unwrap();

        let res = repos.reminders.find_enabled().await.unwrap();
        assert_eq!(res, vec![enabled.clone()]);

        disabled.enable();
        repos.reminders.save(&disabled).await.unwrap();
        assert_eq!(repos.reminders.find_enabled().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn finds_and_deletes_by_subscription() {
        let repos = Repos::create_inmemory();
        let user_id = ID::default();
        let subscription_id = ID::default();

        let reminder = Reminder::new(subscription_id.clone(), user_id.clone(), 2, "UTC");
        repos.reminders.insert(&reminder).await.unwrap();

        assert_eq!(
            repos
                .reminders
                .find_by_subscription(&subscription_id, &user_id)
                .await,
            Some(reminder)
        );
        // Scoped to the owner
        assert!(repos
            .reminders
            .find_by_subscription(&subscription_id, &ID::default())
            .await
            .is_none());

        let res = repos
            .reminders
            .delete_by_subscription(&subscription_id)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 1);
        assert!(repos
            .reminders
            .find_by_subscription(&subscription_id, &user_id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn finds_reminders_of_one_user() {
        let repos = Repos::create_inmemory();
        let user_id = ID::default();

        let first = Reminder::new(ID::default(), user_id.clone(), 1, "UTC");
        let mut second = Reminder::new(ID::default(), user_id.clone(), 3, "UTC");
        second.disable();
        let other = Reminder::new(ID::default(), ID::default(), 1, "UTC");
        for reminder in [&first, &second, &other] {
            repos.reminders.insert(reminder).await.unwrap();
        }

        // Disabled reminders are listed too
        assert_eq!(
            repos.reminders.find_by_user(&user_id).await,
            vec![first, second]
        );
        assert!(repos.reminders.find_by_user(&ID::default()).await.is_empty());
    }
}
