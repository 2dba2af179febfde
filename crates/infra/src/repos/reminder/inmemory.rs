use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use subtrack_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find_enabled(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.enabled))
    }

    async fn find_by_subscription(&self, subscription_id: &ID, user_id: &ID) -> Option<Reminder> {
        find_by(&self.reminders, |r| {
            r.subscription_id == *subscription_id && r.user_id == *user_id
        })
        .into_iter()
        .next()
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| r.user_id == *user_id)
    }

    async fn delete_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<DeleteResult> {
        let deleted = find_and_delete_by(&self.reminders, |r| r.subscription_id == *subscription_id);
        Ok(DeleteResult {
            deleted_count: deleted.len() as i64,
        })
    }
}
