use chrono::{DateTime, Utc};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use subtrack_domain::{Reminder, Subscription, User, ID};
use subtrack_infra::{
    DeleteResult, IEmailSender, IReminderRepo, ISubscriptionRepo, ISys, SubtrackContext,
};

/// Clock that only moves when told to
pub struct SettableSys {
    now: Mutex<DateTime<Utc>>,
}

impl SettableSys {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl ISys for SettableSys {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Email sender that records every attempt instead of delivering it
pub struct RecordingEmailSender {
    accept: AtomicBool,
    sent: Mutex<Vec<(String, ID)>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self {
            accept: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Attempts made so far, accepted or not
    pub fn attempts(&self) -> Vec<(String, ID)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IEmailSender for RecordingEmailSender {
    async fn send(&self, to: &str, subscription: &Subscription) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subscription.id.clone()));
        self.accept.load(Ordering::SeqCst)
    }
}

/// Reminder store that fails on demand and delegates everything else
pub struct FailingReminderRepo {
    inner: Arc<dyn IReminderRepo>,
    fail_listing: AtomicBool,
    failing_saves: Mutex<Vec<ID>>,
}

impl FailingReminderRepo {
    pub fn wrap(inner: Arc<dyn IReminderRepo>) -> Self {
        Self {
            inner,
            fail_listing: AtomicBool::new(false),
            failing_saves: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_save_of(&self, reminder_id: &ID) {
        self.failing_saves.lock().unwrap().push(reminder_id.clone());
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FailingReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if self.failing_saves.lock().unwrap().contains(&reminder.id) {
            anyhow::bail!("Connection reset while saving reminder: {}", reminder.id);
        }
        self.inner.save(reminder).await
    }

    async fn find_enabled(&self) -> anyhow::Result<Vec<Reminder>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            anyhow::bail!("Connection reset while listing reminders");
        }
        self.inner.find_enabled().await
    }

    async fn find_by_subscription(&self, subscription_id: &ID, user_id: &ID) -> Option<Reminder> {
        self.inner.find_by_subscription(subscription_id, user_id).await
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        self.inner.find_by_user(user_id).await
    }

    async fn delete_by_subscription(&self, subscription_id: &ID) -> anyhow::Result<DeleteResult> {
        self.inner.delete_by_subscription(subscription_id).await
    }
}

/// Subscription store whose lookups of chosen subscriptions come back empty,
/// like the Postgres store does on a query error
pub struct FailingSubscriptionRepo {
    inner: Arc<dyn ISubscriptionRepo>,
    failing_lookups: Mutex<Vec<ID>>,
}

impl FailingSubscriptionRepo {
    pub fn wrap(inner: Arc<dyn ISubscriptionRepo>) -> Self {
        Self {
            inner,
            failing_lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_lookup_of(&self, subscription_id: &ID) {
        self.failing_lookups
            .lock()
            .unwrap()
            .push(subscription_id.clone());
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for FailingSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        self.inner.insert(subscription).await
    }

    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()> {
        self.inner.save(subscription).await
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        if self.failing_lookups.lock().unwrap().contains(subscription_id) {
            return None;
        }
        self.inner.find(subscription_id).await
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Subscription> {
        self.inner.find_by_user(user_id).await
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        self.inner.delete(subscription_id).await
    }
}

pub struct TestContext {
    pub ctx: SubtrackContext,
    pub sys: Arc<SettableSys>,
    pub email: Arc<RecordingEmailSender>,
    pub user: User,
}

pub async fn setup(now: DateTime<Utc>) -> TestContext {
    let mut ctx = SubtrackContext::create_inmemory();
    let sys = Arc::new(SettableSys::new(now));
    let email = Arc::new(RecordingEmailSender::new());
    ctx.sys = sys.clone();
    ctx.email_sender = email.clone();

    let mut user = User::new("Asha", "asha@example.com");
    user.timezone = Some("Asia/Kolkata".into());
    ctx.repos.users.insert(&user).await.unwrap();

    TestContext {
        ctx,
        sys,
        email,
        user,
    }
}
