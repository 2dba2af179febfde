use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use subtrack_api::Application;
use subtrack_domain::{Subscription, ID};
use subtrack_infra::{Config, IEmailSender, ISys, SubtrackContext};

pub struct TestApp {
    pub config: Config,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, String) {
    let mut ctx = SubtrackContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    (TestApp { config }, address)
}

pub struct FixedSys {
    now: Mutex<DateTime<Utc>>,
}

impl FixedSys {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl ISys for FixedSys {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct InboxEmailSender {
    pub inbox: Mutex<Vec<(String, ID)>>,
}

#[async_trait::async_trait]
impl IEmailSender for InboxEmailSender {
    async fn send(&self, to: &str, subscription: &Subscription) -> bool {
        self.inbox
            .lock()
            .unwrap()
            .push((to.to_string(), subscription.id.clone()));
        true
    }
}

/// In-memory context with a controllable clock and an inbox instead of an email api
pub fn inmemory_context(now: DateTime<Utc>) -> (SubtrackContext, Arc<FixedSys>, Arc<InboxEmailSender>) {
    let mut ctx = SubtrackContext::create_inmemory();
    let sys = Arc::new(FixedSys::new(now));
    let inbox = Arc::new(InboxEmailSender::default());
    ctx.sys = sys.clone();
    ctx.email_sender = inbox.clone();
    (ctx, sys, inbox)
}
