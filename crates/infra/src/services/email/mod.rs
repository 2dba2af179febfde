mod template;

use crate::config::EmailConfig;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use subtrack_domain::Subscription;
use tracing::{error, info};

pub use template::{reminder_html, reminder_subject};

/// Delivers renewal reminders to the owner of a `Subscription`
#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    /// Returns `true` if the email was accepted for delivery
    async fn send(&self, to: &str, subscription: &Subscription) -> bool;
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailContent {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

/// Request body of the v3 `mail/send` endpoint
#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: String,
    content: Vec<EmailContent>,
}

/// Sends reminders through an http mail api accepting SendGrid v3 `mail/send` bodies
pub struct HttpEmailSender {
    client: Client,
    config: EmailConfig,
}

impl HttpEmailSender {
    pub fn new(config: EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                error!("Unable to build email http client with timeout. Err: {:?}", e);
                Client::new()
            });

        Self { client, config }
    }
}

#[async_trait::async_trait]
impl IEmailSender for HttpEmailSender {
    async fn send(&self, to: &str, subscription: &Subscription) -> bool {
        let (api_key, from_address) = match (&self.config.api_key, &self.config.from_address) {
            (Some(key), Some(from)) => (key, from),
            _ => {
                error!("Email settings are missing. Set EMAIL_API_KEY and EMAIL_FROM.");
                return false;
            }
        };

        let body = SendMailRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: to,
                    name: None,
                }],
            }],
            from: EmailAddress {
                email: from_address,
                name: Some(&self.config.from_name),
            },
            subject: reminder_subject(subscription),
            content: vec![EmailContent {
                content_type: "text/html",
                value: reminder_html(subscription),
            }],
        };

        match self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => {
                info!(
                    "Reminder email for subscription {} accepted for delivery",
                    subscription.id
                );
                true
            }
            Ok(res) => {
                error!(
                    "Email api rejected reminder for subscription {} with status: {}",
                    subscription.id,
                    res.status()
                );
                false
            }
            Err(e) => {
                error!("Email transport error: {:?}", e);
                false
            }
        }
    }
}
