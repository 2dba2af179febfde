use subtrack_domain::{date::parse_timezone, DEFAULT_TIMEZONE};
use tracing::{info, warn};

const DEFAULT_EMAIL_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between two sweeps of the reminder dispatcher. The catch
    /// window of a reminder is one minute so this should not exceed 60.
    pub reminder_tick_secs: u64,
    /// Timezone new reminders are created in when the `User` has none
    pub default_timezone: String,
    pub email: EmailConfig,
}

/// Settings for the http mail api used to deliver reminders
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from_address: Option<String>,
    pub from_name: String,
    pub timeout_secs: u64,
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env_or("PORT", 5000);

        let mut reminder_tick_secs = parse_env_or("REMINDER_TICK_SECS", 60);
        if reminder_tick_secs == 0 || reminder_tick_secs > 60 {
            warn!(
                "REMINDER_TICK_SECS must be between 1 and 60, got: {}. Falling back to 60.",
                reminder_tick_secs
            );
            reminder_tick_secs = 60;
        }

        let default_timezone = match std::env::var("DEFAULT_TIMEZONE") {
            Ok(tz) if parse_timezone(&tz).is_some() => tz,
            Ok(tz) => {
                warn!(
                    "The given DEFAULT_TIMEZONE: {} is not a valid IANA timezone, falling back to: {}.",
                    tz, DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE.into()
            }
            Err(_) => DEFAULT_TIMEZONE.into(),
        };

        let email = EmailConfig {
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_else(|_| DEFAULT_EMAIL_API_URL.into()),
            api_key: std::env::var("EMAIL_API_KEY").ok(),
            from_address: std::env::var("EMAIL_FROM").ok(),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Smart Tracker".into()),
            timeout_secs: parse_env_or("EMAIL_TIMEOUT_SECS", 10),
        };
        if email.api_key.is_none() || email.from_address.is_none() {
            warn!("EMAIL_API_KEY or EMAIL_FROM is missing. Reminder emails will not be delivered.");
        } else {
            info!("Reminder emails are delivered through: {}", email.api_url);
        }

        Self {
            port,
            reminder_tick_secs,
            default_timezone,
            email,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
