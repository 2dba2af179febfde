mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailConfig};
pub use repos::{DeleteResult, IReminderRepo, ISubscriptionRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct SubtrackContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email_sender: Arc<dyn IEmailSender>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl SubtrackContext {
    async fn create(params: ContextParams) -> Self {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be set and valid"),
            None => {
                warn!("DATABASE_URL is not set. Data will only be kept in memory.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        Self {
            repos,
            email_sender: Arc::new(HttpEmailSender::new(config.email.clone())),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context backed by in-memory repos, used by tests
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        Self {
            repos: Repos::create_inmemory(),
            email_sender: Arc::new(HttpEmailSender::new(config.email.clone())),
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> SubtrackContext {
    SubtrackContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
