pub mod create_subscription;
pub mod delete_subscription;
pub mod get_subscriptions;
pub mod renew_subscription;
pub mod update_subscription;
mod subscribers;
