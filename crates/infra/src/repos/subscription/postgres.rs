use super::ISubscriptionRepo;
use chrono::{DateTime, Utc};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use subtrack_domain::{RenewalRecord, Subscription, ID};
use tracing::error;

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    user_uid: Uuid,
    name: String,
    price: f64,
    currency: String,
    issued_date: Option<DateTime<Utc>>,
    renewal_date: DateTime<Utc>,
    renewal_cycle_days: i32,
    category: String,
    payment_method: String,
    auto_debit: bool,
    note: String,
    renewal_history: Json<Vec<RenewalRecord>>,
    active: bool,
}

impl From<SubscriptionRaw> for Subscription {
    fn from(raw: SubscriptionRaw) -> Self {
        Subscription {
            id: raw.subscription_uid.into(),
            user_id: raw.user_uid.into(),
            name: raw.name,
            price: raw.price,
            currency: raw.currency,
            issued_date: raw.issued_date,
            renewal_date: raw.renewal_date,
            renewal_cycle_days: raw.renewal_cycle_days.max(0) as u32,
            category: raw.category,
            payment_method: raw.payment_method,
            auto_debit: raw.auto_debit,
            note: raw.note,
            renewal_history: raw.renewal_history.0,
            active: raw.active,
        }
    }
}

const SELECT_SUBSCRIPTIONS: &str = r#"
    SELECT subscription_uid, user_uid, name, price, currency, issued_date,
    renewal_date, renewal_cycle_days, category, payment_method, auto_debit,
    note, renewal_history, active
    FROM subscriptions
"#;

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions
            (subscription_uid, user_uid, name, price, currency, issued_date,
            renewal_date, renewal_cycle_days, frequency_label, category,
            payment_method, auto_debit, note, renewal_history, active)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.user_id.inner_ref())
        .bind(&subscription.name)
        .bind(subscription.price)
        .bind(&subscription.currency)
        .bind(subscription.issued_date)
        .bind(subscription.renewal_date)
        .bind(subscription.renewal_cycle_days as i32)
        .bind(subscription.frequency_label())
        .bind(&subscription.category)
        .bind(&subscription.payment_method)
        .bind(subscription.auto_debit)
        .bind(&subscription.note)
        .bind(Json(&subscription.renewal_history))
        .bind(subscription.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET name = $2,
            price = $3,
            currency = $4,
            issued_date = $5,
            renewal_date = $6,
            renewal_cycle_days = $7,
            frequency_label = $8,
            category = $9,
            payment_method = $10,
            auto_debit = $11,
            note = $12,
            renewal_history = $13,
            active = $14
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(&subscription.name)
        .bind(subscription.price)
        .bind(&subscription.currency)
        .bind(subscription.issued_date)
        .bind(subscription.renewal_date)
        .bind(subscription.renewal_cycle_days as i32)
        .bind(subscription.frequency_label())
        .bind(&subscription.category)
        .bind(&subscription.payment_method)
        .bind(subscription.auto_debit)
        .bind(&subscription.note)
        .bind(Json(&subscription.renewal_history))
        .bind(subscription.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        let res: Result<Option<SubscriptionRaw>, _> = sqlx::query_as(&format!(
            "{} WHERE subscription_uid = $1",
            SELECT_SUBSCRIPTIONS
        ))
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(subscription) => subscription.map(|s| s.into()),
            Err(e) => {
                error!("Unable to find subscription: {}. Err: {:?}", subscription_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Subscription> {
        let res: Result<Vec<SubscriptionRaw>, _> = sqlx::query_as(&format!(
            "{} WHERE user_uid = $1 ORDER BY renewal_date ASC",
            SELECT_SUBSCRIPTIONS
        ))
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await;

        match res {
            Ok(subscriptions) => subscriptions.into_iter().map(|s| s.into()).collect(),
            Err(e) => {
                error!("Unable to find subscriptions of user: {}. Err: {:?}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        let res: Result<Option<SubscriptionRaw>, _> = sqlx::query_as(
            r#"
            DELETE FROM subscriptions
            WHERE subscription_uid = $1
            RETURNING subscription_uid, user_uid, name, price, currency, issued_date,
            renewal_date, renewal_cycle_days, category, payment_method, auto_debit,
            note, renewal_history, active
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(subscription) => subscription.map(|s| s.into()),
            Err(e) => {
                error!("Unable to delete subscription: {}. Err: {:?}", subscription_id, e);
                None
            }
        }
    }
}
