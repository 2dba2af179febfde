use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use subtrack_domain::{User, ID};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    email: String,
    timezone: Option<String>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        User {
            id: raw.user_uid.into(),
            name: raw.name,
            email: raw.email,
            timezone: raw.timezone,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, name, email, timezone)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.timezone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let res: Result<Option<UserRaw>, _> = sqlx::query_as(
            r#"
            SELECT user_uid, name, email, timezone FROM users
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user: {}. Err: {:?}", user_id, e);
                None
            }
        }
    }
}
