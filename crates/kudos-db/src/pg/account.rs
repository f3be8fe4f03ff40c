//! PostgreSQL account repository implementation

use async_trait::async_trait;
use kudos_types::Tier;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::AccountRow;
use crate::repo::{AccountRepository, CreateAccount};

/// PostgreSQL account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, business_name, tier, onboarding_completed,
                   created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, email, business_name, tier)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, business_name, tier, onboarding_completed,
                      created_at, updated_at
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.business_name)
        .bind(Tier::Free.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_tier(&self, id: Uuid, tier: &str) -> DbResult<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET tier = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, email, business_name, tier, onboarding_completed,
                      created_at, updated_at
            "#,
        )
        .bind(tier)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DbError::NotFound)
    }

    async fn set_onboarding_completed(&self, id: Uuid) -> DbResult<()> {
        sqlx::query(
            "UPDATE accounts SET onboarding_completed = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
