//! PostgreSQL resource count repository implementation

use async_trait::async_trait;
use kudos_types::ResourceKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repo::ResourceCountRepository;

/// PostgreSQL resource count repository
#[derive(Clone)]
pub struct PgResourceCountRepository {
    pool: PgPool,
}

impl PgResourceCountRepository {
    /// Create a new resource count repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceCountRepository for PgResourceCountRepository {
    async fn count_for_account(&self, account_id: Uuid, kind: ResourceKind) -> DbResult<i64> {
        // Table names cannot be bound as parameters; each kind maps to a
        // fixed query string.
        let query = match kind {
            ResourceKind::Testimonials => {
                "SELECT COUNT(*) FROM testimonials WHERE account_id = $1"
            }
            ResourceKind::Widgets => "SELECT COUNT(*) FROM widgets WHERE account_id = $1",
            ResourceKind::CollectionLinks => {
                "SELECT COUNT(*) FROM collection_links WHERE account_id = $1"
            }
        };

        let count: i64 = sqlx::query_scalar(query)
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
